pub mod client;
pub mod config;
pub mod console;
pub mod model;
pub mod prompt;
pub mod widget;
