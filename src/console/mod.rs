// src/console/mod.rs

//! Terminal rendering of the diagnostics panel.

use crate::widget::{DiagnosticsWidget, SubmitOutcome, WidgetState};
use colored::Colorize;
use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;

pub const SYSTEM_NAME: &str = "Majeed-Lab-OS v2.0";
pub const PROMPT_HINT: &str =
    "Type symptoms here (e.g. 'Tractor engine knocking loudly when cold')...";

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("static regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+(.*)$").expect("static regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*+]\s+").expect("static regex"));

pub fn banner() -> String {
    format!(
        "{}\n{}\n{}",
        SYSTEM_NAME.bright_blue().bold(),
        "> Initializing Diagnostic Core...".dimmed(),
        "> System Ready. Waiting for input...".dimmed()
    )
}

pub fn pending_line() -> String {
    format!("{}", "⚙ Analyzing Engine Data...".yellow())
}

/// Text for a settled panel; `None` when there is nothing to show.
pub fn render_state(state: &WidgetState) -> Option<String> {
    match state {
        WidgetState::Succeeded(text) => Some(format!(
            "{}\n{}",
            "Analysis Complete:".bright_blue().bold(),
            render_markdown(text)
        )),
        WidgetState::Failed(message) => Some(format!(
            "{}\n{}",
            "Analysis Complete:".bright_blue().bold(),
            message.red()
        )),
        WidgetState::Idle | WidgetState::Pending => None,
    }
}

/// Submits the widget's current input, printing the pending line while the
/// request runs and the settled panel afterwards. Prints nothing for blank
/// input.
pub fn submit_and_render<W: Write>(widget: &DiagnosticsWidget, out: &mut W) -> io::Result<()> {
    let mut pending: io::Result<()> = Ok(());
    let outcome = widget.submit_with(|| {
        pending = writeln!(out, "{}", pending_line()).and_then(|_| out.flush());
    });
    pending?;

    if let SubmitOutcome::Completed(state) = outcome {
        if let Some(text) = render_state(&state) {
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}

/// Renders the light markdown the model tends to emit: headings, bold spans
/// and `*` bullets. Everything else passes through untouched.
pub fn render_markdown(text: &str) -> String {
    text.lines()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(line: &str) -> String {
    if let Some(caps) = HEADING.captures(line) {
        let title = BOLD.replace_all(&caps[1], "$1");
        return title.bold().underline().to_string();
    }

    let line = BULLET.replace(line, "$1- ");

    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in BOLD.captures_iter(&line) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&line[last..whole.start()]);
        out.push_str(&caps[1].bold().to_string());
        last = whole.end();
    }
    out.push_str(&line[last..]);
    out
}
