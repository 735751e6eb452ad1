// src/model/mod.rs

use std::fmt;

/// Shown when the provider answers but carries no usable text.
pub const FALLBACK_DIAGNOSIS: &str = "Unable to generate diagnosis at this time.";

/// Shown when the request itself fails (transport, status, undecodable body).
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Error connecting to diagnostic server. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("symptom report is empty")]
    Empty,
}

/// Free-text description of what the visitor sees, hears or smells.
///
/// Never empty or whitespace-only. The text is kept exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomReport {
    text: String,
}

impl SymptomReport {
    pub fn new(text: &str) -> Result<Self, ReportError> {
        if text.trim().is_empty() {
            return Err(ReportError::Empty);
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SymptomReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Coarse request lifecycle, as a status line would show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
    Done,
}
