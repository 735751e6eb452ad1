// src/client/mod.rs

use crate::model::SymptomReport;

pub mod gemini;
pub use gemini::GeminiClient;

/// Why a diagnosis request produced no answer.
///
/// A well-formed reply that merely lacks text is not an error; backends
/// return the fallback diagnosis for that case.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Status(u16),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Something that can turn a symptom report into diagnosis text.
pub trait DiagnosisBackend {
    fn name(&self) -> &str;
    fn diagnose(&self, report: &SymptomReport) -> Result<String, DiagnosisError>;
}
