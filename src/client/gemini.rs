// src/client/gemini.rs

use crate::client::{DiagnosisBackend, DiagnosisError};
use crate::config::ClientConfig;
use crate::model::{FALLBACK_DIAGNOSIS, SymptomReport};
use crate::prompt::{self, ComposedPrompt};
use serde::Serialize;
use serde_json::Value;
use std::net::IpAddr;
use tracing::{debug, warn};

/// Path of the answer inside a `generateContent` reply.
const ANSWER_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Single-shot client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Result<Self, DiagnosisError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.timeout);
        if is_loopback(&config.base_url) {
            builder = builder.no_proxy();
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint without the credential, safe to log.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    pub fn generate(&self, prompt: &ComposedPrompt) -> Result<String, DiagnosisError> {
        let endpoint = self.endpoint();
        debug!(%endpoint, model = %self.config.model, "sending diagnosis request");

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::from(prompt))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), %body, "diagnosis provider rejected request");
            return Err(DiagnosisError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let json: Value = serde_json::from_str(&body)?;
        Ok(extract_answer(&json))
    }
}

impl DiagnosisBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn diagnose(&self, report: &SymptomReport) -> Result<String, DiagnosisError> {
        self.generate(&prompt::compose(report))
    }
}

/// First candidate's first text part, or the fallback when the reply has
/// none (missing path, wrong types, or empty text).
pub fn extract_answer(json: &Value) -> String {
    match json.pointer(ANSWER_POINTER).and_then(|v| v.as_str()) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            warn!(response = %json, "diagnosis response carried no answer text");
            FALLBACK_DIAGNOSIS.to_string()
        }
    }
}

/// Local endpoints (test doubles, dev proxies) bypass any system proxy.
fn is_loopback(base_url: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(base_url) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    host.eq_ignore_ascii_case("localhost")
        || host
            .trim_matches(['[', ']'])
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

impl<'a> From<&'a ComposedPrompt> for GenerateContentRequest<'a> {
    fn from(prompt: &'a ComposedPrompt) -> Self {
        Self {
            contents: vec![Content::text(&prompt.user_turn)],
            system_instruction: Content::text(&prompt.system_instruction),
        }
    }
}
