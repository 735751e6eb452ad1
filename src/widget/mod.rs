// src/widget/mod.rs

use crate::client::DiagnosisBackend;
use crate::model::{CONNECTION_ERROR_MESSAGE, RequestState, SymptomReport};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// What the diagnostics panel is showing.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl WidgetState {
    pub fn request_state(&self) -> RequestState {
        match self {
            WidgetState::Idle => RequestState::Idle,
            WidgetState::Pending => RequestState::Pending,
            WidgetState::Succeeded(_) | WidgetState::Failed(_) => RequestState::Done,
        }
    }

    pub fn result_text(&self) -> Option<&str> {
        match self {
            WidgetState::Succeeded(text) | WidgetState::Failed(text) => Some(text),
            WidgetState::Idle | WidgetState::Pending => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty or whitespace; nothing changed.
    Ignored,
    /// Another submission is still pending; nothing changed.
    Busy,
    /// The request resolved; carries the state it left behind.
    Completed(WidgetState),
}

#[derive(Default)]
struct Panel {
    input: String,
    state: WidgetState,
}

/// The symptom checker: input box, submit action, result pane.
///
/// At most one request is in flight per widget; further submissions while
/// one is pending are refused rather than queued.
pub struct DiagnosticsWidget {
    backend: Box<dyn DiagnosisBackend + Send + Sync>,
    panel: Mutex<Panel>,
}

impl DiagnosticsWidget {
    pub fn new<B: DiagnosisBackend + Send + Sync + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
            panel: Mutex::new(Panel::default()),
        }
    }

    pub fn set_input(&self, text: &str) {
        self.panel().input = text.to_string();
    }

    pub fn input(&self) -> String {
        self.panel().input.clone()
    }

    pub fn state(&self) -> WidgetState {
        self.panel().state.clone()
    }

    /// True while the submit action is disabled.
    pub fn is_loading(&self) -> bool {
        self.panel().state == WidgetState::Pending
    }

    pub fn result_text(&self) -> Option<String> {
        self.panel().state.result_text().map(str::to_string)
    }

    /// Sets the input and submits it in one go.
    pub fn submit_text(&self, text: &str) -> SubmitOutcome {
        self.set_input(text);
        self.submit()
    }

    /// Runs the current input through the backend. Blocks until the request
    /// resolves; the widget is back to a settled state on every path.
    pub fn submit(&self) -> SubmitOutcome {
        self.submit_with(|| {})
    }

    /// Like [`submit`](Self::submit), calling `on_pending` once the widget
    /// has entered `Pending` and before the backend is called. Not called
    /// for ignored or busy submissions.
    pub fn submit_with<F: FnOnce()>(&self, on_pending: F) -> SubmitOutcome {
        let report = {
            let mut panel = self.panel();
            if panel.state == WidgetState::Pending {
                return SubmitOutcome::Busy;
            }
            let Ok(report) = SymptomReport::new(&panel.input) else {
                return SubmitOutcome::Ignored;
            };
            panel.state = WidgetState::Pending;
            report
        };
        on_pending();

        let settled = match self.backend.diagnose(&report) {
            Ok(text) => {
                info!(backend = self.backend.name(), "diagnosis complete");
                WidgetState::Succeeded(text)
            }
            Err(err) => {
                warn!(backend = self.backend.name(), error = %err, "diagnosis request failed");
                WidgetState::Failed(CONNECTION_ERROR_MESSAGE.to_string())
            }
        };

        self.panel().state = settled.clone();
        SubmitOutcome::Completed(settled)
    }

    fn panel(&self) -> MutexGuard<'_, Panel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
