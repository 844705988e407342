use std::cell::RefCell;

use serde::Serialize;
use tracing::warn;

/// A non-fatal diagnostic emitted by an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub summary: String,
    pub detail: String,
}

/// Diagnostics channel that logs warnings through `tracing` and keeps them
/// for later reporting.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    element: String,
    warnings: RefCell<Vec<Warning>>,
}

impl TracingDiagnostics {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn warn(&self, summary: &str, detail: &str) {
        warn!(element = %self.element, detail, "{}", summary);
        self.warnings.borrow_mut().push(Warning {
            summary: summary.to_string(),
            detail: detail.to_string(),
        });
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }
}
