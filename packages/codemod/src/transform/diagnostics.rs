//! Transform Diagnostics
//!
//! Structured, collected events produced while building property models.
//! The sink replaces process-wide logging so callers and tests can assert
//! on exactly what was reported.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An existing decorator had no supported translation and was dropped
    IgnoredDecorator,
    /// A property shape is not legal under the current options
    ValidationError,
    /// The output is correct but deserves a human look (e.g. an action
    /// overriding a parent action)
    ManualReview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Property the event belongs to
    pub property: String,
    pub message: String,
}

impl Diagnostic {
    pub fn ignored_decorator(property: impl Into<String>, decorator: &str) -> Self {
        let property = property.into();
        Diagnostic {
            message: format!(
                "[{}]: ignoring decorator '@{}' - no supported translation",
                property, decorator
            ),
            kind: DiagnosticKind::IgnoredDecorator,
            property,
        }
    }

    pub fn validation(property: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::ValidationError,
            property: property.into(),
            message: message.into(),
        }
    }

    pub fn manual_review(property: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::ManualReview,
            property: property.into(),
            message: message.into(),
        }
    }
}
