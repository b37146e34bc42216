//! Spans a diagnostic points at.

use crate::span::Span;

/// A message attached to one element's span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    /// The element at fault.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    /// A neighbouring element that explains the fault.
    pub fn context(span: Span, message: impl Into<String>) -> Self {
        Self {
            primary: false,
            ..Self::primary(span, message)
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }
}
