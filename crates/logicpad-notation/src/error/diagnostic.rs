//! Warnings about unresolved notation.

use std::fmt;

use crate::{
    error::{ErrorCode, Label},
    span::Span,
};

/// A warning about one element the resolver left unresolved.
///
/// Residue never stops resolution, so every diagnostic is a warning; callers
/// decide whether an incomplete resolution is acceptable. Rendered by the
/// command-line tool as:
///
/// ```text
/// warning[E001]: unrecognized symbol `$`
///   |
/// 1 | ~F$a
///   |   ^ not a symbol of the active language
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The element at fault first, then any context.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Marks the element at fault.
    pub fn at(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.insert(0, Label::primary(span, message));
        self
    }

    /// Points at a neighbouring element for context.
    pub fn near(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::context(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.message)
    }
}
