//! Adapters for rendering Logicpad results with miette.
//!
//! This module provides the bridge between the library's plain result and
//! error types and miette's rich diagnostic formatting used in the CLI.
//!
//! Three things get reported:
//! - resolver [`Diagnostic`]s, one per unresolved element, labeled against
//!   the element text;
//! - a failed [`ValidationResult`], with the highlighted node ids in its help;
//! - a [`CliError`] that stopped the run.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan,
};

use logicpad::ValidationResult;
use logicpad_notation::{Span, error::Diagnostic};

use crate::{CliError, Outcome};

/// Adapter for a single resolver diagnostic.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Element text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.code()) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(MietteSeverity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for a failed [`ValidationResult`].
///
/// Diagrams have no source text, so the offending node ids are listed in the
/// help instead of being labeled.
pub struct ViolationAdapter<'a>(pub &'a ValidationResult);

impl fmt::Debug for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.message())
    }
}

impl std::error::Error for ViolationAdapter<'_> {}

impl MietteDiagnostic for ViolationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.code().map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let highlighted: Vec<String> = self
            .0
            .highlight_ids()
            .iter()
            .map(|id| format!("`{id}`"))
            .collect();
        let highlighted = (!highlighted.is_empty())
            .then(|| format!("highlighted: {}", highlighted.join(", ")));

        let help = match (self.0.help(), highlighted) {
            (Some(help), Some(highlighted)) => format!("{help}\n{highlighted}"),
            (Some(help), None) => help.to_string(),
            (None, Some(highlighted)) => highlighted,
            (None, None) => return None,
        };
        Some(Box::new(help))
    }
}

/// Adapter for [`CliError`]s.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            CliError::Io(_) => Some(Box::new("logicpad::io")),
            CliError::Config(_) => Some(Box::new("logicpad::config")),
            CliError::Exercise(_) => Some(Box::new("logicpad::exercise")),
            CliError::Logicpad(err) => err.code().map(|c| Box::new(c) as Box<dyn fmt::Display>),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            CliError::Logicpad(err) => err.help().map(|h| Box::new(h) as Box<dyn fmt::Display>),
            _ => None,
        }
    }
}

/// A reportable result that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A resolver diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A failed tree or map check.
    Violation(ViolationAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Violation(v) => fmt::Display::fmt(v, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) | Reportable::Violation(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Violation(v) => v.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Violation(v) => v.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Violation(v) => v.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Violation(v) => v.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Violation(v) => v.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Reportables for an unsuccessful [`Outcome`]: one per unresolved element,
/// or the failed check. A successful outcome has none.
pub fn outcome_reportables(outcome: &Outcome) -> Vec<Reportable<'_>> {
    match outcome {
        Outcome::Resolved {
            source,
            diagnostics,
            ..
        } => diagnostics
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, source)))
            .collect(),
        Outcome::Checked { result, .. } if !result.success() => {
            vec![Reportable::Violation(ViolationAdapter(result))]
        }
        Outcome::Checked { .. } => Vec::new(),
    }
}
