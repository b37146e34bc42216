//! Diagnostics for Logicpad.
//!
//! Nothing in the resolver or the validators fails with an error for bad
//! student input; unresolved symbols and structural violations are ordinary
//! results. Unresolved notation is described by a [`Diagnostic`] warning: an
//! [`ErrorCode`] and message, with labeled [`Span`](crate::Span)s pointing
//! into the notation text.
//!
//! # Example
//!
//! ```
//! # use logicpad_notation::error::{Diagnostic, ErrorCode};
//! # use logicpad_notation::Span;
//! let diag = Diagnostic::new(ErrorCode::E001, "unrecognized symbol `$`")
//!     .at(Span::new(4..5), "not part of this language")
//!     .with_help("check the active notation language");
//!
//! assert_eq!(diag.to_string(), "warning[E001]: unrecognized symbol `$`");
//! ```

mod diagnostic;
mod error_code;
mod label;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
