//! # Logicpad Notation
//!
//! Typed reading of formula notation. The editor hands over an element
//! stream (text, document position and script level per element) together
//! with the name of the active notation language; [`resolve`] classifies the
//! elements into a flat sequence of [`Expression`](expression::Expression)s.
//!
//! ## Usage
//!
//! ```
//! # use logicpad_notation::{resolve, catalog::{names, LanguageCatalog}, element::parse_markup};
//! let language = LanguageCatalog::builtin().get(names::LQ_ABBREVIATED).unwrap();
//! let resolution = resolve(parse_markup("∀x(Fx∧a=x)"), language);
//!
//! assert!(resolution.is_complete());
//! assert_eq!(resolution.len(), 10);
//! ```
//!
//! Unrecognized elements are kept as residue rather than reported as errors;
//! [`Resolution::diagnostics`] describes them when they must be shown.

pub mod catalog;
pub mod element;
pub mod error;
pub mod expression;
pub mod language;
mod resolver;
mod span;

pub use resolver::{Resolution, resolve};
pub use span::{Span, Spanned};
