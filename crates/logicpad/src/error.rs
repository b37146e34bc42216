//! Error types for Logicpad operations.
//!
//! Failed checks are not errors: a tree or map that breaks a rule produces a
//! [`ValidationResult`](crate::ValidationResult). [`LogicpadError`] covers the
//! conditions under which no check can run at all.

use thiserror::Error;

use logicpad_notation::error::ErrorCode;

use crate::{attempts::MaxTries, config::ConfigError};

/// The main error type for Logicpad operations.
#[derive(Debug, Error)]
pub enum LogicpadError {
    #[error("unknown notation language `{0}`")]
    UnknownLanguage(String),

    #[error("no check attempts left: {attempts} used, {max} allowed")]
    AttemptsExhausted { attempts: u32, max: MaxTries },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LogicpadError {
    /// Diagnostic code for reporting, if the error has one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::UnknownLanguage(_) => Some(ErrorCode::E301),
            Self::AttemptsExhausted { .. } => Some(ErrorCode::E300),
            Self::Config(_) => None,
        }
    }

    /// Suggestion shown next to the error, if any.
    pub fn help(&self) -> Option<String> {
        match self {
            Self::UnknownLanguage(_) => {
                Some("register the language under [[languages]] in the configuration".to_string())
            }
            Self::AttemptsExhausted { .. } => {
                Some("ask an instructor to review or reset the exercise".to_string())
            }
            Self::Config(_) => None,
        }
    }
}
