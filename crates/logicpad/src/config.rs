//! Configuration types for Logicpad checks.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be read
//! from TOML. Every section is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`TreeConfig`] - Row detection and justification strictness for tree checks.
//! - [`AttemptsConfig`] - The student attempt cap.
//! - Additional notation languages, registered on top of the built-in ones.
//!
//! # Example
//!
//! ```
//! # use logicpad::config::{AppConfig, RowMode};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [tree]
//!     row_tolerance = 12.5
//!     row_mode = "position"
//!
//!     [attempts]
//!     max_tries = 3
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.tree().row_mode(), RowMode::Position);
//! assert_eq!(config.tree().row_tolerance().epsilon(), 12.5);
//! ```

use serde::Deserialize;
use thiserror::Error;

use logicpad_core::geometry::RowTolerance;
use logicpad_notation::{
    catalog::{CatalogError, LanguageCatalog},
    language::Language,
};

use crate::attempts::MaxTries;

/// Errors in configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid max_tries `{0}`: expected \"unlimited\", \"none\" or a number")]
    InvalidMaxTries(String),

    #[error(transparent)]
    Language(#[from] CatalogError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tree check section.
    #[serde(default)]
    tree: TreeConfig,

    /// Attempt policy section.
    #[serde(default)]
    attempts: AttemptsConfig,

    /// Languages added to the built-in catalog.
    #[serde(default)]
    languages: Vec<Language>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given sections and no extra languages.
    pub fn new(tree: TreeConfig, attempts: AttemptsConfig) -> Self {
        Self {
            tree,
            attempts,
            languages: Vec::new(),
        }
    }

    /// Adds a language to register next to the built-in ones.
    pub fn with_language(mut self, language: Language) -> Self {
        self.languages.push(language);
        self
    }

    pub fn tree(&self) -> &TreeConfig {
        &self.tree
    }

    pub fn attempts(&self) -> &AttemptsConfig {
        &self.attempts
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Builds the language catalog: the built-in languages plus the
    /// configured ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Language`] if a configured language has no name,
    /// too many bracket levels, or a name that is already taken.
    pub fn catalog(&self) -> Result<LanguageCatalog, ConfigError> {
        let mut catalog = LanguageCatalog::with_builtin();
        for language in &self.languages {
            catalog.register(language.clone())?;
        }
        Ok(catalog)
    }
}

/// How formula and justification boxes are assigned to rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowMode {
    /// Cluster by vertical position.
    Position,
    /// Use the row index each node carries.
    Explicit,
    /// Explicit rows when every node carries one, positions otherwise.
    #[default]
    Auto,
}

/// Tree check settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TreeConfig {
    /// Vertical distance within which nodes share a row.
    #[serde(default)]
    row_tolerance: RowTolerance,

    #[serde(default)]
    row_mode: RowMode,

    /// Require a justification box on the root row as well.
    #[serde(default)]
    require_root_justification: bool,
}

impl TreeConfig {
    pub fn new(
        row_tolerance: RowTolerance,
        row_mode: RowMode,
        require_root_justification: bool,
    ) -> Self {
        Self {
            row_tolerance,
            row_mode,
            require_root_justification,
        }
    }

    pub fn row_tolerance(&self) -> RowTolerance {
        self.row_tolerance
    }

    pub fn row_mode(&self) -> RowMode {
        self.row_mode
    }

    pub fn require_root_justification(&self) -> bool {
        self.require_root_justification
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(RowTolerance::default(), RowMode::default(), false)
    }
}

/// Attempt policy settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AttemptsConfig {
    #[serde(default)]
    max_tries: MaxTries,
}

impl AttemptsConfig {
    pub fn new(max_tries: MaxTries) -> Self {
        Self { max_tries }
    }

    pub fn max_tries(&self) -> MaxTries {
        self.max_tries
    }
}
