//! Logicpad - checking symbolic-logic exercises.
//!
//! Resolves formula notation against a notation language, validates
//! formula-tree diagrams, and validates correspondence maps between a
//! metalanguage form and an object-language expression.

pub mod attempts;
pub mod config;
pub mod map;
pub mod tree;

mod error;
mod result;

pub use logicpad_core::{diagram, geometry, history, identifier};
pub use logicpad_notation::{Resolution, catalog, element, expression, language};

pub use error::LogicpadError;
pub use result::{ValidationResult, Violation};

use log::{debug, info, warn};

use logicpad_core::diagram::Diagram;
use logicpad_notation::{catalog::LanguageCatalog, element::RawElement, language::Language};

use attempts::{AttemptLedger, Role};
use config::AppConfig;
use map::{MapExercise, MapValidator};
use tree::TreeValidator;

/// Entry point for resolving notation and checking exercises.
///
/// Holds the configuration, the language catalog built from it, and the role
/// of whoever runs the checks. Student checks are counted in an
/// [`AttemptLedger`] and refused once the configured cap is reached.
///
/// # Examples
///
/// ```
/// use logicpad::{Checker, attempts::AttemptRecord, catalog::names, element::parse_markup};
/// use logicpad::diagram::{Diagram, DiagramLink, FormulaBox, JustificationBox};
/// use logicpad::geometry::Point;
///
/// let checker = Checker::default();
/// let resolution = checker.resolve(parse_markup("~F^1a"), names::LQ).unwrap();
/// assert!(resolution.is_complete());
///
/// let diagram = Diagram::from_parts(
///     vec![
///         FormulaBox::new("root", Point::new(0.0, 0.0), "F^1a").into(),
///         FormulaBox::new("negation", Point::new(0.0, 60.0), "~F^1a").into(),
///         JustificationBox::new("why", Point::new(200.0, 60.0), "FR(~)").into(),
///     ],
///     vec![DiagramLink::new("l", "negation", "root")],
/// );
/// let mut record = AttemptRecord::new();
/// let result = checker.check_tree(&diagram, &mut record).unwrap();
/// assert!(result.success());
/// ```
#[derive(Debug, Clone)]
pub struct Checker {
    config: AppConfig,
    catalog: LanguageCatalog,
    tree: TreeValidator,
    role: Role,
}

impl Checker {
    /// Creates a checker for students.
    ///
    /// # Errors
    ///
    /// Returns [`LogicpadError::Config`] if a configured language cannot be
    /// registered.
    pub fn new(config: AppConfig) -> Result<Self, LogicpadError> {
        let catalog = config.catalog()?;
        debug!(languages = catalog.len(); "Language catalog ready");
        let tree = TreeValidator::new(*config.tree());
        Ok(Self {
            config,
            catalog,
            tree,
            role: Role::Student,
        })
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Looks up a language by name.
    ///
    /// # Errors
    ///
    /// Returns [`LogicpadError::UnknownLanguage`] if no language has that name.
    pub fn language(&self, name: &str) -> Result<&Language, LogicpadError> {
        self.catalog
            .get(name)
            .map(|language| language.as_ref())
            .ok_or_else(|| LogicpadError::UnknownLanguage(name.to_string()))
    }

    /// Resolves an element stream against the named language.
    ///
    /// # Errors
    ///
    /// Returns [`LogicpadError::UnknownLanguage`] if no language has that name.
    pub fn resolve(
        &self,
        elements: Vec<RawElement>,
        language: &str,
    ) -> Result<Resolution, LogicpadError> {
        let language = self.language(language)?;
        Ok(logicpad_notation::resolve(elements, language))
    }

    /// Checks a formula-tree diagram.
    ///
    /// # Errors
    ///
    /// Returns [`LogicpadError::AttemptsExhausted`] without checking when a
    /// student has no attempts left.
    pub fn check_tree(
        &self,
        diagram: &Diagram,
        ledger: &mut impl AttemptLedger,
    ) -> Result<ValidationResult, LogicpadError> {
        self.counted(ledger, || self.tree.check(diagram))
    }

    /// Checks a map exercise.
    ///
    /// # Errors
    ///
    /// Returns [`LogicpadError::UnknownLanguage`] if either tier names an
    /// unknown language, and [`LogicpadError::AttemptsExhausted`] when a
    /// student has no attempts left. Neither counts as an attempt.
    pub fn check_map(
        &self,
        exercise: &MapExercise,
        ledger: &mut impl AttemptLedger,
    ) -> Result<ValidationResult, LogicpadError> {
        let upper = self.language(&exercise.upper_language)?;
        let lower = self.language(&exercise.lower_language)?;
        self.counted(ledger, || MapValidator::new().check(exercise, upper, lower))
    }

    fn counted(
        &self,
        ledger: &mut impl AttemptLedger,
        check: impl FnOnce() -> ValidationResult,
    ) -> Result<ValidationResult, LogicpadError> {
        if self.role == Role::Instructor {
            debug!("Instructor check, attempt not counted");
            return Ok(check());
        }

        let max = self.config.attempts().max_tries();
        let attempts = ledger.attempts();
        if !max.allows(attempts) {
            warn!(attempts, max:% = max; "Check refused, no attempts left");
            return Err(LogicpadError::AttemptsExhausted { attempts, max });
        }

        let result = check();
        ledger.record(result.success());
        info!(
            attempt = ledger.attempts(),
            passed = result.success();
            "Attempt recorded"
        );
        Ok(result)
    }
}

impl Default for Checker {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            catalog: LanguageCatalog::with_builtin(),
            tree: TreeValidator::new(*config.tree()),
            config,
            role: Role::Student,
        }
    }
}
