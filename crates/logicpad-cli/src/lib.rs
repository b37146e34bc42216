//! CLI logic for the Logicpad exercise checker.
//!
//! This module contains the core CLI logic: loading configuration and
//! exercise files, running the requested check through [`Checker`], and
//! keeping the attempt ledger.

pub mod error_adapter;
pub mod exercise;

mod args;
mod config;

pub use args::{Args, Command, SessionArgs};

use std::{fmt, io};

use log::info;
use thiserror::Error;

use logicpad::{
    Checker, LogicpadError, Resolution, ValidationResult,
    attempts::{AttemptLedger, Role},
    language::Language,
};
use logicpad_notation::error::Diagnostic;

use exercise::{ExerciseError, FileLedger, MapFile, ResolveFile};

/// Errors that stop the CLI before a result can be reported.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Exercise(#[from] ExerciseError),

    #[error(transparent)]
    Logicpad(#[from] LogicpadError),
}

/// What a successful run produced.
#[derive(Debug)]
pub enum Outcome {
    /// An element stream was resolved.
    Resolved {
        /// The text the diagnostics' spans point into.
        source: String,
        /// The resolved symbols as the language writes them.
        written: String,
        diagnostics: Vec<Diagnostic>,
    },
    /// A tree or map was checked.
    Checked {
        result: ValidationResult,
        /// Checks the student has left, `None` when unlimited or uncounted.
        remaining: Option<u32>,
    },
}

impl Outcome {
    /// Returns `true` if the input resolved completely or the check passed.
    pub fn success(&self) -> bool {
        match self {
            Outcome::Resolved { diagnostics, .. } => diagnostics.is_empty(),
            Outcome::Checked { result, .. } => result.success(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Resolved { written, .. } => write!(f, "{written}"),
            Outcome::Checked { result, remaining } => {
                write!(f, "{}", result.message())?;
                if let Some(remaining) = remaining {
                    write!(f, " ({remaining} checks left)")?;
                }
                Ok(())
            }
        }
    }
}

/// Run the Logicpad CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed exercise files
/// - Unknown languages and exhausted attempts
pub fn run(args: &Args) -> Result<Outcome, CliError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let checker = Checker::new(app_config)?;

    match &args.command {
        Command::Resolve { input, language } => {
            info!(input_path = input; "Resolving element stream");
            let file = ResolveFile::load(input)?;
            let language = language
                .clone()
                .or_else(|| file.language.clone())
                .ok_or_else(|| ExerciseError::NoLanguage(input.into()))?;
            let (elements, source) = file.elements(input)?;

            let resolution = checker.resolve(elements, &language)?;
            let diagnostics = resolution.diagnostics();
            info!(
                language = language,
                expressions = resolution.len(),
                unresolved = diagnostics.len();
                "Element stream resolved"
            );
            Ok(Outcome::Resolved {
                source,
                written: written(&resolution, checker.language(&language)?),
                diagnostics,
            })
        }
        Command::Tree { input, session } => {
            info!(input_path = input; "Checking formula tree");
            let diagram = exercise::load_diagram(input)?;
            checked(checker, session, |checker, ledger| {
                checker.check_tree(&diagram, ledger)
            })
        }
        Command::Map { input, session } => {
            info!(input_path = input; "Checking map");
            let exercise = MapFile::load(input)?.into_exercise();
            checked(checker, session, |checker, ledger| {
                checker.check_map(&exercise, ledger)
            })
        }
    }
}

fn written(resolution: &Resolution, language: &Language) -> String {
    let symbols: Vec<String> = resolution
        .expressions()
        .iter()
        .map(|expr| expr.inner().written(language).to_string())
        .collect();
    symbols.join(" ")
}

fn checked(
    checker: Checker,
    session: &SessionArgs,
    check: impl FnOnce(&Checker, &mut FileLedger) -> Result<ValidationResult, LogicpadError>,
) -> Result<Outcome, CliError> {
    let role = if session.instructor {
        Role::Instructor
    } else {
        Role::Student
    };
    let checker = checker.with_role(role);
    let mut ledger = FileLedger::open(session.attempts.as_ref())?;

    let result = check(&checker, &mut ledger)?;
    ledger.save()?;

    let remaining = match role {
        Role::Student => checker
            .config()
            .attempts()
            .max_tries()
            .remaining(ledger.attempts()),
        Role::Instructor => None,
    };
    Ok(Outcome::Checked { result, remaining })
}
