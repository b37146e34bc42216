//! Exercise files read by the CLI.
//!
//! Every input is a TOML document:
//!
//! - a **resolve** file gives an element stream, either as inline markup
//!   (`markup = "F^2_1ab"`) or as an `[[elements]]` array, and optionally the
//!   `language` to resolve against;
//! - a **tree** file is a diagram snapshot: `[[nodes]]` tagged with
//!   `kind = "formula"` or `kind = "justification"`, and `[[links]]`;
//! - a **map** file gives the two tiers as markup, their languages, and the
//!   student's `[[links]]` and `[[markers]]`.
//!
//! The attempt ledger is a small TOML file holding the attempt count and the
//! outcome of the last check.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use logicpad::{
    attempts::AttemptLedger,
    diagram::Diagram,
    element::{RawElement, parse_markup},
    map::{MapExercise, MapLink, QuestionMarker},
};

/// Errors reading or writing exercise files.
#[derive(Debug, Error)]
pub enum ExerciseError {
    #[error("Failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("`{0}` gives neither `markup` nor `elements`")]
    NoElements(PathBuf),

    #[error("no language given for `{0}`")]
    NoLanguage(PathBuf),
}

/// An element stream to resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveFile {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    markup: Option<String>,
    #[serde(default)]
    elements: Option<Vec<RawElement>>,
}

impl ResolveFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExerciseError> {
        read_toml(path.as_ref())
    }

    /// The element stream and the text its spans point into.
    ///
    /// Markup is its own source text. An `[[elements]]` array is laid out
    /// by position, with gaps filled by spaces.
    pub fn elements(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(Vec<RawElement>, String), ExerciseError> {
        if let Some(markup) = &self.markup {
            return Ok((parse_markup(markup), markup.clone()));
        }
        let elements = self
            .elements
            .clone()
            .ok_or_else(|| ExerciseError::NoElements(path.as_ref().to_path_buf()))?;
        let source = layout_source(&elements);
        Ok((elements, source))
    }
}

fn layout_source(elements: &[RawElement]) -> String {
    let mut ordered: Vec<&RawElement> = elements.iter().collect();
    ordered.sort_by_key(|e| e.position());

    let mut source = String::new();
    for element in ordered {
        while source.len() < element.position() {
            source.push(' ');
        }
        if source.len() == element.position() {
            source.push_str(element.text());
        }
    }
    source
}

/// Reads a diagram snapshot.
pub fn load_diagram(path: impl AsRef<Path>) -> Result<Diagram, ExerciseError> {
    let diagram: Diagram = read_toml(path.as_ref())?;
    debug!(
        nodes = diagram.nodes().len(),
        links = diagram.links().len();
        "Diagram loaded"
    );
    Ok(diagram)
}

/// A map exercise with both tiers written as markup.
#[derive(Debug, Clone, Deserialize)]
pub struct MapFile {
    upper: String,
    lower: String,
    upper_language: String,
    lower_language: String,
    #[serde(default)]
    links: Vec<MapLink>,
    #[serde(default)]
    markers: Vec<QuestionMarker>,
    #[serde(default)]
    no_map_exists: bool,
}

impl MapFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExerciseError> {
        read_toml(path.as_ref())
    }

    pub fn into_exercise(self) -> MapExercise {
        MapExercise {
            upper: parse_markup(&self.upper),
            lower: parse_markup(&self.lower),
            upper_language: self.upper_language,
            lower_language: self.lower_language,
            links: self.links,
            markers: self.markers,
            no_map_exists: self.no_map_exists,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct LedgerState {
    #[serde(default)]
    attempts: u32,
    #[serde(default)]
    passed: bool,
}

/// An [`AttemptLedger`] kept in a TOML file between runs.
///
/// Without a path the ledger lives in memory only, so every run starts from
/// zero attempts.
#[derive(Debug, Default)]
pub struct FileLedger {
    path: Option<PathBuf>,
    state: LedgerState,
}

impl FileLedger {
    /// Opens the ledger at `path`; a missing file is an empty ledger.
    pub fn open(path: Option<impl AsRef<Path>>) -> Result<Self, ExerciseError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let path = path.as_ref();
        let state = if path.exists() {
            read_toml(path)?
        } else {
            LedgerState::default()
        };
        debug!(path = path.display().to_string(), attempts = state.attempts; "Attempt ledger opened");
        Ok(Self {
            path: Some(path.to_path_buf()),
            state,
        })
    }

    /// Writes the ledger back to its file, if it has one.
    pub fn save(&self) -> Result<(), ExerciseError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = toml::to_string(&self.state).map_err(|e| ExerciseError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(path, content).map_err(|source| ExerciseError::Write {
            path: path.clone(),
            source,
        })
    }
}

impl AttemptLedger for FileLedger {
    fn attempts(&self) -> u32 {
        self.state.attempts
    }

    fn passed(&self) -> bool {
        self.state.passed
    }

    fn record(&mut self, passed: bool) {
        self.state.attempts = self.state.attempts.saturating_add(1);
        self.state.passed = passed;
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ExerciseError> {
    let content = fs::read_to_string(path).map_err(|source| ExerciseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ExerciseError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
