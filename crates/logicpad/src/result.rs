//! Outcome of a tree or map check.

use std::fmt;

use logicpad_core::identifier::Id;
use logicpad_notation::error::ErrorCode;

/// The closed set of rule violations a check can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    // Tree checks
    EmptyDiagram,
    InconsistentModel,
    MissingJustification,
    DuplicateJustification,
    MissingPrime,
    JustificationCountMismatch,
    SameRowLink,
    MultipleRoots,
    MultipleChildren,
    DisconnectedNode,
    JustificationWithoutFormulas,

    // Map checks
    UnresolvedTier,
    IllegalSubExpression,
    MissingMap,
    UnmappedPosition,
    DuplicateMapping,
    IncompatibleMapping,
    StructureNotPreserved,
    InconsistentPlaceholder,
    MapWhereNoneExists,
    MissingMarker,
}

impl Violation {
    pub fn code(self) -> ErrorCode {
        match self {
            Violation::EmptyDiagram => ErrorCode::E100,
            Violation::InconsistentModel => ErrorCode::E101,
            Violation::MissingJustification => ErrorCode::E102,
            Violation::DuplicateJustification => ErrorCode::E103,
            Violation::MissingPrime => ErrorCode::E104,
            Violation::JustificationCountMismatch => ErrorCode::E105,
            Violation::SameRowLink => ErrorCode::E106,
            Violation::MultipleRoots => ErrorCode::E107,
            Violation::MultipleChildren => ErrorCode::E108,
            Violation::DisconnectedNode => ErrorCode::E109,
            Violation::JustificationWithoutFormulas => ErrorCode::E110,
            Violation::UnresolvedTier => ErrorCode::E200,
            Violation::IllegalSubExpression => ErrorCode::E201,
            Violation::MissingMap => ErrorCode::E202,
            Violation::UnmappedPosition => ErrorCode::E203,
            Violation::DuplicateMapping => ErrorCode::E204,
            Violation::IncompatibleMapping => ErrorCode::E205,
            Violation::StructureNotPreserved => ErrorCode::E206,
            Violation::InconsistentPlaceholder => ErrorCode::E207,
            Violation::MapWhereNoneExists => ErrorCode::E208,
            Violation::MissingMarker => ErrorCode::E209,
        }
    }

    /// Message shown to the student.
    pub fn message(self) -> &'static str {
        match self {
            Violation::EmptyDiagram | Violation::InconsistentModel => "Nothing to evaluate",
            Violation::MissingJustification => "Missing justification on row",
            Violation::DuplicateJustification => "Only one justification field for each row",
            Violation::MissingPrime => "Missing prime on abbreviating rule",
            Violation::JustificationCountMismatch => {
                "Justification count does not match the formulas on this row"
            }
            Violation::SameRowLink => "A tree cannot have connected nodes in same row",
            Violation::MultipleRoots => "A tree can have only one bottom (root) node",
            Violation::MultipleChildren => "A node in a tree can have at most one child",
            Violation::DisconnectedNode => "Node is not an ancestor of the root node",
            Violation::JustificationWithoutFormulas => "Justification is not on a row with formulas",
            Violation::UnresolvedTier => "Expression contains unrecognized symbols",
            Violation::IllegalSubExpression => "Link does not mark a legal sub-expression",
            Violation::MissingMap => "Draw the map before checking",
            Violation::UnmappedPosition => "Every symbol needs exactly one link",
            Violation::DuplicateMapping => "A symbol of the upper expression has more than one link",
            Violation::IncompatibleMapping => "Linked symbols do not correspond",
            Violation::StructureNotPreserved => "Links must not cross or overlap",
            Violation::InconsistentPlaceholder => {
                "A placeholder must map to the same expression everywhere"
            }
            Violation::MapWhereNoneExists => "No correct map exists for this exercise",
            Violation::MissingMarker => "Mark where the map fails with a question marker",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one check: success flag, message and the nodes to highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    success: bool,
    message: String,
    highlight_ids: Vec<Id>,
    violation: Option<Violation>,
    help: Option<String>,
}

impl ValidationResult {
    pub fn passed() -> Self {
        Self {
            success: true,
            message: "Correct".to_string(),
            highlight_ids: Vec::new(),
            violation: None,
            help: None,
        }
    }

    pub fn failed(violation: Violation, highlight_ids: impl IntoIterator<Item = Id>) -> Self {
        Self {
            success: false,
            message: violation.message().to_string(),
            highlight_ids: highlight_ids.into_iter().collect(),
            violation: Some(violation),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Nodes, links or markers the editor should highlight.
    pub fn highlight_ids(&self) -> &[Id] {
        &self.highlight_ids
    }

    pub fn violation(&self) -> Option<Violation> {
        self.violation
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.violation.map(Violation::code)
    }

    /// Extra guidance, e.g. the primed form of a rule.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
