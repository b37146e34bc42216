//! Error codes.
//!
//! Codes are grouped by the component that reports them:
//! - `E0xx` - Symbol resolver
//! - `E1xx` - Tree validator
//! - `E2xx` - Map validator
//! - `E3xx` - Check session

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Resolver (E0xx)
    // =========================================================================
    /// Unrecognized symbol: the glyph belongs to no class of the language.
    E001,

    /// Unattached script: subscript or superscript text that no symbol absorbed.
    E002,

    // =========================================================================
    // Tree validation (E1xx)
    // =========================================================================
    /// The diagram contains no formula boxes.
    E100,

    /// A link references a node that is missing or cannot be linked.
    E101,

    /// A row has no justification box.
    E102,

    /// A row has more than one justification box.
    E103,

    /// An abbreviating rule is cited without its prime.
    E104,

    /// The number of cited rules differs from the formulas on the row.
    E105,

    /// Two formula boxes on the same row are linked.
    E106,

    /// More than one node sits on the bottom row.
    E107,

    /// A node has more than one child.
    E108,

    /// A node is not connected to the root.
    E109,

    /// A row holds a justification box but no formula boxes.
    E110,

    // =========================================================================
    // Map validation (E2xx)
    // =========================================================================
    /// One of the expressions contains unrecognized symbols.
    E200,

    /// A link or marker does not denote a legal sub-expression.
    E201,

    /// The exercise has a correct map but no links were drawn.
    E202,

    /// A position of the upper expression has no link.
    E203,

    /// A position of the upper expression has more than one link.
    E204,

    /// A link joins symbols of incompatible kinds.
    E205,

    /// Links cross or overlap, so the map does not preserve structure.
    E206,

    /// One placeholder is mapped to different sub-expressions.
    E207,

    /// Links were drawn although no correct map exists.
    E208,

    /// A no-map answer does not mark where the map fails.
    E209,

    // =========================================================================
    // Check session (E3xx)
    // =========================================================================
    /// No check attempts left.
    E300,

    /// The exercise names a language the catalog does not know.
    E301,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E104").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",
            ErrorCode::E108 => "E108",
            ErrorCode::E109 => "E109",
            ErrorCode::E110 => "E110",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
            ErrorCode::E209 => "E209",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unrecognized symbol",
            ErrorCode::E002 => "unattached script",
            ErrorCode::E100 => "empty diagram",
            ErrorCode::E101 => "inconsistent diagram model",
            ErrorCode::E102 => "missing justification",
            ErrorCode::E103 => "duplicate justification",
            ErrorCode::E104 => "missing prime",
            ErrorCode::E105 => "justification count mismatch",
            ErrorCode::E106 => "same-row link",
            ErrorCode::E107 => "multiple roots",
            ErrorCode::E108 => "multiple children",
            ErrorCode::E109 => "disconnected node",
            ErrorCode::E110 => "justification without formulas",
            ErrorCode::E200 => "unresolved expression",
            ErrorCode::E201 => "illegal sub-expression",
            ErrorCode::E202 => "missing map",
            ErrorCode::E203 => "unmapped position",
            ErrorCode::E204 => "position mapped twice",
            ErrorCode::E205 => "incompatible mapping",
            ErrorCode::E206 => "structure not preserved",
            ErrorCode::E207 => "inconsistent placeholder",
            ErrorCode::E208 => "map drawn where none exists",
            ErrorCode::E209 => "missing question marker",
            ErrorCode::E300 => "attempts exhausted",
            ErrorCode::E301 => "unknown language",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
