//! Absorption of subscript and superscript digit runs.

use super::cursor::Cursor;
use crate::element::ScriptLevel;

/// Digit runs absorbed after a glyph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct Scripts {
    pub(super) sub: Option<String>,
    pub(super) sup: Option<String>,
}

/// Concatenates consecutive digit elements at `level`, in encounter order.
pub(super) fn digit_run(cursor: &mut Cursor<'_>, level: ScriptLevel) -> Option<String> {
    let mut run = String::new();
    while let Some(digits) = cursor.digits(level) {
        run.push_str(digits);
    }
    (!run.is_empty()).then_some(run)
}

/// Absorbs at most one subscript run and one superscript run, in either order.
pub(super) fn absorb(cursor: &mut Cursor<'_>, allow_sub: bool, allow_sup: bool) -> Scripts {
    let mut scripts = Scripts::default();
    loop {
        if allow_sub && scripts.sub.is_none() {
            if let Some(run) = digit_run(cursor, ScriptLevel::Sub) {
                scripts.sub = Some(run);
                continue;
            }
        }
        if allow_sup && scripts.sup.is_none() {
            if let Some(run) = digit_run(cursor, ScriptLevel::Super) {
                scripts.sup = Some(run);
                continue;
            }
        }
        return scripts;
    }
}

/// Arity written as a superscript run. `None` if it does not fit a `u32`.
pub(super) fn parse_arity(digits: &str) -> Option<u32> {
    digits.parse().ok()
}
