//! Pass 5: formula and pseudo-formula placeholders.
//!
//! Pseudo-formula placeholders stand for formulas the exercise author
//! declares variable-free. The declaration is recorded in the symbol's kind
//! and never checked.

use super::{cursor::Cursor, scripts};
use crate::{
    element::ScriptLevel,
    expression::{Expression, Symbol},
    language::{GlyphClass, Language},
};

pub(super) fn resolve_at(cursor: &mut Cursor<'_>, language: &Language) -> Option<Expression> {
    let glyph = cursor.glyph()?;
    let make: fn(Symbol) -> Expression =
        if language.contains(GlyphClass::FormulaPlaceholders, glyph) {
            Expression::FormulaPlaceholder
        } else if language.contains(GlyphClass::PseudoFormulaPlaceholders, glyph) {
            Expression::PseudoFormulaPlaceholder
        } else {
            return None;
        };
    let sub = scripts::digit_run(cursor, ScriptLevel::Sub);
    Some(make(Symbol::new(glyph, sub)))
}
