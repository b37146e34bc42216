//! Pass 4: sentence letters.

use super::{cursor::Cursor, scripts};
use crate::{
    element::ScriptLevel,
    expression::{Expression, Symbol},
    language::{GlyphClass, Language},
};

pub(super) fn resolve_at(cursor: &mut Cursor<'_>, language: &Language) -> Option<Expression> {
    let glyph = cursor.glyph()?;
    if !language.contains(GlyphClass::SentenceLetters, glyph) {
        return None;
    }
    let sub = scripts::digit_run(cursor, ScriptLevel::Sub);
    Some(Expression::SentenceLetter(Symbol::new(glyph, sub)))
}
