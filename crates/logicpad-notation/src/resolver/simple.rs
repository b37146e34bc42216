//! Pass 1: brackets, connectives, quantifiers and the contradiction symbol.

use super::cursor::Cursor;
use crate::{expression::Expression, language::Language};

pub(super) fn resolve_at(cursor: &mut Cursor<'_>, language: &Language) -> Option<Expression> {
    let glyph = cursor.glyph()?;
    language.simple_symbol(glyph)
}
