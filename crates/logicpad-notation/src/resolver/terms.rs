//! Pass 2: function symbols, variables, constants and term placeholders.

use super::{
    cursor::Cursor,
    scripts::{self, parse_arity},
};
use crate::{
    element::ScriptLevel,
    expression::{Expression, FunctionSymbol, Symbol},
    language::{GlyphClass, Language},
};

/// Term classes that take an optional subscript, tried in order.
const TERM_CLASSES: [(GlyphClass, fn(Symbol) -> Expression); 3] = [
    (GlyphClass::Variables, Expression::Variable),
    (GlyphClass::Constants, Expression::Constant),
    (GlyphClass::TermPlaceholders, Expression::TermPlaceholder),
];

pub(super) fn resolve_at(cursor: &mut Cursor<'_>, language: &Language) -> Option<Expression> {
    let glyph = cursor.glyph()?;

    let is_function = language.contains(GlyphClass::FunctionSymbols, glyph)
        || language.function_arity(glyph).is_some();
    if is_function {
        let after_glyph = cursor.position();
        let absorbed = scripts::absorb(cursor, true, true);
        let arity = match absorbed.sup.as_deref() {
            Some(digits) => parse_arity(digits),
            None => language.function_arity(glyph),
        };
        if let Some(arity) = arity {
            return Some(Expression::FunctionSymbol(FunctionSymbol {
                name: glyph.to_string(),
                sub: absorbed.sub,
                arity,
            }));
        }
        // No arity: the glyph may still be a variable or constant.
        cursor.rewind(after_glyph);
    }

    let (_, make) = TERM_CLASSES
        .iter()
        .find(|(class, _)| language.contains(*class, glyph))?;
    let sub = scripts::digit_run(cursor, ScriptLevel::Sub);
    Some(make(Symbol::new(glyph, sub)))
}
