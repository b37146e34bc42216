//! Pass 3: relation symbols.
//!
//! Three glyph sources are consulted: the one-place relation set, the infix
//! relation map (affirmative glyphs and their negation complements), and the
//! n-place ("x") relation set whose arity is always written as a superscript.

use super::{
    cursor::Cursor,
    scripts::{self, Scripts, parse_arity},
};
use crate::{
    expression::{ComplementOf, Expression, RelationKind, RelationSymbol},
    language::{GlyphClass, Language},
};

/// Arity of infix relations written without a superscript.
const INFIX_ARITY: u32 = 2;

pub(super) fn resolve_at(cursor: &mut Cursor<'_>, language: &Language) -> Option<Expression> {
    let glyph = cursor.glyph()?;

    if language.contains(GlyphClass::OnePlaceRelations, glyph) {
        let absorbed = scripts::absorb(cursor, true, true);
        let arity = arity_or(&absorbed, 1)?;
        return Some(relation(glyph, absorbed, arity, false, None));
    }

    if language.is_infix_relation(glyph) {
        let absorbed = scripts::absorb(cursor, true, true);
        let arity = arity_or(&absorbed, INFIX_ARITY)?;
        let infix = language.allow_binary_infix_relations();
        return Some(relation(glyph, absorbed, arity, infix, None));
    }

    if let Some(affirmative) = language.affirmative_of(glyph) {
        if !language.allow_binary_infix_negations() {
            return None;
        }
        let absorbed = scripts::absorb(cursor, true, true);
        let arity = arity_or(&absorbed, INFIX_ARITY)?;
        // The complement takes over the affirmative's infix permission.
        let infix = language.allow_binary_infix_relations();
        let complement = ComplementOf {
            name: affirmative.to_string(),
            arity,
        };
        return Some(relation(glyph, absorbed, arity, infix, Some(complement)));
    }

    if language.contains(GlyphClass::XRelations, glyph) {
        let absorbed = scripts::absorb(cursor, language.x_relation_subscripts_allowed(), true);
        let arity = parse_arity(absorbed.sup.as_deref()?)?;
        return Some(relation(glyph, absorbed, arity, false, None));
    }

    None
}

fn arity_or(absorbed: &Scripts, default: u32) -> Option<u32> {
    match absorbed.sup.as_deref() {
        Some(digits) => parse_arity(digits),
        None => Some(default),
    }
}

fn relation(
    glyph: &str,
    absorbed: Scripts,
    arity: u32,
    infix_permitted: bool,
    complement: Option<ComplementOf>,
) -> Expression {
    let kind = if complement.is_some() {
        RelationKind::Complement
    } else {
        RelationKind::Affirmative
    };
    Expression::RelationSymbol(RelationSymbol {
        name: glyph.to_string(),
        sub: absorbed.sub,
        sup: absorbed.sup,
        arity,
        infix_permitted,
        kind,
        complement,
    })
}
