//! Typed symbols produced by the resolver.
//!
//! An [`Expression`] is one symbol of a formula: a bracket, a connective, a
//! quantifier, a relation or term symbol, a sentence letter, a placeholder, or
//! an element no pass could classify. Resolution yields a flat sequence of
//! them; grouping into formulas is left to the answer checkers.

use std::fmt;

use crate::{element::RawElement, language::Language};

/// Nesting level of a bracket glyph pair, as configured by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BracketLevel {
    One,
    Two,
    Three,
}

impl BracketLevel {
    pub const ALL: [BracketLevel; 3] = [BracketLevel::One, BracketLevel::Two, BracketLevel::Three];

    /// Numeric level, 1 to 3.
    pub fn level(self) -> u8 {
        match self {
            BracketLevel::One => 1,
            BracketLevel::Two => 2,
            BracketLevel::Three => 3,
        }
    }

    fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            BracketLevel::One => ("(", ")"),
            BracketLevel::Two => ("[", "]"),
            BracketLevel::Three => ("{", "}"),
        }
    }
}

/// Name plus optional subscript digits, e.g. `A` or `x₁₂`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub sub: Option<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, sub: Option<String>) -> Self {
        Self {
            name: name.into(),
            sub,
        }
    }
}

/// Whether a relation symbol is the affirmative form or the registered
/// negation complement of an infix relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Affirmative,
    Complement,
}

impl RelationKind {
    /// Tag used by answer checkers to tell the two kinds apart.
    pub fn tag(self) -> &'static str {
        match self {
            RelationKind::Affirmative => "REL_SYM",
            RelationKind::Complement => "COMPLEMENT_REL_SYM",
        }
    }
}

/// Identity of the affirmative relation a complement glyph negates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplementOf {
    pub name: String,
    pub arity: u32,
}

/// A relation symbol with its arity and infix behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationSymbol {
    pub name: String,
    pub sub: Option<String>,
    pub sup: Option<String>,
    pub arity: u32,
    pub infix_permitted: bool,
    pub kind: RelationKind,
    pub complement: Option<ComplementOf>,
}

/// A function symbol; arity comes from a superscript or the language's fixed table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSymbol {
    pub name: String,
    pub sub: Option<String>,
    pub arity: u32,
}

/// How much is known about a symbol being free of variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Groundness {
    /// The symbol cannot contain variables.
    Ground,
    /// The exercise author declares it variable-free; nothing checks that.
    AssertedByConvention,
    /// Nothing is known, or the notion does not apply.
    Unknown,
}

/// A typed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    OpenBracket(BracketLevel),
    CloseBracket(BracketLevel),
    Negation,
    Conditional,
    Biconditional,
    Conjunction,
    Disjunction,
    Nand,
    Nor,
    UniversalQuantifier,
    ExistentialQuantifier,
    ContradictionSymbol,
    RelationSymbol(RelationSymbol),
    SentenceLetter(Symbol),
    FormulaPlaceholder(Symbol),
    PseudoFormulaPlaceholder(Symbol),
    Variable(Symbol),
    Constant(Symbol),
    FunctionSymbol(FunctionSymbol),
    TermPlaceholder(Symbol),
    Unresolved(RawElement),
}

impl Expression {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Expression::Unresolved(_))
    }

    pub fn is_bracket(&self) -> bool {
        matches!(
            self,
            Expression::OpenBracket(_) | Expression::CloseBracket(_)
        )
    }

    /// Unary and binary sentential operators.
    pub fn is_connective(&self) -> bool {
        matches!(
            self,
            Expression::Negation
                | Expression::Conditional
                | Expression::Biconditional
                | Expression::Conjunction
                | Expression::Disjunction
                | Expression::Nand
                | Expression::Nor
        )
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(
            self,
            Expression::UniversalQuantifier | Expression::ExistentialQuantifier
        )
    }

    /// Formula and pseudo-formula placeholders.
    pub fn is_formula_placeholder(&self) -> bool {
        matches!(
            self,
            Expression::FormulaPlaceholder(_) | Expression::PseudoFormulaPlaceholder(_)
        )
    }

    pub fn raw(&self) -> Option<&RawElement> {
        match self {
            Expression::Unresolved(raw) => Some(raw),
            _ => None,
        }
    }

    /// Renders the symbol as `language` writes it.
    ///
    /// Connectives, quantifiers and brackets take the language's glyphs; the
    /// other symbols are written as read, so this only differs from the
    /// canonical [`Display`](fmt::Display) for languages with glyphs of their
    /// own.
    pub fn written<'a>(&'a self, language: &'a Language) -> Written<'a> {
        Written {
            expr: self,
            language,
        }
    }

    /// Reports what is known about the symbol being variable-free.
    ///
    /// Pseudo-formula placeholders are only asserted variable-free by the
    /// exercise author, which is kept distinct from symbols that are ground
    /// by construction.
    pub fn groundness(&self) -> Groundness {
        match self {
            Expression::SentenceLetter(_)
            | Expression::Constant(_)
            | Expression::ContradictionSymbol => Groundness::Ground,
            Expression::PseudoFormulaPlaceholder(_) => Groundness::AssertedByConvention,
            _ => Groundness::Unknown,
        }
    }
}

/// An [`Expression`] rendered with the glyphs of one language.
#[derive(Debug, Clone, Copy)]
pub struct Written<'a> {
    expr: &'a Expression,
    language: &'a Language,
}

impl fmt::Display for Written<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.language.glyph_for(self.expr) {
            Some(glyph) => f.write_str(glyph),
            None => write!(f, "{}", self.expr),
        }
    }
}

fn write_scripts(
    f: &mut fmt::Formatter<'_>,
    sup: Option<&String>,
    sub: Option<&String>,
) -> fmt::Result {
    for (marker, digits) in [('^', sup), ('_', sub)] {
        match digits {
            Some(d) if d.chars().count() == 1 => write!(f, "{marker}{d}")?,
            Some(d) => write!(f, "{marker}{{{d}}}")?,
            None => {}
        }
    }
    Ok(())
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        write_scripts(f, None, self.sub.as_ref())
    }
}

/// Canonical notation, the same whichever language the symbol was read in:
/// `~ → ↔ ∧ ∨ ↑ ↓ ∀ ∃ ⊥`, brackets `( [ {`, scripts as `^` and `_` markup.
/// Use [`Expression::written`] for the glyphs of a particular language.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::OpenBracket(level) => write!(f, "{}", level.glyphs().0),
            Expression::CloseBracket(level) => write!(f, "{}", level.glyphs().1),
            Expression::Negation => write!(f, "~"),
            Expression::Conditional => write!(f, "→"),
            Expression::Biconditional => write!(f, "↔"),
            Expression::Conjunction => write!(f, "∧"),
            Expression::Disjunction => write!(f, "∨"),
            Expression::Nand => write!(f, "↑"),
            Expression::Nor => write!(f, "↓"),
            Expression::UniversalQuantifier => write!(f, "∀"),
            Expression::ExistentialQuantifier => write!(f, "∃"),
            Expression::ContradictionSymbol => write!(f, "⊥"),
            Expression::RelationSymbol(rel) => {
                write!(f, "{}", rel.name)?;
                write_scripts(f, rel.sup.as_ref(), rel.sub.as_ref())
            }
            Expression::FunctionSymbol(func) => {
                write!(f, "{}", func.name)?;
                let arity = func.arity.to_string();
                write_scripts(f, Some(&arity), func.sub.as_ref())
            }
            Expression::SentenceLetter(sym)
            | Expression::FormulaPlaceholder(sym)
            | Expression::PseudoFormulaPlaceholder(sym)
            | Expression::Variable(sym)
            | Expression::Constant(sym)
            | Expression::TermPlaceholder(sym) => write!(f, "{sym}"),
            Expression::Unresolved(raw) => write!(f, "{}", raw.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_kind_tags() {
        assert_eq!(RelationKind::Affirmative.tag(), "REL_SYM");
        assert_eq!(RelationKind::Complement.tag(), "COMPLEMENT_REL_SYM");
    }

    #[test]
    fn test_display_scripts() {
        let rel = Expression::RelationSymbol(RelationSymbol {
            name: "R".to_string(),
            sub: Some("12".to_string()),
            sup: Some("2".to_string()),
            arity: 2,
            infix_permitted: false,
            kind: RelationKind::Affirmative,
            complement: None,
        });
        assert_eq!(rel.to_string(), "R^2_{12}");
        assert_eq!(
            Expression::Variable(Symbol::new("x", Some("1".to_string()))).to_string(),
            "x_1"
        );
        assert_eq!(Expression::OpenBracket(BracketLevel::Two).to_string(), "[");
    }

    #[test]
    fn test_written_uses_language_glyphs() {
        use crate::language::GlyphClass;

        let hilbert = Language::builder("Hilbert")
            .brackets(&[("⟨", "⟩")])
            .glyphs(GlyphClass::Negation, ["¬", "~"])
            .glyph_chars(GlyphClass::SentenceLetters, "PQ")
            .build();
        let letter = Expression::SentenceLetter(Symbol::new("P", Some("1".to_string())));

        assert_eq!(Expression::Negation.written(&hilbert).to_string(), "¬");
        assert_eq!(Expression::Negation.to_string(), "~");
        assert_eq!(
            Expression::CloseBracket(BracketLevel::One).written(&hilbert).to_string(),
            "⟩"
        );
        // Nothing registered: fall back to canonical notation.
        assert_eq!(Expression::Conditional.written(&hilbert).to_string(), "→");
        assert_eq!(
            Expression::OpenBracket(BracketLevel::Two).written(&hilbert).to_string(),
            "["
        );
        assert_eq!(letter.written(&hilbert).to_string(), "P_1");
    }

    #[test]
    fn test_groundness_keeps_convention_distinct() {
        let pseudo = Expression::PseudoFormulaPlaceholder(Symbol::new("ℱ", None));
        let letter = Expression::SentenceLetter(Symbol::new("A", None));
        let placeholder = Expression::FormulaPlaceholder(Symbol::new("𝒫", None));

        assert_eq!(pseudo.groundness(), Groundness::AssertedByConvention);
        assert_eq!(letter.groundness(), Groundness::Ground);
        assert_eq!(placeholder.groundness(), Groundness::Unknown);
    }

    #[test]
    fn test_classification_helpers() {
        assert!(Expression::Nand.is_connective());
        assert!(Expression::ExistentialQuantifier.is_quantifier());
        assert!(Expression::CloseBracket(BracketLevel::One).is_bracket());
        assert!(
            Expression::PseudoFormulaPlaceholder(Symbol::new("ℱ", None)).is_formula_placeholder()
        );
    }
}
