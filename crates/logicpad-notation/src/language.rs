//! Notation languages.
//!
//! A [`Language`] says which glyphs count as brackets, connectives,
//! quantifiers and the various symbol classes of one notational variant, and
//! carries the flags that tune relation-symbol resolution. Languages are
//! plain values: built once (in code with [`LanguageBuilder`], or from TOML),
//! registered in a [`crate::catalog::LanguageCatalog`], and never changed
//! afterwards.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::expression::{BracketLevel, Expression};

/// Glyph classes a language can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphClass {
    Negation,
    Conditional,
    Biconditional,
    Conjunction,
    Disjunction,
    Nand,
    Nor,
    UniversalQuantifier,
    ExistentialQuantifier,
    Contradiction,
    /// Relation symbols that are one-place unless a superscript says otherwise.
    OnePlaceRelations,
    /// Relation symbols whose arity is always given by a superscript.
    XRelations,
    SentenceLetters,
    Variables,
    Constants,
    /// Function symbols; arity by superscript or the fixed arity table.
    FunctionSymbols,
    TermPlaceholders,
    FormulaPlaceholders,
    /// Placeholders the exercise author declares variable-free.
    PseudoFormulaPlaceholders,
}

impl GlyphClass {
    /// Classes resolved by the single-glyph pass, with the symbol they produce.
    const SIMPLE: [(GlyphClass, Expression); 10] = [
        (GlyphClass::Negation, Expression::Negation),
        (GlyphClass::Conditional, Expression::Conditional),
        (GlyphClass::Biconditional, Expression::Biconditional),
        (GlyphClass::Conjunction, Expression::Conjunction),
        (GlyphClass::Disjunction, Expression::Disjunction),
        (GlyphClass::Nand, Expression::Nand),
        (GlyphClass::Nor, Expression::Nor),
        (GlyphClass::UniversalQuantifier, Expression::UniversalQuantifier),
        (GlyphClass::ExistentialQuantifier, Expression::ExistentialQuantifier),
        (GlyphClass::Contradiction, Expression::ContradictionSymbol),
    ];
}

/// Open and close glyphs of one bracket level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPair {
    pub open: String,
    pub close: String,
}

/// A named notation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    name: String,
    /// Bracket pairs in level order; at most three.
    brackets: Vec<BracketPair>,
    glyphs: IndexMap<GlyphClass, IndexSet<String>>,
    /// Infix relation glyph mapped to the glyph of its negation complement.
    infix_relations: IndexMap<String, String>,
    /// Function symbols written without a superscript, with their arity.
    function_arities: IndexMap<String, u32>,
    allow_binary_infix_relations: bool,
    allow_binary_infix_negations: bool,
    x_relation_subscripts_allowed: bool,
    is_metalanguage: bool,
}

impl Language {
    /// Starts a new language definition.
    pub fn builder(name: impl Into<String>) -> LanguageBuilder {
        LanguageBuilder {
            language: Language {
                name: name.into(),
                ..Language::default()
            },
        }
    }

    /// Starts a new language that copies every setting of this one.
    pub fn extend(&self, name: impl Into<String>) -> LanguageBuilder {
        LanguageBuilder {
            language: Language {
                name: name.into(),
                ..self.clone()
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[BracketPair] {
        &self.brackets
    }

    pub fn allow_binary_infix_relations(&self) -> bool {
        self.allow_binary_infix_relations
    }

    pub fn allow_binary_infix_negations(&self) -> bool {
        self.allow_binary_infix_negations
    }

    pub fn x_relation_subscripts_allowed(&self) -> bool {
        self.x_relation_subscripts_allowed
    }

    pub fn is_metalanguage(&self) -> bool {
        self.is_metalanguage
    }

    /// Returns the glyphs registered for a class, in registration order.
    pub fn glyphs(&self, class: GlyphClass) -> impl Iterator<Item = &str> {
        self.glyphs
            .get(&class)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn contains(&self, class: GlyphClass, glyph: &str) -> bool {
        self.glyphs
            .get(&class)
            .is_some_and(|set| set.contains(glyph))
    }

    /// The glyph this language writes for a bracket or single-glyph symbol:
    /// the first one registered for its class.
    pub fn glyph_for(&self, expr: &Expression) -> Option<&str> {
        let pair = |level: BracketLevel| self.brackets.get(usize::from(level.level()) - 1);
        match expr {
            Expression::OpenBracket(level) => pair(*level).map(|p| p.open.as_str()),
            Expression::CloseBracket(level) => pair(*level).map(|p| p.close.as_str()),
            _ => {
                let class = GlyphClass::SIMPLE
                    .iter()
                    .find(|(_, simple)| simple == expr)
                    .map(|(class, _)| *class)?;
                self.glyphs(class).next()
            }
        }
    }

    /// Matches a single glyph against brackets, connectives, quantifiers and
    /// the contradiction symbol.
    pub fn simple_symbol(&self, glyph: &str) -> Option<Expression> {
        for (pair, level) in self.brackets.iter().zip(BracketLevel::ALL) {
            if pair.open == glyph {
                return Some(Expression::OpenBracket(level));
            }
            if pair.close == glyph {
                return Some(Expression::CloseBracket(level));
            }
        }

        GlyphClass::SIMPLE
            .iter()
            .find(|(class, _)| self.contains(*class, glyph))
            .map(|(_, expression)| expression.clone())
    }

    /// Returns `true` if the glyph is an affirmative infix relation.
    pub fn is_infix_relation(&self, glyph: &str) -> bool {
        self.infix_relations.contains_key(glyph)
    }

    /// Complement glyph registered for an affirmative infix relation.
    pub fn complement_of(&self, affirmative: &str) -> Option<&str> {
        self.infix_relations.get(affirmative).map(String::as_str)
    }

    /// Affirmative infix relation a complement glyph negates.
    pub fn affirmative_of(&self, complement: &str) -> Option<&str> {
        self.infix_relations
            .iter()
            .find(|(_, c)| c.as_str() == complement)
            .map(|(affirmative, _)| affirmative.as_str())
    }

    pub fn infix_relations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.infix_relations
            .iter()
            .map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Fixed arity of a function symbol written without a superscript.
    pub fn function_arity(&self, glyph: &str) -> Option<u32> {
        self.function_arities.get(glyph).copied()
    }
}

/// Builder for [`Language`] values.
///
/// # Examples
///
/// ```
/// # use logicpad_notation::language::{GlyphClass, Language};
/// # use logicpad_notation::expression::Expression;
/// let language = Language::builder("Tiny")
///     .brackets(&[("(", ")")])
///     .glyphs(GlyphClass::Negation, ["~", "¬"])
///     .glyphs(GlyphClass::SentenceLetters, ["A", "B"])
///     .build();
///
/// assert_eq!(language.simple_symbol("¬"), Some(Expression::Negation));
/// assert!(language.contains(GlyphClass::SentenceLetters, "B"));
/// ```
#[derive(Debug, Clone)]
pub struct LanguageBuilder {
    language: Language,
}

impl LanguageBuilder {
    /// Replaces the bracket pairs, given in level order.
    pub fn brackets(mut self, pairs: &[(&str, &str)]) -> Self {
        self.language.brackets = pairs
            .iter()
            .map(|(open, close)| BracketPair {
                open: (*open).to_string(),
                close: (*close).to_string(),
            })
            .collect();
        self
    }

    /// Adds glyphs to a class.
    pub fn glyphs<I, S>(mut self, class: GlyphClass, glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language
            .glyphs
            .entry(class)
            .or_default()
            .extend(glyphs.into_iter().map(Into::into));
        self
    }

    /// Adds one glyph per character of `chars`, e.g. `"ABC"`.
    pub fn glyph_chars(self, class: GlyphClass, chars: &str) -> Self {
        self.glyphs(class, chars.chars().map(String::from))
    }

    /// Removes every glyph of a class.
    pub fn clear(mut self, class: GlyphClass) -> Self {
        self.language.glyphs.shift_remove(&class);
        self
    }

    /// Registers an infix relation and the glyph of its negation complement.
    pub fn infix_relation(mut self, affirmative: &str, complement: &str) -> Self {
        self.language
            .infix_relations
            .insert(affirmative.to_string(), complement.to_string());
        self
    }

    /// Gives a function symbol a fixed arity so it needs no superscript.
    pub fn function_arity(mut self, glyph: &str, arity: u32) -> Self {
        self.language
            .glyphs
            .entry(GlyphClass::FunctionSymbols)
            .or_default()
            .insert(glyph.to_string());
        self.language
            .function_arities
            .insert(glyph.to_string(), arity);
        self
    }

    pub fn allow_binary_infix_relations(mut self, allow: bool) -> Self {
        self.language.allow_binary_infix_relations = allow;
        self
    }

    pub fn allow_binary_infix_negations(mut self, allow: bool) -> Self {
        self.language.allow_binary_infix_negations = allow;
        self
    }

    pub fn x_relation_subscripts_allowed(mut self, allow: bool) -> Self {
        self.language.x_relation_subscripts_allowed = allow;
        self
    }

    pub fn metalanguage(mut self, is_metalanguage: bool) -> Self {
        self.language.is_metalanguage = is_metalanguage;
        self
    }

    pub fn build(self) -> Language {
        self.language
    }
}
