//! The language catalog.
//!
//! Languages are looked up by name. The built-in catalog is created once per
//! process and shared read-only; a configuration can start from a copy of it,
//! register more languages, and then share that copy the same way.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use log::{debug, warn};
use thiserror::Error;

use crate::language::{GlyphClass, Language};

/// Errors raised while registering languages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("language `{0}` is already registered")]
    Duplicate(String),

    #[error("a language must have a name")]
    EmptyName,

    #[error("language `{name}` defines {count} bracket levels, at most 3 are supported")]
    TooManyBracketLevels { name: String, count: usize },
}

/// Names of the built-in languages.
pub mod names {
    pub const SENTENTIAL: &str = "Sentential";
    pub const LQ: &str = "Lq";
    pub const LQ_ABBREVIATED: &str = "Lq Abbreviated";
    pub const LQ_MONADIC: &str = "Lq Monadic";
    pub const LNT: &str = "LNT";
    pub const METALANGUAGE: &str = "Metalanguage";
}

/// Name-keyed registry of immutable languages.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: IndexMap<String, Arc<Language>>,
}

static BUILTIN: OnceLock<LanguageCatalog> = OnceLock::new();

impl LanguageCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared catalog of built-in languages.
    pub fn builtin() -> &'static LanguageCatalog {
        BUILTIN.get_or_init(|| {
            let mut catalog = LanguageCatalog::new();
            for language in builtin_languages() {
                if let Err(err) = catalog.register(language) {
                    warn!(err:%; "Built-in language rejected");
                }
            }
            debug!(languages = catalog.len(); "Built-in language catalog initialized");
            catalog
        })
    }

    /// An owned copy of the built-in catalog that accepts more languages.
    pub fn with_builtin() -> Self {
        Self::builtin().clone()
    }

    /// Registers a language under its name.
    ///
    /// # Errors
    ///
    /// Fails on an empty or already registered name, or more than three
    /// bracket levels.
    pub fn register(&mut self, language: Language) -> Result<Arc<Language>, CatalogError> {
        let name = language.name().to_string();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if language.brackets().len() > 3 {
            return Err(CatalogError::TooManyBracketLevels {
                name,
                count: language.brackets().len(),
            });
        }
        if self.languages.contains_key(&name) {
            return Err(CatalogError::Duplicate(name));
        }

        let language = Arc::new(language);
        self.languages.insert(name, Arc::clone(&language));
        Ok(language)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Language>> {
        self.languages.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

const BRACKETS: [(&str, &str); 3] = [("(", ")"), ("[", "]"), ("{", "}")];
const CAPITALS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const VARIABLES: &str = "ijklmnopqrstuvwxyz";
const CONSTANTS: &str = "abcdefgh";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

fn builtin_languages() -> Vec<Language> {
    let sentential = Language::builder(names::SENTENTIAL)
        .brackets(&BRACKETS)
        .glyphs(GlyphClass::Negation, ["~"])
        .glyphs(GlyphClass::Conditional, ["→"])
        .glyphs(GlyphClass::Biconditional, ["↔"])
        .glyphs(GlyphClass::Conjunction, ["∧"])
        .glyphs(GlyphClass::Disjunction, ["∨"])
        .glyphs(GlyphClass::Contradiction, ["⊥"])
        .glyph_chars(GlyphClass::SentenceLetters, CAPITALS)
        .build();

    let lq = Language::builder(names::LQ)
        .brackets(&BRACKETS)
        .glyphs(GlyphClass::Negation, ["~"])
        .glyphs(GlyphClass::Conditional, ["→"])
        .glyphs(GlyphClass::UniversalQuantifier, ["∀"])
        .glyphs(GlyphClass::Contradiction, ["⊥"])
        .glyph_chars(GlyphClass::XRelations, CAPITALS)
        .glyph_chars(GlyphClass::SentenceLetters, CAPITALS)
        .glyph_chars(GlyphClass::Variables, VARIABLES)
        .glyph_chars(GlyphClass::Constants, CONSTANTS)
        .glyph_chars(GlyphClass::FunctionSymbols, LOWERCASE)
        .x_relation_subscripts_allowed(true)
        .build();

    let lq_abbreviated = lq
        .extend(names::LQ_ABBREVIATED)
        .glyphs(GlyphClass::Biconditional, ["↔"])
        .glyphs(GlyphClass::Conjunction, ["∧"])
        .glyphs(GlyphClass::Disjunction, ["∨"])
        .glyphs(GlyphClass::ExistentialQuantifier, ["∃"])
        .infix_relation("=", "≠")
        .allow_binary_infix_relations(true)
        .allow_binary_infix_negations(true)
        .build();

    let lq_monadic = Language::builder(names::LQ_MONADIC)
        .brackets(&BRACKETS)
        .glyphs(GlyphClass::Negation, ["~"])
        .glyphs(GlyphClass::Conditional, ["→"])
        .glyphs(GlyphClass::Biconditional, ["↔"])
        .glyphs(GlyphClass::Conjunction, ["∧"])
        .glyphs(GlyphClass::Disjunction, ["∨"])
        .glyphs(GlyphClass::UniversalQuantifier, ["∀"])
        .glyphs(GlyphClass::ExistentialQuantifier, ["∃"])
        .glyph_chars(GlyphClass::OnePlaceRelations, "FGHKLM")
        .glyph_chars(GlyphClass::Variables, "xyzw")
        .glyph_chars(GlyphClass::Constants, "abcd")
        .build();

    let lnt = Language::builder(names::LNT)
        .brackets(&BRACKETS)
        .glyphs(GlyphClass::Negation, ["~"])
        .glyphs(GlyphClass::Conditional, ["→"])
        .glyphs(GlyphClass::Biconditional, ["↔"])
        .glyphs(GlyphClass::Conjunction, ["∧"])
        .glyphs(GlyphClass::Disjunction, ["∨"])
        .glyphs(GlyphClass::UniversalQuantifier, ["∀"])
        .glyphs(GlyphClass::ExistentialQuantifier, ["∃"])
        .glyphs(GlyphClass::Contradiction, ["⊥"])
        .glyphs(GlyphClass::Constants, ["0", "∅"])
        .glyph_chars(GlyphClass::Variables, VARIABLES)
        .function_arity("S", 1)
        .function_arity("+", 2)
        .function_arity("×", 2)
        .infix_relation("=", "≠")
        .infix_relation("<", "≮")
        .allow_binary_infix_relations(true)
        .allow_binary_infix_negations(true)
        .build();

    let metalanguage = lq_abbreviated
        .extend(names::METALANGUAGE)
        .glyphs(GlyphClass::FormulaPlaceholders, ["𝒜", "ℬ", "𝒞", "𝒫", "𝒬", "ℛ", "𝒮"])
        .glyphs(GlyphClass::PseudoFormulaPlaceholders, ["ℱ", "𝒢", "ℋ"])
        .glyphs(GlyphClass::TermPlaceholders, ["𝓈", "𝓉", "𝓊"])
        .metalanguage(true)
        .build();

    vec![sentential, lq, lq_abbreviated, lq_monadic, lnt, metalanguage]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let catalog = LanguageCatalog::builtin();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(
            names,
            vec![
                names::SENTENTIAL,
                names::LQ,
                names::LQ_ABBREVIATED,
                names::LQ_MONADIC,
                names::LNT,
                names::METALANGUAGE
            ]
        );
    }

    #[test]
    fn test_every_builtin_language_registers() {
        let mut catalog = LanguageCatalog::new();
        for language in builtin_languages() {
            let name = language.name().to_string();
            assert!(catalog.register(language).is_ok(), "{name} was rejected");
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = LanguageCatalog::builtin().get(names::LQ).unwrap();
        let b = LanguageCatalog::builtin().get(names::LQ).unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_metalanguage_flags() {
        let meta = LanguageCatalog::builtin()
            .get(names::METALANGUAGE)
            .unwrap();
        assert!(meta.is_metalanguage());
        assert!(meta.contains(GlyphClass::PseudoFormulaPlaceholders, "ℱ"));
        assert_eq!(meta.complement_of("="), Some("≠"));
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let mut catalog = LanguageCatalog::with_builtin();
        let err = catalog
            .register(Language::builder(names::LNT).build())
            .unwrap_err();
        assert_eq!(err, CatalogError::Duplicate(names::LNT.to_string()));
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let mut catalog = LanguageCatalog::new();
        assert_eq!(
            catalog.register(Language::default()).unwrap_err(),
            CatalogError::EmptyName
        );
    }

    #[test]
    fn test_register_rejects_fourth_bracket_level() {
        let mut catalog = LanguageCatalog::new();
        let language = Language::builder("Angles")
            .brackets(&[("(", ")"), ("[", "]"), ("{", "}"), ("⟨", "⟩")])
            .build();
        assert!(matches!(
            catalog.register(language),
            Err(CatalogError::TooManyBracketLevels { count: 4, .. })
        ));
    }

    #[test]
    fn test_with_builtin_does_not_touch_shared_catalog() {
        let mut catalog = LanguageCatalog::with_builtin();
        catalog
            .register(Language::builder("Course 101").build())
            .unwrap();
        assert!(catalog.get("Course 101").is_some());
        assert!(LanguageCatalog::builtin().get("Course 101").is_none());
    }
}
