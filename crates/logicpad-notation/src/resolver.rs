//! Symbol resolution.
//!
//! [`resolve`] turns an element stream into a flat sequence of typed
//! [`Expression`]s. Five passes run in a fixed order; each one reads the
//! previous pass's output, only looks at elements that are still
//! [`Expression::Unresolved`], and writes a fresh sequence. A pass that
//! recognizes a glyph replaces it, together with any script runs it absorbs,
//! by a single expression whose span covers all of them.
//!
//! Elements no pass recognizes stay in the output as unresolved residue.
//! Residue is not an error: callers decide what it means, and
//! [`Resolution::diagnostics`] describes it for display.

mod cursor;
mod letters;
mod placeholders;
mod relations;
mod scripts;
mod simple;
mod terms;

use log::{debug, trace};

use crate::{
    element::{RawElement, ScriptLevel},
    error::{Diagnostic, ErrorCode},
    expression::Expression,
    language::Language,
    span::Spanned,
};
use cursor::Cursor;

type PassFn = fn(&mut Cursor<'_>, &Language) -> Option<Expression>;

const PASSES: [(&str, PassFn); 5] = [
    ("simple symbols", simple::resolve_at),
    ("term symbols", terms::resolve_at),
    ("relation symbols", relations::resolve_at),
    ("sentence letters", letters::resolve_at),
    ("placeholders", placeholders::resolve_at),
];

/// The typed output of one [`resolve`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    expressions: Vec<Spanned<Expression>>,
}

impl Resolution {
    /// All expressions in document order, residue included.
    pub fn expressions(&self) -> &[Spanned<Expression>] {
        &self.expressions
    }

    pub fn into_expressions(self) -> Vec<Spanned<Expression>> {
        self.expressions
    }

    /// Elements no pass recognized.
    pub fn residue(&self) -> impl Iterator<Item = &RawElement> {
        self.expressions.iter().filter_map(|item| item.raw())
    }

    /// Whether every element was recognized.
    pub fn is_complete(&self) -> bool {
        self.residue().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// One warning per unresolved element.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut previous: Option<&Spanned<Expression>> = None;
        for item in &self.expressions {
            if let Some(raw) = item.raw() {
                diagnostics.push(residue_diagnostic(raw, item, previous));
            }
            previous = Some(item);
        }
        diagnostics
    }
}

fn residue_diagnostic(
    raw: &RawElement,
    item: &Spanned<Expression>,
    previous: Option<&Spanned<Expression>>,
) -> Diagnostic {
    if raw.script() == ScriptLevel::Normal || !raw.is_digits() {
        return Diagnostic::new(
            ErrorCode::E001,
            format!("unrecognized symbol `{}`", raw.text()),
        )
        .at(item.span(), "not a symbol of the active language");
    }

    let mut diagnostic = Diagnostic::new(
        ErrorCode::E002,
        format!("{} `{}` is not attached to a symbol", raw.script(), raw.text()),
    )
    .at(item.span(), "no preceding symbol takes this script")
    .with_help("remove the script or attach it to a relation, function or letter");
    // Point at the symbol the script follows when that symbol did resolve.
    if let Some(previous) = previous.filter(|previous| previous.raw().is_none()) {
        diagnostic = diagnostic.near(
            previous.span(),
            format!("`{}` takes no {}", previous.inner(), raw.script()),
        );
    }
    diagnostic
}

/// Resolves an element stream against a language.
///
/// # Example
///
/// ```
/// # use logicpad_notation::{element::parse_markup, catalog::{names, LanguageCatalog}};
/// # use logicpad_notation::expression::Expression;
/// let lq = LanguageCatalog::builtin().get(names::LQ).unwrap();
/// let resolution = logicpad_notation::resolve(parse_markup("∀x~F^2xa"), lq);
///
/// assert!(resolution.is_complete());
/// assert!(matches!(
///     resolution.expressions()[0].inner(),
///     Expression::UniversalQuantifier
/// ));
/// ```
pub fn resolve(elements: Vec<RawElement>, language: &Language) -> Resolution {
    debug!(language = language.name(), elements = elements.len(); "Resolving element stream");

    let mut items: Vec<Spanned<Expression>> = elements
        .into_iter()
        .map(|element| {
            let span = element.span();
            Spanned::new(Expression::Unresolved(element), span)
        })
        .collect();

    for (name, pass) in PASSES {
        items = run_pass(&items, language, pass);
        debug!(
            pass = name,
            unresolved = items.iter().filter(|item| item.is_unresolved()).count();
            "Resolver pass finished"
        );
    }
    trace!(items:?; "Resolved expressions");

    Resolution { expressions: items }
}

fn run_pass(
    input: &[Spanned<Expression>],
    language: &Language,
    pass: PassFn,
) -> Vec<Spanned<Expression>> {
    let mut output = Vec::with_capacity(input.len());
    let mut cursor = Cursor::new(input);

    while let Some(item) = cursor.peek() {
        let start = cursor.position();
        if item.is_unresolved() {
            if let Some(expression) = pass(&mut cursor, language) {
                output.push(Spanned::new(expression, cursor.span_since(start)));
                continue;
            }
            cursor.rewind(start);
        }
        output.push(item.clone());
        cursor.bump();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{LanguageCatalog, names},
        element::parse_markup,
        expression::{BracketLevel, ComplementOf, RelationKind, RelationSymbol, Symbol},
        language::GlyphClass,
        span::Span,
    };

    fn builtin(name: &str) -> &'static Language {
        LanguageCatalog::builtin()
            .get(name)
            .map(|l| l.as_ref())
            .expect("built-in language")
    }

    fn resolved(markup: &str, language: &Language) -> Vec<Expression> {
        resolve(parse_markup(markup), language)
            .into_expressions()
            .into_iter()
            .map(Spanned::into_inner)
            .collect()
    }

    fn seed_language() -> Language {
        Language::builder("Seed")
            .glyphs(GlyphClass::Negation, ["~"])
            .glyphs(GlyphClass::OnePlaceRelations, ["F"])
            .glyph_chars(GlyphClass::Constants, "a")
            .build()
    }

    #[test]
    fn test_simple_symbols() {
        let exprs = resolved("~(A→[B↔C])", builtin(names::SENTENTIAL));
        assert_eq!(exprs[0], Expression::Negation);
        assert_eq!(exprs[1], Expression::OpenBracket(BracketLevel::One));
        assert_eq!(exprs[3], Expression::Conditional);
        assert_eq!(exprs[4], Expression::OpenBracket(BracketLevel::Two));
        assert_eq!(exprs[6], Expression::Biconditional);
        assert_eq!(exprs[8], Expression::CloseBracket(BracketLevel::Two));
        assert_eq!(exprs[9], Expression::CloseBracket(BracketLevel::One));
    }

    #[test]
    fn test_seed_formula() {
        let exprs = resolved("~Fa", &seed_language());
        assert_eq!(
            exprs,
            vec![
                Expression::Negation,
                Expression::RelationSymbol(RelationSymbol {
                    name: "F".into(),
                    sub: None,
                    sup: None,
                    arity: 1,
                    infix_permitted: false,
                    kind: RelationKind::Affirmative,
                    complement: None,
                }),
                Expression::Constant(Symbol::new("a", None)),
            ]
        );
    }

    #[test]
    fn test_x_relation_absorbs_scripts_in_either_order() {
        let lq = builtin(names::LQ);
        let sup_first = resolve(parse_markup("R^2_1"), lq);
        let sub_first = resolve(parse_markup("R_1^2"), lq);

        assert_eq!(sup_first.len(), 1);
        assert_eq!(sup_first, sub_first);
        match sup_first.expressions()[0].inner() {
            Expression::RelationSymbol(rel) => {
                assert_eq!(rel.arity, 2);
                assert_eq!(rel.sub.as_deref(), Some("1"));
            }
            other => panic!("expected relation, got {other:?}"),
        }
        assert_eq!(sup_first.expressions()[0].span().range(), 0..5);
    }

    #[test]
    fn test_bare_capital_is_sentence_letter_in_lq() {
        let exprs = resolved("P_3", builtin(names::LQ));
        assert_eq!(
            exprs,
            vec![Expression::SentenceLetter(Symbol::new("P", Some("3".into())))]
        );
    }

    #[test]
    fn test_x_relation_subscript_disallowed() {
        let language = builtin(names::LQ)
            .extend("Lq strict")
            .x_relation_subscripts_allowed(false)
            .build();
        let resolution = resolve(parse_markup("R_1^2"), &language);

        // The subscript blocks the superscript, so R falls back to a letter.
        let exprs: Vec<_> = resolution.expressions().iter().map(|e| e.inner()).collect();
        assert_eq!(
            exprs[0],
            &Expression::SentenceLetter(Symbol::new("R", Some("1".into())))
        );
        assert!(!resolution.is_complete());
        assert_eq!(resolution.residue().count(), 1);
    }

    #[test]
    fn test_complement_linkage() {
        let language = builtin(names::LQ_ABBREVIATED);
        let exprs = resolved("a≠b", language);
        match &exprs[1] {
            Expression::RelationSymbol(rel) => {
                assert_eq!(rel.name, "≠");
                assert_eq!(rel.kind, RelationKind::Complement);
                assert_eq!(rel.kind.tag(), "COMPLEMENT_REL_SYM");
                assert_eq!(
                    rel.complement,
                    Some(ComplementOf {
                        name: "=".into(),
                        arity: 2
                    })
                );
                assert_eq!(rel.infix_permitted, language.allow_binary_infix_relations());
            }
            other => panic!("expected relation, got {other:?}"),
        }
    }

    #[test]
    fn test_complement_needs_negation_flag() {
        let language = builtin(names::LQ_ABBREVIATED)
            .extend("No infix negation")
            .allow_binary_infix_negations(false)
            .build();
        let resolution = resolve(parse_markup("a≠b"), &language);
        assert!(resolution.expressions()[1].is_unresolved());
    }

    #[test]
    fn test_function_symbols_and_terms() {
        let lnt = builtin(names::LNT);
        let exprs = resolved("S0+x_2", lnt);
        assert!(matches!(&exprs[0], Expression::FunctionSymbol(f) if f.arity == 1));
        assert_eq!(exprs[1], Expression::Constant(Symbol::new("0", None)));
        assert!(matches!(&exprs[2], Expression::FunctionSymbol(f) if f.arity == 2));
        assert_eq!(
            exprs[3],
            Expression::Variable(Symbol::new("x", Some("2".into())))
        );

        // In Lq a lower-case letter without arity stays a term.
        let lq = builtin(names::LQ);
        assert_eq!(resolved("a", lq), vec![Expression::Constant(Symbol::new("a", None))]);
        assert!(matches!(
            &resolved("f^2", lq)[0],
            Expression::FunctionSymbol(f) if f.arity == 2
        ));
    }

    #[test]
    fn test_placeholders() {
        let meta = builtin(names::METALANGUAGE);
        let exprs = resolved("𝒜_1→ℱ", meta);
        assert_eq!(
            exprs,
            vec![
                Expression::FormulaPlaceholder(Symbol::new("𝒜", Some("1".into()))),
                Expression::Conditional,
                Expression::PseudoFormulaPlaceholder(Symbol::new("ℱ", None)),
            ]
        );
    }

    #[test]
    fn test_residue_diagnostics() {
        let resolution = resolve(parse_markup("A$^7"), builtin(names::SENTENTIAL));
        assert!(!resolution.is_complete());

        let diags = resolution.diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code(), ErrorCode::E001);
        assert_eq!(diags[0].message(), "unrecognized symbol `$`");
        assert_eq!(diags[1].code(), ErrorCode::E002);
        assert_eq!(diags[1].message(), "superscript `7` is not attached to a symbol");
        // `$` did not resolve, so there is nothing to point back at.
        assert_eq!(diags[1].labels().len(), 1);
    }

    #[test]
    fn test_stray_script_points_at_preceding_symbol() {
        let resolution = resolve(parse_markup("~_1A"), builtin(names::SENTENTIAL));
        let diags = resolution.diagnostics();

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), ErrorCode::E002);
        let labels = diags[0].labels();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].is_primary());
        assert_eq!(labels[0].span(), Span::new(2..3));
        assert!(!labels[1].is_primary());
        assert_eq!(labels[1].span(), Span::new(0..1));
        assert_eq!(labels[1].message(), "`~` takes no subscript");
    }

    #[test]
    fn test_empty_stream() {
        let resolution = resolve(Vec::new(), builtin(names::LQ));
        assert!(resolution.is_empty());
        assert!(resolution.is_complete());
        assert!(resolution.diagnostics().is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn element_strategy() -> impl Strategy<Value = RawElement> {
            let glyph = prop::sample::select(vec![
                "~", "→", "∀", "∃", "(", ")", "[", "]", "F", "R", "P", "x", "a", "f", "=", "≠",
                "$", "ℱ", "𝒜",
            ]);
            let level = prop::sample::select(vec![
                ScriptLevel::Normal,
                ScriptLevel::Sub,
                ScriptLevel::Super,
            ]);
            let text = prop_oneof![glyph.prop_map(String::from), "[0-9]{1,2}"];
            (text, level).prop_map(|(text, level)| RawElement::new(text, 0, level))
        }

        fn stream_strategy() -> impl Strategy<Value = Vec<RawElement>> {
            prop::collection::vec(element_strategy(), 0..24).prop_map(|mut elements| {
                let mut position = 0;
                for element in &mut elements {
                    *element = RawElement::new(element.text(), position, element.script());
                    position += element.text().len();
                }
                elements
            })
        }

        fn check_idempotent(elements: Vec<RawElement>) -> Result<(), TestCaseError> {
            for name in [names::LQ, names::LQ_ABBREVIATED, names::METALANGUAGE] {
                let language = builtin(name);
                let first = resolve(elements.clone(), language);
                let second = resolve(elements.clone(), language);
                prop_assert_eq!(first, second);
            }
            Ok(())
        }

        fn check_resolution_is_stable(elements: Vec<RawElement>) -> Result<(), TestCaseError> {
            // Re-resolving the residue changes nothing: passes only shrink it.
            let language = builtin(names::METALANGUAGE);
            let resolution = resolve(elements, language);
            let residue: Vec<RawElement> = resolution.residue().cloned().collect();
            let before = residue.len();
            let again = resolve(residue, language);
            prop_assert!(again.residue().count() <= before);
            Ok(())
        }

        fn check_spans_are_ordered(elements: Vec<RawElement>) -> Result<(), TestCaseError> {
            let count = elements.len();
            let resolution = resolve(elements, builtin(names::LQ_ABBREVIATED));
            prop_assert!(resolution.len() <= count);
            for pair in resolution.expressions().windows(2) {
                prop_assert!(pair[0].span().end() <= pair[1].span().start());
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn resolve_is_idempotent(elements in stream_strategy()) {
                check_idempotent(elements)?;
            }

            #[test]
            fn residue_does_not_grow(elements in stream_strategy()) {
                check_resolution_is_stable(elements)?;
            }

            #[test]
            fn spans_follow_document_order(elements in stream_strategy()) {
                check_spans_are_ordered(elements)?;
            }
        }
    }
}
