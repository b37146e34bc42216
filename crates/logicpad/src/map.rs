//! Correspondence-map validation.
//!
//! A map exercise shows an upper expression (usually a metalanguage form
//! such as `𝒜 → ℬ`) above a lower object-language expression. The student
//! draws links from each upper symbol to the lower sub-expression it stands
//! for, or, when the exercise says no correct map exists, leaves the links
//! out and places question markers where the correspondence breaks.
//!
//! Both expressions are read with the symbol resolver; anchors index the
//! resolved expressions.

mod anchor;

pub use anchor::{Anchor, CaretMarking};

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use logicpad_core::identifier::Id;
use logicpad_notation::{
    element::RawElement, expression::Expression, language::Language, resolve,
};

use crate::result::{ValidationResult, Violation};
use anchor::TierView;

/// The two expressions of a map exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Upper,
    Lower,
}

/// A link from an upper sub-expression to a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    pub id: Id,
    pub upper: Anchor,
    pub lower: Anchor,
}

impl MapLink {
    pub fn new(id: impl Into<Id>, upper: Anchor, lower: Anchor) -> Self {
        Self {
            id: id.into(),
            upper,
            lower,
        }
    }
}

/// A question marker placed on one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMarker {
    pub id: Id,
    pub tier: Tier,
    pub anchor: Anchor,
}

impl QuestionMarker {
    pub fn new(id: impl Into<Id>, tier: Tier, anchor: Anchor) -> Self {
        Self {
            id: id.into(),
            tier,
            anchor,
        }
    }
}

/// A map exercise together with the student's links and markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExercise {
    pub upper: Vec<RawElement>,
    pub lower: Vec<RawElement>,
    pub upper_language: String,
    pub lower_language: String,
    #[serde(default)]
    pub links: Vec<MapLink>,
    #[serde(default)]
    pub markers: Vec<QuestionMarker>,
    /// The exercise has no correct map.
    #[serde(default)]
    pub no_map_exists: bool,
}

/// Checks map exercises.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapValidator;

impl MapValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates an exercise, reading each tier with its language.
    pub fn check(
        &self,
        exercise: &MapExercise,
        upper_language: &Language,
        lower_language: &Language,
    ) -> ValidationResult {
        info!(
            links = exercise.links.len(),
            markers = exercise.markers.len(),
            no_map_exists = exercise.no_map_exists;
            "Checking map"
        );
        match evaluate(exercise, upper_language, lower_language) {
            Ok(()) => {
                info!("Map is correct");
                ValidationResult::passed()
            }
            Err(result) => {
                info!(violation:? = result.violation(); "Map rejected");
                result
            }
        }
    }
}

fn evaluate(
    exercise: &MapExercise,
    upper_language: &Language,
    lower_language: &Language,
) -> Result<(), ValidationResult> {
    let upper = resolve_tier(&exercise.upper, upper_language, Tier::Upper)?;
    let lower = resolve_tier(&exercise.lower, lower_language, Tier::Lower)?;

    check_anchors(exercise, &upper, &lower)?;

    if exercise.no_map_exists {
        if !exercise.links.is_empty() {
            return Err(ValidationResult::failed(
                Violation::MapWhereNoneExists,
                exercise.links.iter().map(|link| link.id),
            ));
        }
        if exercise.markers.is_empty() {
            return Err(ValidationResult::failed(Violation::MissingMarker, []));
        }
        return Ok(());
    }

    if exercise.links.is_empty() {
        return Err(ValidationResult::failed(Violation::MissingMap, []));
    }

    let mut links = exercise.links.clone();
    links.sort_by_key(|link| link.upper.start());

    check_upper_coverage(&links, &upper)?;
    check_order(&links)?;
    check_lower_coverage(&links, &lower)?;
    check_kinds(&links, &upper, &lower)?;
    check_placeholders(&links, &upper, &lower)
}

fn resolve_tier(
    elements: &[RawElement],
    language: &Language,
    tier: Tier,
) -> Result<TierView, ValidationResult> {
    let resolution = resolve(elements.to_vec(), language);
    if !resolution.is_complete() {
        let residue: Vec<&str> = resolution.residue().map(RawElement::text).collect();
        debug!(tier:? = tier, residue:? = residue; "Tier did not resolve");
        return Err(
            ValidationResult::failed(Violation::UnresolvedTier, []).with_help(format!(
                "the {} expression has symbols outside {}: {}",
                tier_name(tier),
                language.name(),
                residue.join(" ")
            )),
        );
    }
    let exprs = resolution
        .into_expressions()
        .into_iter()
        .map(|item| item.into_inner())
        .collect();
    Ok(TierView::new(exprs))
}

fn tier_name(tier: Tier) -> &'static str {
    match tier {
        Tier::Upper => "upper",
        Tier::Lower => "lower",
    }
}

fn check_anchors(
    exercise: &MapExercise,
    upper: &TierView,
    lower: &TierView,
) -> Result<(), ValidationResult> {
    for link in &exercise.links {
        if !upper.is_legal(link.upper) || !lower.is_legal(link.lower) {
            return Err(ValidationResult::failed(
                Violation::IllegalSubExpression,
                [link.id],
            ));
        }
    }
    for marker in &exercise.markers {
        let view = match marker.tier {
            Tier::Upper => upper,
            Tier::Lower => lower,
        };
        if !view.is_legal(marker.anchor) {
            return Err(ValidationResult::failed(
                Violation::IllegalSubExpression,
                [marker.id],
            ));
        }
    }
    Ok(())
}

/// Every non-bracket upper symbol is covered by exactly one link.
fn check_upper_coverage(links: &[MapLink], upper: &TierView) -> Result<(), ValidationResult> {
    let mut owners: Vec<Vec<Id>> = vec![Vec::new(); upper.len()];
    for link in links {
        for i in link.upper.range() {
            if let Some(slot) = owners.get_mut(i) {
                slot.push(link.id);
            }
        }
    }

    for (i, (expr, owners)) in upper.exprs.iter().zip(owners).enumerate() {
        if expr.is_bracket() {
            continue;
        }
        match owners.len() {
            0 => {
                return Err(
                    ValidationResult::failed(Violation::UnmappedPosition, []).with_help(format!(
                        "`{expr}` at position {i} of the upper expression has no link"
                    )),
                );
            }
            1 => {}
            _ => return Err(ValidationResult::failed(Violation::DuplicateMapping, owners)),
        }
    }
    Ok(())
}

/// Lower ends follow the upper order without touching each other.
fn check_order(links: &[MapLink]) -> Result<(), ValidationResult> {
    for pair in links.windows(2) {
        if pair[0].lower.end() >= pair[1].lower.start() {
            return Err(ValidationResult::failed(
                Violation::StructureNotPreserved,
                [pair[0].id, pair[1].id],
            ));
        }
    }
    Ok(())
}

/// Every non-bracket lower symbol lies inside some link's lower end.
fn check_lower_coverage(links: &[MapLink], lower: &TierView) -> Result<(), ValidationResult> {
    let uncovered = lower.exprs.iter().enumerate().find(|(i, expr)| {
        !expr.is_bracket() && !links.iter().any(|link| link.lower.range().contains(i))
    });
    match uncovered {
        Some((i, expr)) => Err(
            ValidationResult::failed(Violation::UnmappedPosition, []).with_help(format!(
                "`{expr}` at position {i} of the lower expression is not part of any link"
            )),
        ),
        None => Ok(()),
    }
}

fn check_kinds(
    links: &[MapLink],
    upper: &TierView,
    lower: &TierView,
) -> Result<(), ValidationResult> {
    for link in links {
        if !compatible(link, upper, lower) {
            debug!(link:% = link.id; "Incompatible link");
            return Err(ValidationResult::failed(
                Violation::IncompatibleMapping,
                [link.id],
            ));
        }
    }
    Ok(())
}

fn is_placeholder(expr: &Expression) -> bool {
    expr.is_formula_placeholder() || matches!(expr, Expression::TermPlaceholder(_))
}

/// Connectives and quantifiers map to the same connective or quantifier,
/// placeholders to any sub-expression, anything else to the same symbol.
fn compatible(link: &MapLink, upper: &TierView, lower: &TierView) -> bool {
    let source = upper.slice(link.upper);
    let target = lower.slice(link.lower);
    match (link.upper, source) {
        (Anchor::Single(_), [expr]) if is_placeholder(expr) => true,
        (Anchor::Single(_), [expr]) => match target {
            [other] => same_symbol(expr, other),
            _ => false,
        },
        _ => {
            source.len() == target.len()
                && source.iter().zip(target).all(|(a, b)| same_symbol(a, b))
        }
    }
}

/// Symbols are compared in canonical notation, which ignores the glyphs each
/// tier's language writes them with.
fn same_symbol(a: &Expression, b: &Expression) -> bool {
    a == b || a.to_string() == b.to_string()
}

fn check_placeholders(
    links: &[MapLink],
    upper: &TierView,
    lower: &TierView,
) -> Result<(), ValidationResult> {
    let mut seen: HashMap<String, (Vec<String>, Id)> = HashMap::new();
    for link in links {
        let Anchor::Single(i) = link.upper else {
            continue;
        };
        let Some(expr) = upper.exprs.get(i).filter(|e| is_placeholder(e)) else {
            continue;
        };
        let content: Vec<String> = lower
            .slice(link.lower)
            .iter()
            .map(ToString::to_string)
            .collect();
        match seen.get(&expr.to_string()) {
            Some((first, first_id)) if *first != content => {
                return Err(ValidationResult::failed(
                    Violation::InconsistentPlaceholder,
                    [*first_id, link.id],
                )
                .with_help(format!(
                    "`{expr}` is mapped to both `{}` and `{}`",
                    first.concat(),
                    content.concat()
                )));
            }
            Some(_) => {}
            None => {
                seen.insert(expr.to_string(), (content, link.id));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logicpad_notation::{
        catalog::{LanguageCatalog, names},
        element::parse_markup,
    };

    fn language(name: &str) -> &'static Language {
        LanguageCatalog::builtin()
            .get(name)
            .map(|l| l.as_ref())
            .expect("built-in language")
    }

    fn exercise(upper: &str, lower: &str, links: Vec<MapLink>) -> MapExercise {
        MapExercise {
            upper: parse_markup(upper),
            lower: parse_markup(lower),
            upper_language: names::METALANGUAGE.to_string(),
            lower_language: names::LQ_ABBREVIATED.to_string(),
            links,
            markers: Vec::new(),
            no_map_exists: false,
        }
    }

    fn check(exercise: &MapExercise) -> ValidationResult {
        MapValidator::new().check(
            exercise,
            language(names::METALANGUAGE),
            language(names::LQ_ABBREVIATED),
        )
    }

    fn single(id: &str, upper: usize, lower: usize) -> MapLink {
        MapLink::new(id, Anchor::Single(upper), Anchor::Single(lower))
    }

    fn to_span(id: &str, upper: usize, open: usize, close: usize) -> MapLink {
        MapLink::new(id, Anchor::Single(upper), Anchor::Bracketed { open, close })
    }

    // 𝒜 → ℬ  over  A → (B ∧ C)
    //             0 1 2 3 4 5 6
    fn conditional_links() -> Vec<MapLink> {
        vec![
            single("a", 0, 0),
            single("arrow", 1, 1),
            to_span("b", 2, 2, 6),
        ]
    }

    #[test]
    fn test_correct_map() {
        let result = check(&exercise("𝒜→ℬ", "A→(B∧C)", conditional_links()));
        assert!(result.success(), "{result:?}");
    }

    #[test]
    fn test_tiers_with_different_glyphs_agree() {
        use logicpad_notation::language::GlyphClass;

        let hilbert = Language::builder("Hilbert")
            .glyphs(GlyphClass::Negation, ["¬"])
            .glyph_chars(GlyphClass::SentenceLetters, "AB")
            .build();
        let mut ex = exercise("~𝒜", "¬A", vec![single("neg", 0, 0), single("a", 1, 1)]);
        ex.lower_language = "Hilbert".to_string();

        let result = MapValidator::new().check(&ex, language(names::METALANGUAGE), &hilbert);
        assert!(result.success(), "{result:?}");
    }

    #[test]
    fn test_missing_map() {
        let result = check(&exercise("𝒜→ℬ", "A→(B∧C)", vec![]));
        assert_eq!(result.violation(), Some(Violation::MissingMap));
    }

    #[test]
    fn test_unresolved_tier() {
        let result = check(&exercise("𝒜→ℬ", "A→$", vec![]));
        assert_eq!(result.violation(), Some(Violation::UnresolvedTier));
        assert!(result.help().is_some_and(|h| h.contains('$')));
    }

    #[test]
    fn test_illegal_anchor() {
        let mut links = conditional_links();
        links[2] = to_span("b", 2, 2, 5);
        let result = check(&exercise("𝒜→ℬ", "A→(B∧C)", links));
        assert_eq!(result.violation(), Some(Violation::IllegalSubExpression));
        assert_eq!(result.highlight_ids(), &[Id::new("b")]);
    }

    #[test]
    fn test_unmapped_and_duplicate() {
        let result = check(&exercise("𝒜→ℬ", "A→(B∧C)", conditional_links()[..2].to_vec()));
        assert_eq!(result.violation(), Some(Violation::UnmappedPosition));

        let mut links = conditional_links();
        links.push(single("again", 1, 1));
        let result = check(&exercise("𝒜→ℬ", "A→(B∧C)", links));
        assert_eq!(result.violation(), Some(Violation::DuplicateMapping));
        assert_eq!(result.highlight_ids(), &[Id::new("arrow"), Id::new("again")]);
    }

    #[test]
    fn test_crossing_links() {
        // 𝒜 → ℬ over A → B with the placeholders swapped.
        let links = vec![single("a", 0, 2), single("arrow", 1, 1), single("b", 2, 0)];
        let result = check(&exercise("𝒜→ℬ", "A→B", links));
        assert_eq!(result.violation(), Some(Violation::StructureNotPreserved));
    }

    #[test]
    fn test_incompatible_connective() {
        let links = vec![single("a", 0, 0), single("op", 1, 1), single("b", 2, 2)];
        let result = check(&exercise("𝒜→ℬ", "A∧B", links));
        assert_eq!(result.violation(), Some(Violation::IncompatibleMapping));
        assert_eq!(result.highlight_ids(), &[Id::new("op")]);
    }

    #[test]
    fn test_inconsistent_placeholder() {
        // 𝒜 → 𝒜 over A → B
        let links = vec![single("first", 0, 0), single("arrow", 1, 1), single("second", 2, 2)];
        let result = check(&exercise("𝒜→𝒜", "A→B", links));
        assert_eq!(result.violation(), Some(Violation::InconsistentPlaceholder));
        assert_eq!(result.highlight_ids(), &[Id::new("first"), Id::new("second")]);

        let links = vec![single("first", 0, 0), single("arrow", 1, 1), single("second", 2, 2)];
        assert!(check(&exercise("𝒜→𝒜", "A→A", links)).success());
    }

    #[test]
    fn test_no_map_exercise() {
        let mut ex = exercise("𝒜∧ℬ", "A→B", vec![]);
        ex.no_map_exists = true;
        assert_eq!(check(&ex).violation(), Some(Violation::MissingMarker));

        ex.markers
            .push(QuestionMarker::new("q", Tier::Lower, Anchor::Single(1)));
        assert!(check(&ex).success());

        ex.links.push(single("a", 0, 0));
        assert_eq!(check(&ex).violation(), Some(Violation::MapWhereNoneExists));
    }

    #[test]
    fn test_marker_must_be_legal() {
        let mut ex = exercise("𝒜∧ℬ", "(A→B)", vec![]);
        ex.no_map_exists = true;
        ex.markers
            .push(QuestionMarker::new("q", Tier::Lower, Anchor::Single(0)));
        let result = check(&ex);
        assert_eq!(result.violation(), Some(Violation::IllegalSubExpression));
        assert_eq!(result.highlight_ids(), &[Id::new("q")]);
    }
}
