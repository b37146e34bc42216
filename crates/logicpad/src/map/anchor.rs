//! Link anchors and the two-caret marking protocol.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use logicpad_notation::expression::{BracketLevel, Expression};

/// Where a link or question marker attaches to a resolved expression.
///
/// Indices count expressions, not characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// A single symbol.
    Single(usize),
    /// A bracketed span, from its open bracket to the matching close bracket.
    Bracketed { open: usize, close: usize },
}

impl Anchor {
    pub fn start(self) -> usize {
        match self {
            Anchor::Single(i) => i,
            Anchor::Bracketed { open, .. } => open,
        }
    }

    pub fn end(self) -> usize {
        match self {
            Anchor::Single(i) => i,
            Anchor::Bracketed { close, .. } => close,
        }
    }

    pub fn range(self) -> RangeInclusive<usize> {
        self.start()..=self.end()
    }
}

/// Anchor being marked with carets.
///
/// The first caret selects a single symbol. A second caret turns the
/// selection into a bracketed span between the two carets, whichever order
/// they were placed in. A third caret starts over.
///
/// # Example
///
/// ```
/// # use logicpad::map::{Anchor, CaretMarking};
/// let mut marking = CaretMarking::new();
/// assert_eq!(marking.place(6), Some(Anchor::Single(6)));
/// assert_eq!(marking.place(2), Some(Anchor::Bracketed { open: 2, close: 6 }));
/// assert_eq!(marking.place(4), Some(Anchor::Single(4)));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CaretMarking {
    first: Option<usize>,
    second: Option<usize>,
}

impl CaretMarking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a caret and returns the anchor marked so far.
    pub fn place(&mut self, index: usize) -> Option<Anchor> {
        match (self.first, self.second) {
            (None, _) => self.first = Some(index),
            (Some(_), None) => self.second = Some(index),
            (Some(_), Some(_)) => {
                self.first = Some(index);
                self.second = None;
            }
        }
        self.anchor()
    }

    pub fn anchor(&self) -> Option<Anchor> {
        match (self.first?, self.second) {
            (first, None) => Some(Anchor::Single(first)),
            (first, Some(second)) if first == second => Some(Anchor::Single(first)),
            (first, Some(second)) => Some(Anchor::Bracketed {
                open: first.min(second),
                close: first.max(second),
            }),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A resolved expression with its bracket pairs matched.
#[derive(Debug)]
pub(super) struct TierView {
    pub exprs: Vec<Expression>,
    partners: Vec<Option<usize>>,
}

impl TierView {
    pub fn new(exprs: Vec<Expression>) -> Self {
        let partners = match_brackets(&exprs);
        Self { exprs, partners }
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Whether the anchor denotes a sub-expression: a non-bracket symbol, or
    /// a matching open/close pair of the same level.
    pub fn is_legal(&self, anchor: Anchor) -> bool {
        match anchor {
            Anchor::Single(i) => self.exprs.get(i).is_some_and(|e| !e.is_bracket()),
            Anchor::Bracketed { open, close } => {
                open < close && self.partners.get(open).copied().flatten() == Some(close)
            }
        }
    }

    pub fn slice(&self, anchor: Anchor) -> &[Expression] {
        self.exprs.get(anchor.range()).unwrap_or_default()
    }
}

fn match_brackets(exprs: &[Expression]) -> Vec<Option<usize>> {
    let mut partners = vec![None; exprs.len()];
    let mut open: Vec<(usize, BracketLevel)> = Vec::new();
    for (i, expr) in exprs.iter().enumerate() {
        match expr {
            Expression::OpenBracket(level) => open.push((i, *level)),
            Expression::CloseBracket(level) => match open.last() {
                Some(&(j, top)) if top == *level => {
                    open.pop();
                    partners[i] = Some(j);
                    partners[j] = Some(i);
                }
                // A mismatched close bracket pairs with nothing.
                _ => {}
            },
            _ => {}
        }
    }
    partners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(exprs: Vec<Expression>) -> TierView {
        TierView::new(exprs)
    }

    #[test]
    fn test_caret_protocol() {
        let mut marking = CaretMarking::new();
        assert_eq!(marking.anchor(), None);
        assert_eq!(marking.place(3), Some(Anchor::Single(3)));
        assert_eq!(marking.place(3), Some(Anchor::Single(3)));
        marking.clear();
        assert_eq!(marking.place(1), Some(Anchor::Single(1)));
        assert_eq!(marking.place(5), Some(Anchor::Bracketed { open: 1, close: 5 }));
    }

    #[test]
    fn test_legal_anchors() {
        use BracketLevel::{One, Two};
        // ( A → [ B ] )
        let tier = view(vec![
            Expression::OpenBracket(One),
            Expression::ContradictionSymbol,
            Expression::Conditional,
            Expression::OpenBracket(Two),
            Expression::ContradictionSymbol,
            Expression::CloseBracket(Two),
            Expression::CloseBracket(One),
        ]);
        assert_eq!(tier.len(), 7);
        assert!(tier.is_legal(Anchor::Single(2)));
        assert!(!tier.is_legal(Anchor::Single(0)));
        assert!(!tier.is_legal(Anchor::Single(7)));
        assert!(tier.is_legal(Anchor::Bracketed { open: 0, close: 6 }));
        assert!(tier.is_legal(Anchor::Bracketed { open: 3, close: 5 }));
        assert!(!tier.is_legal(Anchor::Bracketed { open: 0, close: 5 }));
        assert!(!tier.is_legal(Anchor::Bracketed { open: 1, close: 2 }));
        assert_eq!(tier.slice(Anchor::Bracketed { open: 3, close: 5 }).len(), 3);
    }

    #[test]
    fn test_mismatched_levels_do_not_pair() {
        use BracketLevel::{One, Two};
        let tier = view(vec![
            Expression::OpenBracket(One),
            Expression::Negation,
            Expression::CloseBracket(Two),
        ]);
        assert!(!tier.is_legal(Anchor::Bracketed { open: 0, close: 2 }));
    }
}
