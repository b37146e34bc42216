//! Cursor over the sequence a pass reads.

use crate::{
    element::{RawElement, ScriptLevel},
    expression::Expression,
    span::{Span, Spanned},
};

/// Read position in an immutable pass input.
///
/// Passes consume the glyph under the cursor and any script runs they absorb;
/// the driver rewinds to the start position when a pass declines.
#[derive(Debug)]
pub(super) struct Cursor<'a> {
    items: &'a [Spanned<Expression>],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(items: &'a [Spanned<Expression>]) -> Self {
        Self { items, pos: 0 }
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn rewind(&mut self, pos: usize) {
        self.pos = pos.min(self.items.len());
    }

    pub(super) fn peek(&self) -> Option<&'a Spanned<Expression>> {
        self.items.get(self.pos)
    }

    /// The next element, if no earlier pass resolved it.
    pub(super) fn peek_raw(&self) -> Option<&'a RawElement> {
        self.peek().and_then(|item| item.raw())
    }

    pub(super) fn bump(&mut self) {
        if self.pos < self.items.len() {
            self.pos += 1;
        }
    }

    /// Consumes the next element if it is unresolved and on the normal line.
    pub(super) fn glyph(&mut self) -> Option<&'a str> {
        let raw = self.peek_raw()?;
        if raw.script() != ScriptLevel::Normal {
            return None;
        }
        self.bump();
        Some(raw.text())
    }

    /// Consumes the next element if it is an unresolved digit run at `level`.
    pub(super) fn digits(&mut self, level: ScriptLevel) -> Option<&'a str> {
        let raw = self.peek_raw()?;
        if raw.script() != level || !raw.is_digits() {
            return None;
        }
        self.bump();
        Some(raw.text())
    }

    /// Span of everything consumed since `start`.
    pub(super) fn span_since(&self, start: usize) -> Span {
        self.items[start..self.pos]
            .iter()
            .map(|item| item.span())
            .reduce(|a, b| a.union(b))
            .unwrap_or_default()
    }
}
