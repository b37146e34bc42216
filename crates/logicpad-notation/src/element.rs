//! The element stream: raw formatted-text tokens handed over by the editor.
//!
//! Besides the plain constructors, this module reads a small inline markup in
//! which `_` marks a subscript and `^` a superscript, either for the next
//! character or for a braced group: `F^2_1ab` and `F^{2}_{1}ab` give the same
//! elements. The markup is what the command-line tool and tests use in place
//! of the editor's attributed text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Vertical placement of a text run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptLevel {
    #[default]
    Normal,
    Sub,
    Super,
}

impl fmt::Display for ScriptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptLevel::Normal => write!(f, "normal"),
            ScriptLevel::Sub => write!(f, "subscript"),
            ScriptLevel::Super => write!(f, "superscript"),
        }
    }
}

/// A single text token with its document position and script level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawElement {
    text: String,
    position: usize,
    #[serde(default)]
    script: ScriptLevel,
}

impl RawElement {
    pub fn new(text: impl Into<String>, position: usize, script: ScriptLevel) -> Self {
        Self {
            text: text.into(),
            position,
            script,
        }
    }

    pub fn normal(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, position, ScriptLevel::Normal)
    }

    pub fn sub(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, position, ScriptLevel::Sub)
    }

    pub fn sup(text: impl Into<String>, position: usize) -> Self {
        Self::new(text, position, ScriptLevel::Super)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn script(&self) -> ScriptLevel {
        self.script
    }

    /// Span covered by this element's text.
    pub fn span(&self) -> Span {
        Span::new(self.position..self.position + self.text.len().max(1))
    }

    /// Returns `true` for a non-empty run of ASCII digits.
    pub fn is_digits(&self) -> bool {
        !self.text.is_empty() && self.text.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Reads inline script markup into one element per character.
///
/// A `_` or `^` with nothing after it, or a brace group that is never closed,
/// is taken literally.
///
/// # Examples
///
/// ```
/// # use logicpad_notation::element::{parse_markup, ScriptLevel};
/// let elements = parse_markup("F^{2}_1ab");
/// let texts: Vec<_> = elements.iter().map(|e| (e.text(), e.script())).collect();
/// assert_eq!(
///     texts,
///     vec![
///         ("F", ScriptLevel::Normal),
///         ("2", ScriptLevel::Super),
///         ("1", ScriptLevel::Sub),
///         ("a", ScriptLevel::Normal),
///         ("b", ScriptLevel::Normal),
///     ]
/// );
/// ```
pub fn parse_markup(source: &str) -> Vec<RawElement> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut elements = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        let level = match c {
            '_' => Some(ScriptLevel::Sub),
            '^' => Some(ScriptLevel::Super),
            _ => None,
        };

        let Some(level) = level else {
            elements.push(RawElement::normal(c.to_string(), offset));
            i += 1;
            continue;
        };

        match chars.get(i + 1) {
            Some(&(_, '{')) => {
                let close = chars[i + 2..].iter().position(|&(_, c)| c == '}');
                match close {
                    Some(len) => {
                        for &(offset, c) in &chars[i + 2..i + 2 + len] {
                            elements.push(RawElement::new(c.to_string(), offset, level));
                        }
                        i += len + 3;
                    }
                    None => {
                        elements.push(RawElement::normal(c.to_string(), offset));
                        i += 1;
                    }
                }
            }
            Some(&(next_offset, next)) => {
                elements.push(RawElement::new(next.to_string(), next_offset, level));
                i += 2;
            }
            None => {
                elements.push(RawElement::normal(c.to_string(), offset));
                i += 1;
            }
        }
    }

    elements
}
