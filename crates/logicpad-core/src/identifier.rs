//! Identifier management using string interning.
//!
//! Diagram nodes and links are addressed by stable [`Id`]s. Exercise files name
//! them with arbitrary strings, so ids are interned once and compared as
//! integers afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Stable identifier of a diagram node or link.
///
/// # Examples
///
/// ```
/// use logicpad_core::identifier::Id;
///
/// let root = Id::new("box-1");
/// assert_eq!(root, "box-1");
/// assert_eq!(root, Id::new("box-1"));
///
/// let generated = Id::from_index(7);
/// assert_eq!(generated.to_string(), "#7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string representation.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an `Id` for an element that was not given a name, such as a
    /// node created by the editor before it is persisted.
    pub fn from_index(idx: usize) -> Self {
        Self::new(&format!("#{idx}"))
    }

    /// Returns the string this id was created from.
    pub fn to_string_lossy(self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "box-1"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("n1"), Id::new("n1"));
        assert_ne!(Id::new("n1"), Id::new("n2"));
    }

    #[test]
    fn test_display_round_trips_name() {
        let id = Id::new("justification-row-2");
        assert_eq!(id.to_string(), "justification-row-2");
        assert!(id == "justification-row-2");
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Id::from_index(3), "#3");
    }

    #[test]
    fn test_from_str_conversion() {
        let id: Id = "link-a".into();
        assert_eq!(id, Id::new("link-a"));
    }
}
