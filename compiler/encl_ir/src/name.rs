//! Identifiers.
//!
//! A `Name` owns its text through an `Arc<str>` instead of an interner index.
//! Values that carry names (closures, module snapshots) can then be handed to
//! another thread or worker without a shared interner travelling with them.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An identifier or binding name.
///
/// Hashes and compares by its text, and implements `Borrow<str>` so maps keyed
/// by `Name` can be queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    /// Leading character that marks a binding as private to its module.
    pub const PRIVATE_PREFIX: char = '.';

    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Name(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name follows the private-name convention (`.hidden`).
    #[inline]
    pub fn is_private(&self) -> bool {
        self.0.starts_with(Self::PRIVATE_PREFIX)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name(Arc::from(text))
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Name(Arc::from(text))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn private_convention() {
        assert!(Name::from(".hidden").is_private());
        assert!(!Name::from("visible").is_private());
        assert!(!Name::from("a.b").is_private());
    }

    #[test]
    fn borrow_as_str_for_lookup() {
        let mut map = HashMap::new();
        map.insert(Name::from("x"), 1);
        assert_eq!(map.get("x"), Some(&1));
        assert_eq!(map.get("y"), None);
    }

    #[test]
    fn display_and_debug() {
        let name = Name::from("area");
        assert_eq!(name.to_string(), "area");
        assert_eq!(format!("{name:?}"), "\"area\"");
    }
}
