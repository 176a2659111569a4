//! The ordered search path of attached modules.

use encl_eval::{ModuleValue, Value};
use encl_ir::Name;
use parking_lot::RwLock;

/// One attached module, tagged with the identifier it was attached under.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchPathEntry {
    pub identifier: Name,
    pub module: ModuleValue,
}

/// Append-only list of attached modules.
///
/// Unqualified lookup walks it from the most recent entry to the oldest.
/// Entries are never removed or reordered. Appends take the write lock, so a
/// reader sees either the list before or after an attach.
#[derive(Debug, Default)]
pub struct SearchPathRegistry {
    entries: RwLock<Vec<SearchPathEntry>>,
}

impl SearchPathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, identifier: Name, module: ModuleValue) {
        tracing::debug!(
            identifier = %identifier,
            exports = module.len(),
            position = self.len(),
            "attaching module to search path"
        );
        self.entries
            .write()
            .push(SearchPathEntry { identifier, module });
    }

    /// Most recently attached binding for `name`.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.resolve(name).map(|(_, value)| value)
    }

    /// Like [`lookup`](Self::lookup), also naming the entry that supplied it.
    pub fn resolve(&self, name: &str) -> Option<(Name, Value)> {
        self.entries.read().iter().rev().find_map(|entry| {
            entry
                .module
                .get(name)
                .map(|value| (entry.identifier.clone(), value.clone()))
        })
    }

    /// Snapshot in attach order, oldest first.
    pub fn entries(&self) -> Vec<SearchPathEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
