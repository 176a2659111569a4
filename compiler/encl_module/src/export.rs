//! Export policies.
//!
//! An entry beginning with [`PATTERN_SENTINEL`] is a regular expression, kept
//! with its leading caret so it stays anchored at the start of the name. Any
//! other entry is a literal binding name. A name that itself begins with `^`
//! therefore cannot be listed literally; it can only be matched by a pattern.

use encl_eval::errors::invalid_export_pattern;
use encl_eval::{EvalError, ModuleValue, Value};
use encl_ir::Name;
use regex::Regex;

/// Leading character that marks an export entry as a pattern.
pub const PATTERN_SENTINEL: char = '^';

#[derive(Clone, Debug)]
pub enum ExportEntry {
    Name(Name),
    Pattern(Regex),
}

impl ExportEntry {
    pub fn parse(raw: &str) -> Result<Self, EvalError> {
        if raw.starts_with(PATTERN_SENTINEL) {
            Regex::new(raw)
                .map(ExportEntry::Pattern)
                .map_err(|err| invalid_export_pattern(raw, err))
        } else {
            Ok(ExportEntry::Name(Name::from(raw)))
        }
    }

    pub fn matches(&self, name: &Name) -> bool {
        match self {
            ExportEntry::Name(listed) => listed == name,
            ExportEntry::Pattern(pattern) => pattern.is_match(name.as_str()),
        }
    }
}

impl PartialEq for ExportEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExportEntry::Name(a), ExportEntry::Name(b)) => a == b,
            (ExportEntry::Pattern(a), ExportEntry::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Which bindings of a module scope become its exports.
///
/// With no entries the default applies: every binding except private
/// (`.`-prefixed) names. With entries, exactly the listed names plus every
/// name matching a pattern. A listed private name is exported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportPolicy {
    entries: Vec<ExportEntry>,
}

impl ExportPolicy {
    /// Parse raw entries, as written in `export(...)`.
    pub fn parse<I>(entries: I) -> Result<Self, EvalError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|raw| ExportEntry::parse(raw.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(ExportPolicy { entries })
    }

    /// Union with another policy's entries.
    pub fn extend(&mut self, other: ExportPolicy) {
        self.entries.extend(other.entries);
    }

    pub fn is_default(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ExportEntry] {
        &self.entries
    }

    pub fn admits(&self, name: &Name) -> bool {
        if self.is_default() {
            !name.is_private()
        } else {
            self.entries.iter().any(|entry| entry.matches(name))
        }
    }

    /// Apply the policy, keeping declaration order.
    ///
    /// Listed names missing from `bindings` are skipped, not reported.
    pub fn filter(&self, bindings: &[(Name, Value)]) -> ModuleValue {
        for entry in &self.entries {
            if let ExportEntry::Name(name) = entry {
                if !bindings.iter().any(|(bound, _)| bound == name) {
                    tracing::debug!(name = %name, "exported name is not bound; skipping");
                }
            }
        }
        bindings
            .iter()
            .filter(|(name, _)| self.admits(name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests;
