//! Placeholder substitution for resource templates.
//!
//! Templates mark placeholders with double braces: `{{name}}`.
//!
//! # Rules
//!
//! - `{{name}}` is replaced when `name` is in the substitution set
//! - Placeholders missing from the set are left verbatim
//! - Keys in the set that never appear in the template are ignored
//! - Replacement values are inserted as-is and never re-scanned, so a value
//!   containing `{{other}}` stays literal
//!
//! # Example
//!
//! ```
//! use artifact_harness::resources::{render_str, Substitutions};
//!
//! let subs = Substitutions::new().with("version", "1.0.1");
//! assert_eq!(
//!     render_str("<version>{{version}}</version> {{unset}}", &subs),
//!     "<version>1.0.1</version> {{unset}}"
//! );
//! ```

use std::collections::BTreeSet;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Ordered mapping of placeholder name to replacement value.
///
/// Inserting an existing name replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Substitutions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut subs = Substitutions::new();
        for (name, value) in iter {
            subs.insert(name, value);
        }
        subs
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Substitutions {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Substitute placeholders in a template string.
///
/// Scans left to right once. At each `{{`, the text up to the next `}}` is
/// looked up in `subs`; on a hit the whole marker is replaced and scanning
/// resumes after it, on a miss a single `{` is emitted and scanning resumes
/// one character later. This matches literal `{{name}}` occurrences even
/// when surrounded by extra braces (`{{{name}}}` -> `{value}`).
pub fn render_str(template: &str, subs: &Substitutions) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let marker = &rest[start..];
        let inner = &marker[OPEN.len()..];

        let hit = inner
            .find(CLOSE)
            .and_then(|end| subs.get(&inner[..end]).map(|value| (end, value)));

        match hit {
            Some((end, value)) => {
                out.push_str(value);
                rest = &inner[end + CLOSE.len()..];
            }
            None => {
                out.push('{');
                rest = &marker[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Names of all well-formed placeholders in a template.
///
/// A placeholder name may not itself contain braces.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let inner = &rest[start + OPEN.len()..];
        match inner.find(CLOSE) {
            Some(end) if !inner[..end].contains(['{', '}']) => {
                names.insert(inner[..end].to_string());
                rest = &inner[end + CLOSE.len()..];
            }
            Some(_) => rest = &rest[start + 1..],
            None => break,
        }
    }

    names
}
