//! Navigation target split into path, query and hash.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::fmt;

/// A navigation target. `query` and `hash` are stored without their
/// leading `?`/`#`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: String,
    pub hash: String,
}

impl Location {
    /// Parse a full path such as `/event/42?tab=notes#top`.
    pub fn parse(full_path: &str) -> Self {
        let (rest, hash) = full_path.split_once('#').unwrap_or((full_path, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        Self::from_parts(path, query, hash)
    }

    /// Build from router parts; tolerates a leading `?`/`#` on query/hash.
    pub fn from_parts(path: &str, query: &str, hash: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_owned(),
            query: query.strip_prefix('?').unwrap_or(query).to_owned(),
            hash: hash.strip_prefix('#').unwrap_or(hash).to_owned(),
        }
    }

    /// Path plus `?query` and `#hash` when present.
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            full.push('?');
            full.push_str(&self.query);
        }
        if !self.hash.is_empty() {
            full.push('#');
            full.push_str(&self.hash);
        }
        full
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}
