//! # Domain Types
//!
//! The normalized project record every layer above the directory loader works with.

/// One project and the people responsible for it.
///
/// `key` is the normalized (trimmed, lowercased) lookup key. `managers` is
/// ordered as it appeared in the data source; an empty list is a valid but
/// degraded record ("no responsible person on file").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub key: String,
    pub name: String,
    pub managers: Vec<String>,
}
