//! Dotted namespace resolution
//!
//! `a.b.c = 1` writes `c` inside the mapping reached by following `a` then `b` from the
//! root, creating missing mappings on the way. A segment that already holds a scalar or a
//! list cannot be traversed.

use crate::pl::value::{Mapping, Value};
use std::fmt;

/// A dotted path traversed a value that is not a mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceError {
    /// The dotted prefix that resolved to a non-mapping value
    pub path: String,
}

impl fmt::Display for NamespaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} does not correspond to a valid namespace", self.path)
    }
}

impl std::error::Error for NamespaceError {}

/// Walk (and create) the mappings for every segment but the last.
///
/// Returns the containing mapping and the final segment. `segments` is never empty since the
/// grammar only captures non-empty keys; an empty slice resolves to the root with an empty key.
pub fn resolve_namespace<'m, 'k>(
    root: &'m mut Mapping,
    segments: &[&'k str],
) -> Result<(&'m mut Mapping, &'k str), NamespaceError> {
    let Some((last, parents)) = segments.split_last() else {
        return Ok((root, ""));
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let entry = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        current = match entry {
            Value::Mapping(m) => m,
            _ => {
                return Err(NamespaceError {
                    path: segments[..=depth].join("."),
                })
            }
        };
    }

    Ok((current, *last))
}

/// Split a dotted key into its segments
pub fn split_key(key: &str) -> Vec<&str> {
    key.split('.').collect()
}
