//! The result of parsing a PL file
//!
//! A [`Document`] is created empty when a parse starts, filled line by line, and handed
//! back complete. Documents can be merged, which is how inherited templates combine with
//! the file that extends them.

use crate::pl::location::ScopeIds;
use crate::pl::value::{Mapping, Value};
use serde::Serialize;
use std::collections::BTreeSet;

/// Format tag of documents produced by the PL parser
pub const PL_FORMAT: &str = "pl";

/// A file the document depends on, and the name it is exposed under
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Dependency {
    pub path: String,
    pub alias: String,
}

impl Dependency {
    pub fn new(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Dependency {
            path: path.into(),
            alias: alias.into(),
        }
    }
}

/// Parsed PL document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub path: String,
    #[serde(flatten)]
    pub scope: ScopeIds,
    pub format: String,
    pub dependencies: BTreeSet<Dependency>,
    pub comments: Vec<String>,
    pub warnings: Vec<String>,
    pub data: Mapping,
}

impl Document {
    /// Create an empty document
    pub fn new(path: impl Into<String>, scope: ScopeIds, format: impl Into<String>) -> Self {
        Document {
            path: path.into(),
            scope,
            format: format.into(),
            dependencies: BTreeSet::new(),
            comments: Vec::new(),
            warnings: Vec::new(),
            data: Mapping::new(),
        }
    }

    /// Look up a dotted key in `data`
    pub fn get(&self, key: &str) -> Option<&Value> {
        let (first, rest) = match key.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (key, None),
        };
        let value = self.data.get(first)?;
        match rest {
            Some(rest) => value.get_path(rest),
            None => Some(value),
        }
    }

    /// Merge `other` into this document.
    ///
    /// Dependencies are united, comments and warnings appended after ours, and data merged
    /// recursively with `other` winning on conflicts. Metadata (path, scope, format) is kept.
    pub fn merge(&mut self, other: Document) {
        self.dependencies.extend(other.dependencies);
        self.comments.extend(other.comments);
        self.warnings.extend(other.warnings);
        recursive_update(&mut self.data, other.data);
    }

    /// Merge `base` underneath this document: the base's data is only kept where this
    /// document does not define a value, and its comments and warnings come first.
    pub fn merge_beneath(&mut self, base: Document) {
        let Document {
            dependencies,
            mut comments,
            mut warnings,
            mut data,
            ..
        } = base;

        comments.append(&mut self.comments);
        warnings.append(&mut self.warnings);
        recursive_update(&mut data, std::mem::take(&mut self.data));

        self.dependencies.extend(dependencies);
        self.comments = comments;
        self.warnings = warnings;
        self.data = data;
    }
}

/// Recursively update `current` with `incoming`.
///
/// Absent keys are inserted, mappings on both sides are merged, anything else is overwritten.
pub fn recursive_update(current: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        match value {
            Value::Mapping(nested) => {
                if let Some(Value::Mapping(existing)) = current.get_mut(&key) {
                    recursive_update(existing, nested);
                } else {
                    current.insert(key, Value::Mapping(nested));
                }
            }
            value => {
                current.insert(key, value);
            }
        }
    }
}
