//! Operator semantics
//!
//! Applies an already coerced value to a dotted key of a document. The same rules hold for
//! single-line, multiline and from-file operators:
//!
//!     assign / json-assign   key <- value              warns when a value is replaced
//!     append                 key <- existing + value   key must exist
//!     prepend                key <- value + existing   key must exist

use crate::pl::classification::Operation;
use crate::pl::document::{recursive_update, Document};
use crate::pl::namespace::{resolve_namespace, split_key, NamespaceError};
use crate::pl::value::{ConcatError, Mapping, Value};
use std::fmt;

/// Reasons an operation cannot be applied. All of them are semantic errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    Namespace(NamespaceError),
    MissingKey(String),
    Concat { key: String, source: ConcatError },
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::Namespace(err) => write!(f, "{err}"),
            OperationError::MissingKey(key) => write!(f, "{key} does not already exist"),
            OperationError::Concat { key, source } => write!(f, "{source} at key \"{key}\""),
        }
    }
}

impl std::error::Error for OperationError {}

impl From<NamespaceError> for OperationError {
    fn from(err: NamespaceError) -> Self {
        OperationError::Namespace(err)
    }
}

pub fn overwrite_warning(key: &str) -> String {
    format!("Overwriting existing value at key \"{key}\"")
}

/// Apply `operation` with `value` to `key` in the document's data
pub fn apply_operation(
    document: &mut Document,
    key: &str,
    operation: Operation,
    value: Value,
) -> Result<(), OperationError> {
    let segments = split_key(key);
    let (namespace, name) = resolve_namespace(&mut document.data, &segments)?;

    if !operation.requires_existing() {
        if namespace.insert(name.to_string(), value).is_some() {
            document.warnings.push(overwrite_warning(key));
        }
        return Ok(());
    }

    let existing = namespace
        .get_mut(name)
        .ok_or_else(|| OperationError::MissingKey(key.to_string()))?;
    let result = match operation {
        Operation::Prepend => existing.prepend(value),
        _ => existing.append(value),
    };
    result.map_err(|source| OperationError::Concat {
        key: key.to_string(),
        source,
    })?;

    Ok(())
}

/// Insert a component fragment at `key`, merging into an existing mapping if there is one
pub fn insert_component(
    document: &mut Document,
    key: &str,
    fragment: Mapping,
) -> Result<(), OperationError> {
    let segments = split_key(key);
    let (namespace, name) = resolve_namespace(&mut document.data, &segments)?;

    match namespace.get_mut(name) {
        Some(Value::Mapping(existing)) => recursive_update(existing, fragment),
        Some(_) => {
            document.warnings.push(overwrite_warning(key));
            namespace.insert(name.to_string(), Value::Mapping(fragment));
        }
        None => {
            namespace.insert(name.to_string(), Value::Mapping(fragment));
        }
    }

    Ok(())
}
