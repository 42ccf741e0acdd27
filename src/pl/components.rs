//! Component catalog
//!
//! `key =: Name` inserts the data fragment registered under `Name`. The catalog maps
//! component names to those fragments; [`ComponentCatalog::with_defaults`] provides the form
//! components exercises commonly use.

use crate::pl::value::{Mapping, Value};
use std::collections::HashMap;

/// Registry of named, reusable data fragments
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: HashMap<String, Mapping>,
}

impl ComponentCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        ComponentCatalog {
            components: HashMap::new(),
        }
    }

    /// Register a component. An existing component with the same name is replaced.
    pub fn register(&mut self, name: impl Into<String>, fragment: Mapping) {
        self.components.insert(name.into(), fragment);
    }

    pub fn get(&self, name: &str) -> Option<&Mapping> {
        self.components.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// List all component names (sorted)
    pub fn list_components(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Create a catalog with the built-in form components
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (name, selector, state) in [
            ("Input", "c-input", vec![("value", Value::from(""))]),
            ("CodeEditor", "c-code-editor", vec![("code", Value::from(""))]),
            (
                "CheckboxGroup",
                "c-checkbox-group",
                vec![("items", Value::List(vec![]))],
            ),
            (
                "RadioGroup",
                "c-radio-group",
                vec![("items", Value::List(vec![])), ("selection", Value::Null)],
            ),
            ("SortList", "c-sort-list", vec![("items", Value::List(vec![]))]),
            (
                "MatchList",
                "c-match-list",
                vec![("items", Value::List(vec![]))],
            ),
            ("Form", "c-form", vec![("form", Value::Mapping(Mapping::new()))]),
        ] {
            let mut fragment: Mapping = state
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect();
            fragment.insert("selector".to_string(), Value::from(selector));
            fragment.insert("disabled".to_string(), Value::Bool(false));
            catalog.register(name, fragment);
        }
        catalog
    }
}
