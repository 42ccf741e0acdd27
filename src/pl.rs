//! PL format parsing
//!
//! Modules, from the line up:
//!
//! - [grammar]: one regex per line kind
//! - [classification]: which kind a line is, in precedence order
//! - [coercion]: literal evaluation and JSON decoding of operands
//! - [namespace]: dotted keys resolved to nested mappings
//! - [multiline]: the `==` block accumulator
//! - [parsing]: the engine driving all of the above over a file
//! - [document]: the parse result and how documents merge
//! - [location]: how file references become paths
//! - [components]: the catalog behind `key =: Name`
//! - [registry]: extension-based parser dispatch
//! - [formats]: JSON/YAML output of documents
//! - [config]: layered configuration with embedded defaults

pub mod classification;
pub mod coercion;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod location;
pub mod multiline;
pub mod namespace;
pub mod parsing;
pub mod registry;
pub mod testing;
pub mod value;
