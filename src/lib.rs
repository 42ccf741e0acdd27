//! # pl-parser
//!
//! A parser for the PL exercise description format.
//!
//! A PL file is a sequence of lines, each of which either assigns, appends to or prepends to
//! a dotted key, opens or closes a multiline block, pulls content from another file,
//! declares a dependency, or inherits from a template. Parsing a file produces a
//! [`Document`](pl::document::Document): a nested data tree plus the dependencies,
//! comments and warnings collected along the way.
//!
//! File Layout
//!
//! src/pl
//!   ├── grammar, classification   Line kinds and the regex patterns behind them
//!   ├── multiline                 Accumulator for `key ==` ... `==` blocks
//!   ├── namespace, value          The data tree and dotted-path navigation
//!   ├── coercion                  Literal evaluation and JSON decoding of raw values
//!   ├── parsing                   The engine tying the above together
//!   ├── document, location        The parse result, and how file references resolve
//!   ├── components                Fragments inserted by `key =: Name`
//!   ├── registry, formats         Extension dispatch and output serialization
//!   └── config                    Layered configuration over embedded defaults
//!
//! For fixture helpers used by the test suite, see the [testing module](pl::testing).

pub mod pl;

pub use pl::document::{Dependency, Document};
pub use pl::error::{ErrorKind, ParseError};
pub use pl::location::{FsLocationResolver, LocationResolver, ScopeIds, SharedResolver};
pub use pl::parsing::{ParseOptions, PlParser};
pub use pl::registry::{parse_file, ParserRegistry, RegistryError};
pub use pl::value::{Mapping, Value};
