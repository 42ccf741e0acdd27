//! Parser registry
//!
//! Source files are dispatched to a parser by extension. Each registered entry names the file
//! type, the extensions it claims and a factory building a parser for one file. The PL parser
//! is registered for `pl`; hosts can add parsers for other file types next to it.

use crate::pl::document::{Document, PL_FORMAT};
use crate::pl::error::ParseError;
use crate::pl::location::{FsLocationResolver, ScopeIds, SharedResolver};
use crate::pl::parsing::{ParseOptions, PlParser};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// A parser constructed for one file, consumed by parsing it
pub trait Parser {
    fn parse(self: Box<Self>) -> Result<Document, ParseError>;
}

impl Parser for PlParser {
    fn parse(self: Box<Self>) -> Result<Document, ParseError> {
        PlParser::parse(*self)
    }
}

/// Builds a parser for `path` in `scope`
pub type ParserFactory =
    fn(&Path, ScopeIds, SharedResolver, &ParseOptions) -> Box<dyn Parser>;

/// A registered file type
#[derive(Clone)]
pub struct ParserEntry {
    pub file_type: String,
    pub extensions: Vec<String>,
    pub factory: ParserFactory,
}

impl fmt::Debug for ParserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserEntry")
            .field("file_type", &self.file_type)
            .field("extensions", &self.extensions)
            .finish()
    }
}

fn pl_factory(
    path: &Path,
    scope: ScopeIds,
    resolver: SharedResolver,
    options: &ParseOptions,
) -> Box<dyn Parser> {
    Box::new(PlParser::new(path, scope, resolver).with_options(options.clone()))
}

/// Error dispatching a file to its parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No parser claims the file's extension
    NoParser { path: String, extension: String },
    /// The parser ran and failed
    Parse(ParseError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NoParser { path, extension } => {
                write!(f, "No parser registered for extension '{extension}' ({path})")
            }
            RegistryError::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Parse(err) => Some(err),
            RegistryError::NoParser { .. } => None,
        }
    }
}

impl From<ParseError> for RegistryError {
    fn from(err: ParseError) -> Self {
        RegistryError::Parse(err)
    }
}

/// Registry mapping file extensions to parsers
#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    by_extension: HashMap<String, ParserEntry>,
}

impl ParserRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ParserRegistry {
            by_extension: HashMap::new(),
        }
    }

    /// Register an entry under each of its extensions.
    ///
    /// An extension already claimed by another file type is taken over, with a warning.
    pub fn register(&mut self, entry: ParserEntry) {
        for extension in &entry.extensions {
            if let Some(previous) = self.by_extension.get(extension) {
                if previous.file_type != entry.file_type {
                    warn!(
                        extension = %extension,
                        previous = %previous.file_type,
                        replacement = %entry.file_type,
                        "extension registered twice"
                    );
                }
            }
            self.by_extension.insert(extension.clone(), entry.clone());
        }
    }

    pub fn get(&self, extension: &str) -> Option<&ParserEntry> {
        self.by_extension.get(extension)
    }

    pub fn has(&self, extension: &str) -> bool {
        self.by_extension.contains_key(extension)
    }

    /// List all claimed extensions (sorted)
    pub fn list_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<_> = self.by_extension.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Parse `path` with the parser registered for its extension
    pub fn parse_file(
        &self,
        path: &Path,
        scope: ScopeIds,
        resolver: SharedResolver,
        options: &ParseOptions,
    ) -> Result<Document, RegistryError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        let entry = self
            .get(&extension)
            .ok_or_else(|| RegistryError::NoParser {
                path: path.display().to_string(),
                extension: extension.clone(),
            })?;

        (entry.factory)(path, scope, resolver, options)
            .parse()
            .map_err(RegistryError::from)
    }

    /// Create a registry with the PL parser
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ParserEntry {
            file_type: PL_FORMAT.to_string(),
            extensions: vec![PL_FORMAT.to_string()],
            factory: pl_factory,
        });
        registry
    }
}

/// Parse a file on the filesystem with the default registry and options
pub fn parse_file(path: impl AsRef<Path>, scope: ScopeIds) -> Result<Document, RegistryError> {
    ParserRegistry::with_defaults().parse_file(
        path.as_ref(),
        scope,
        Arc::new(FsLocationResolver),
        &ParseOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubParser(String);

    impl Parser for StubParser {
        fn parse(self: Box<Self>) -> Result<Document, ParseError> {
            Ok(Document::new(self.0, ScopeIds::default(), "stub"))
        }
    }

    fn stub_factory(
        path: &Path,
        _: ScopeIds,
        _: SharedResolver,
        _: &ParseOptions,
    ) -> Box<dyn Parser> {
        Box::new(StubParser(path.display().to_string()))
    }

    #[test]
    fn test_defaults_claim_pl() {
        let registry = ParserRegistry::with_defaults();
        assert!(registry.has("pl"));
        assert_eq!(registry.list_extensions(), vec!["pl"]);
        assert_eq!(registry.get("pl").unwrap().file_type, PL_FORMAT);
    }

    #[test]
    fn test_dispatch_by_extension() {
        let mut registry = ParserRegistry::with_defaults();
        registry.register(ParserEntry {
            file_type: "stub".to_string(),
            extensions: vec!["stub".to_string(), "stb".to_string()],
            factory: stub_factory,
        });

        let doc = registry
            .parse_file(
                Path::new("/x/a.stb"),
                ScopeIds::default(),
                Arc::new(FsLocationResolver),
                &ParseOptions::default(),
            )
            .unwrap();
        assert_eq!(doc.format, "stub");
        assert_eq!(doc.path, "/x/a.stb");
    }

    #[test]
    fn test_unknown_extension() {
        let err = parse_file("/x/readme.md", ScopeIds::default()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::NoParser {
                path: "/x/readme.md".to_string(),
                extension: "md".to_string(),
            }
        );
    }
}
