//! PL parsing engine
//!
//! [`PlParser`] reads one file line by line. Each line is classified, then handled:
//!
//!     one-line / multiline / from-file operations   coerce the operand, apply the operator
//!     extends / template                            parse the base file, merge it beneath
//!     component                                     insert a catalog fragment
//!     dependency                                    record (resolved path, alias)
//!     comment                                       record the comment text
//!
//! The first error aborts the parse. Once all lines are consumed, an open multiline block is
//! a syntax error and, unless disabled, the mandatory keys must be present.
//!
//! Base files are parsed by a fresh parser that shares the resolver and options and carries
//! the chain of files being resolved, which is how inheritance loops are detected.

pub mod operators;

use crate::pl::classification::{classify_line, LineKind, Operation};
use crate::pl::coercion::{decode_json, evaluate_literal};
use crate::pl::components::ComponentCatalog;
use crate::pl::document::{Dependency, Document, PL_FORMAT};
use crate::pl::error::{ErrorKind, ParseError, ParseResult};
use crate::pl::location::{normalize, ScopeIds, SharedResolver};
use crate::pl::multiline::Multiline;
use operators::{apply_operation, insert_component};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Keys every complete exercise must define
pub const DEFAULT_MANDATORY_KEYS: &[&str] = &["title", "author", "version", "statement"];

/// Default limit on `extends` nesting
pub const DEFAULT_MAX_INHERITANCE_DEPTH: usize = 32;

/// Options shared by a parse and every base file it pulls in
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Check for [`mandatory_keys`](Self::mandatory_keys) after the last line
    pub check_mandatory_keys: bool,
    pub mandatory_keys: Vec<String>,
    /// Deepest `extends` chain accepted before reporting an inheritance loop
    pub max_inheritance_depth: usize,
    pub components: Arc<ComponentCatalog>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            check_mandatory_keys: true,
            mandatory_keys: DEFAULT_MANDATORY_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
            max_inheritance_depth: DEFAULT_MAX_INHERITANCE_DEPTH,
            components: Arc::new(ComponentCatalog::with_defaults()),
        }
    }
}

/// The line an error is attributed to
struct Site {
    line: String,
    line_number: usize,
}

/// Mutable state of one parse
struct EngineState {
    document: Document,
    multiline: Multiline,
    line: String,
    line_number: usize,
}

/// Parser for a single PL file
pub struct PlParser {
    path: PathBuf,
    /// Directory relative references are resolved against
    dir: PathBuf,
    /// Absolute form of `path`, as recorded in the inheritance chain
    identity: PathBuf,
    scope: ScopeIds,
    resolver: SharedResolver,
    options: ParseOptions,
    inherited: Vec<PathBuf>,
    state: EngineState,
}

impl PlParser {
    pub fn new(
        path: impl Into<PathBuf>,
        scope: ScopeIds,
        resolver: SharedResolver,
    ) -> Self {
        let path = path.into();
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let identity = absolute(&path);
        let document = Document::new(path.display().to_string(), scope, PL_FORMAT);

        PlParser {
            path,
            dir,
            identity,
            scope,
            resolver,
            options: ParseOptions::default(),
            inherited: Vec::new(),
            state: EngineState {
                document,
                multiline: Multiline::default(),
                line: String::new(),
                line_number: 0,
            },
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Files already being resolved above this one, outermost first
    pub fn with_inheritance_chain(mut self, chain: Vec<PathBuf>) -> Self {
        self.inherited = chain;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and parse it
    pub fn parse(self) -> ParseResult<Document> {
        let source = fs::read_to_string(&self.path).map_err(|err| {
            ParseError::new(
                ErrorKind::FileNotFound,
                self.display_path(),
                "",
                0,
                format!("Could not read file: {err}"),
            )
        })?;
        self.parse_str(&source)
    }

    /// Parse `source` as the content of this parser's file
    pub fn parse_str(mut self, source: &str) -> ParseResult<Document> {
        debug!(path = %self.path.display(), depth = self.inherited.len(), "parsing PL file");

        for (index, raw) in source.split_inclusive('\n').enumerate() {
            let line = strip_terminator(raw);
            self.state.line.clear();
            self.state.line.push_str(line);
            self.state.line_number = index + 1;
            self.parse_line(line)?;
        }

        if let Some(block) = self.state.multiline.pending() {
            return Err(ParseError::new(
                ErrorKind::Syntax,
                self.display_path(),
                block.start_line.clone(),
                block.start_line_number,
                "Unterminated multiline block",
            ));
        }

        if self.options.check_mandatory_keys {
            self.check_mandatory_keys()?;
        }

        let document = self.state.document;
        debug!(
            path = %document.path,
            keys = document.data.len(),
            warnings = document.warnings.len(),
            "parsed PL file"
        );
        Ok(document)
    }

    fn parse_line(&mut self, line: &str) -> ParseResult<()> {
        let kind = classify_line(line, self.state.multiline.is_active()).ok_or_else(|| {
            self.error(
                ErrorKind::Syntax,
                "Line does not correspond to any defined pattern",
            )
        })?;
        trace!(line_number = self.state.line_number, ?kind, "classified line");

        match kind {
            LineKind::MultilineEnd => self.end_multiline(),
            LineKind::MultilineContent => {
                self.state.multiline.push_line(line);
                Ok(())
            }
            LineKind::OneLine {
                key,
                operation,
                value,
            } => {
                let site = self.site();
                self.apply(key, operation, value, &site, "Line")
            }
            LineKind::MultilineStart { key, operation } => self.start_multiline(key, operation),
            LineKind::Extends { file } => self.extends(file),
            LineKind::FromFile {
                key,
                operation,
                file,
            } => self.from_file(key, operation, file),
            LineKind::Url { .. } => Err(self.error(
                ErrorKind::NotImplemented,
                "Import from URL is not implemented currently",
            )),
            LineKind::Component { key, component } => self.component(key, component),
            LineKind::Dependency { file, alias } => self.dependency(file, alias),
            LineKind::Comment { text } => {
                self.state.document.comments.push(text.to_string());
                Ok(())
            }
            LineKind::Blank => Ok(()),
        }
    }

    /// Coerce `raw` for `operation` and apply it to `key`. `source` names where the
    /// operand came from in JSON error messages.
    fn apply(
        &mut self,
        key: &str,
        operation: Operation,
        raw: &str,
        site: &Site,
        source: &str,
    ) -> ParseResult<()> {
        let value = match operation {
            Operation::JsonAssign => decode_json(raw).map_err(|err| {
                self.error_at(
                    site,
                    ErrorKind::Syntax,
                    format!("{source} does not correspond to a valid JSON format ({err})"),
                )
            })?,
            _ => evaluate_literal(raw),
        };

        apply_operation(&mut self.state.document, key, operation, value)
            .map_err(|err| self.error_at(site, ErrorKind::Semantic, err.to_string()))
    }

    fn start_multiline(&mut self, key: &str, operation: Operation) -> ParseResult<()> {
        let state = &mut self.state;
        let opened = state
            .multiline
            .open(key, operation, &state.line, state.line_number);
        opened.map_err(|err| {
            self.error(
                ErrorKind::Syntax,
                format!(
                    "Multiline block opened while the block from line {} is still open",
                    err.start_line_number
                ),
            )
        })
    }

    fn end_multiline(&mut self) -> ParseResult<()> {
        let Some(block) = self.state.multiline.close() else {
            return Ok(());
        };
        trace!(key = %block.key, lines = block.line_count, "closing multiline block");
        let site = Site {
            line: block.start_line,
            line_number: block.start_line_number,
        };
        self.apply(&block.key, block.operation, &block.buffer, &site, "Multiline")
    }

    fn from_file(&mut self, key: &str, operation: Operation, file: &str) -> ParseResult<()> {
        let site = self.site();
        let path = self.resolve(file)?;
        let content = fs::read_to_string(&path).map_err(|err| {
            self.error(
                ErrorKind::FileNotFound,
                format!("Could not read '{}': {err}", path.display()),
            )
        })?;
        self.apply(key, operation, &content, &site, "File")
    }

    fn component(&mut self, key: &str, name: &str) -> ParseResult<()> {
        let fragment = self.options.components.get(name).cloned().ok_or_else(|| {
            self.error(
                ErrorKind::ComponentNotFound,
                format!("Component '{name}' does not exist"),
            )
        })?;
        insert_component(&mut self.state.document, key, fragment)
            .map_err(|err| self.error(ErrorKind::Semantic, err.to_string()))
    }

    fn dependency(&mut self, file: &str, alias: Option<&str>) -> ParseResult<()> {
        let path = self.resolve(file)?;
        let alias = match alias {
            Some(alias) => alias.to_string(),
            None => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        self.state
            .document
            .dependencies
            .insert(Dependency::new(path.display().to_string(), alias));
        Ok(())
    }

    fn extends(&mut self, file: &str) -> ParseResult<()> {
        let base = self.resolve(file)?;

        if base == self.identity || self.inherited.contains(&base) {
            let chain: Vec<String> = self
                .inherited
                .iter()
                .chain(std::iter::once(&self.identity))
                .map(|path| path.display().to_string())
                .collect();
            return Err(self.error(
                ErrorKind::InheritanceLoop,
                format!(
                    "Inheritance loop detected: {} -> {}",
                    chain.join(" -> "),
                    base.display()
                ),
            ));
        }
        if self.inherited.len() + 1 > self.options.max_inheritance_depth {
            return Err(self.error(
                ErrorKind::InheritanceLoop,
                format!(
                    "Inheritance deeper than {} levels",
                    self.options.max_inheritance_depth
                ),
            ));
        }

        debug!(from = %self.path.display(), base = %base.display(), "resolving base file");
        let mut chain = self.inherited.clone();
        chain.push(self.identity.clone());
        let options = ParseOptions {
            check_mandatory_keys: false,
            ..self.options.clone()
        };
        let parsed = PlParser::new(base, self.scope, Arc::clone(&self.resolver))
            .with_options(options)
            .with_inheritance_chain(chain)
            .parse()?;

        self.state.document.merge_beneath(parsed);
        Ok(())
    }

    fn check_mandatory_keys(&self) -> ParseResult<()> {
        for key in &self.options.mandatory_keys {
            if self.state.document.get(key).is_none() {
                return Err(ParseError::new(
                    ErrorKind::MissingKey,
                    self.display_path(),
                    "",
                    0,
                    format!("Mandatory key '{key}' is missing"),
                ));
            }
        }
        Ok(())
    }

    fn resolve(&self, file: &str) -> ParseResult<PathBuf> {
        self.resolver
            .resolve(file, &self.dir, self.scope)
            .ok_or_else(|| {
                self.error(
                    ErrorKind::FileNotFound,
                    format!("File path '{file}' could not be resolved"),
                )
            })
    }

    fn site(&self) -> Site {
        Site {
            line: self.state.line.clone(),
            line_number: self.state.line_number,
        }
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(
            kind,
            self.display_path(),
            self.state.line.clone(),
            self.state.line_number,
            message,
        )
    }

    fn error_at(&self, site: &Site, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(
            kind,
            self.display_path(),
            site.line.clone(),
            site.line_number,
            message,
        )
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(_) => normalize(path),
    }
}
