//! Testing utilities
//!
//! PL sources used by the integration tests live in `tests/fixtures/`. Load them through
//! these helpers rather than spelling paths out, so relative references inside the fixtures
//! (`extends`, `=@`, `@`) resolve against the fixture directory.

use crate::pl::document::Document;
use crate::pl::error::ParseResult;
use crate::pl::location::{FsLocationResolver, ScopeIds};
use crate::pl::parsing::{ParseOptions, PlParser};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory holding the PL fixtures
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Options that skip the mandatory keys check; most fixtures are fragments
pub fn lenient_options() -> ParseOptions {
    ParseOptions {
        check_mandatory_keys: false,
        ..ParseOptions::default()
    }
}

/// Parse a fixture without the mandatory keys check
pub fn parse_fixture(name: &str) -> ParseResult<Document> {
    parse_fixture_with(name, lenient_options())
}

pub fn parse_fixture_with(name: &str, options: ParseOptions) -> ParseResult<Document> {
    PlParser::new(fixture_path(name), ScopeIds::default(), Arc::new(FsLocationResolver))
        .with_options(options)
        .parse()
}
