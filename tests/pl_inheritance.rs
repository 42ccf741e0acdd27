//! Inheritance across files written to a temporary directory

use pl_parser::pl::testing::lenient_options;
use pl_parser::{ErrorKind, FsLocationResolver, ParseOptions, PlParser, ScopeIds, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn parse(path: &Path, options: ParseOptions) -> Result<pl_parser::Document, pl_parser::ParseError> {
    PlParser::new(path, ScopeIds::default(), Arc::new(FsLocationResolver))
        .with_options(options)
        .parse()
}

#[test]
fn test_child_wins_over_base() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.pl", "a = base\nb = base\nnested.x = 1\nnested.y = 1\n");
    let child = write(
        &dir,
        "child.pl",
        "a = before\nextends = base.pl\nb = after\nnested.y = 2\n",
    );

    let doc = parse(&child, lenient_options()).unwrap();
    // Set before the extends line, still wins
    assert_eq!(doc.get("a"), Some(&Value::from("before")));
    assert_eq!(doc.get("b"), Some(&Value::from("after")));
    assert_eq!(doc.get("nested.x"), Some(&Value::Integer(1)));
    assert_eq!(doc.get("nested.y"), Some(&Value::Integer(2)));
}

#[test]
fn test_chain_through_subdirectories() {
    let dir = TempDir::new().unwrap();
    write(&dir, "templates/root.pl", "level = root\nroot_only = 1\n");
    write(
        &dir,
        "templates/middle.pl",
        "template = root.pl\nlevel = middle\n",
    );
    let leaf = write(
        &dir,
        "exercises/leaf.pl",
        "extends = ../templates/middle.pl\nlevel + /leaf\n",
    );

    let doc = parse(&leaf, lenient_options()).unwrap();
    assert_eq!(doc.get("level"), Some(&Value::from("middle/leaf")));
    assert_eq!(doc.get("root_only"), Some(&Value::Integer(1)));
}

#[test]
fn test_base_files_skip_mandatory_keys() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.pl", "author = someone\nversion = 2\n");
    let child = write(
        &dir,
        "child.pl",
        "extends = base.pl\ntitle = t\nstatement = s\n",
    );

    let doc = parse(&child, ParseOptions::default()).unwrap();
    assert_eq!(doc.get("version"), Some(&Value::Integer(2)));
}

#[test]
fn test_three_file_loop() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.pl", "extends = b.pl\n");
    write(&dir, "b.pl", "extends = c.pl\n");
    let c = write(&dir, "c.pl", "x = 1\nextends = a.pl\n");

    let err = parse(&c, lenient_options()).unwrap_err();
    assert!(err.is(ErrorKind::InheritanceLoop), "{err}");
    assert!(err.path.ends_with("b.pl"), "{err}");
}

#[test]
fn test_depth_limit() {
    let dir = TempDir::new().unwrap();
    write(&dir, "d0.pl", "x = 0\n");
    write(&dir, "d1.pl", "extends = d0.pl\n");
    write(&dir, "d2.pl", "extends = d1.pl\n");
    let top = write(&dir, "d3.pl", "extends = d2.pl\n");

    let shallow = ParseOptions {
        max_inheritance_depth: 2,
        ..lenient_options()
    };
    let err = parse(&top, shallow).unwrap_err();
    assert!(err.is(ErrorKind::InheritanceLoop));

    let deep = ParseOptions {
        max_inheritance_depth: 3,
        ..lenient_options()
    };
    assert_eq!(parse(&top, deep).unwrap().get("x"), Some(&Value::Integer(0)));
}

#[test]
fn test_errors_in_base_report_the_base() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.pl", "ok = 1\nbroken line here\n");
    let child = write(&dir, "child.pl", "extends = base.pl\n");

    let err = parse(&child, lenient_options()).unwrap_err();
    assert!(err.is(ErrorKind::Syntax));
    assert_eq!(err.path, base.display().to_string());
    assert_eq!(err.line_number, 2);
}

#[test]
fn test_custom_resolver_receives_scope() {
    let dir = TempDir::new().unwrap();
    let lib = write(&dir, "store/42/lib.py", "x = 1\n");
    let file = write(&dir, "exercise.pl", "@ lib:/lib.py\n");

    let store = dir.path().join("store");
    let resolver = move |target: &str, _base: &Path, scope: ScopeIds| -> Option<PathBuf> {
        let name = target.strip_prefix("lib:/")?;
        let path = store.join(scope.resource_id.to_string()).join(name);
        path.exists().then_some(path)
    };

    let doc = PlParser::new(&file, ScopeIds::new(42, 0), Arc::new(resolver))
        .with_options(lenient_options())
        .parse()
        .unwrap();
    let dep = doc.dependencies.iter().next().unwrap();
    assert_eq!(dep.path, lib.display().to_string());
    assert_eq!(dep.alias, "lib.py");
}
