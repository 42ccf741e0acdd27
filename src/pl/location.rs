//! Location resolution
//!
//! Every file-valued reference in a PL file (`=@` family, `extends`/`template`, `@`
//! dependencies) is turned into an absolute path by a [`LocationResolver`]. The parser never
//! interprets the references itself, which lets hosts map them onto their own storage.
//! [`FsLocationResolver`] handles plain absolute and relative filesystem paths.

use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Opaque identifiers of the scope a file is parsed in (resource and circle).
///
/// They are threaded through to the resolver untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeIds {
    pub resource_id: i64,
    pub circle_id: i64,
}

impl ScopeIds {
    pub fn new(resource_id: i64, circle_id: i64) -> Self {
        ScopeIds {
            resource_id,
            circle_id,
        }
    }
}

/// Resolves a reference found in a PL file to an absolute path.
///
/// `base_dir` is the directory of the file containing the reference. `None` means the
/// reference could not be resolved; the parser reports it as a file-not-found error.
pub trait LocationResolver {
    fn resolve(&self, target: &str, base_dir: &Path, scope: ScopeIds) -> Option<PathBuf>;
}

/// Resolver handle shared by a parser and the base files it pulls in
pub type SharedResolver = Arc<dyn LocationResolver + Send + Sync>;

impl<F> LocationResolver for F
where
    F: Fn(&str, &Path, ScopeIds) -> Option<PathBuf>,
{
    fn resolve(&self, target: &str, base_dir: &Path, scope: ScopeIds) -> Option<PathBuf> {
        self(target, base_dir, scope)
    }
}

/// Plain filesystem resolution: absolute paths as-is, relative paths against `base_dir`.
/// Paths that do not exist do not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLocationResolver;

impl LocationResolver for FsLocationResolver {
    fn resolve(&self, target: &str, base_dir: &Path, _scope: ScopeIds) -> Option<PathBuf> {
        let target = Path::new(target);
        let joined = if target.is_absolute() {
            target.to_path_buf()
        } else {
            base_dir.join(target)
        };
        let absolute = if joined.is_absolute() {
            joined
        } else {
            std::env::current_dir().ok()?.join(joined)
        };

        let resolved = normalize(&absolute);
        resolved.exists().then_some(resolved)
    }
}

/// Lexically remove `.` and `..` components
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
