//! Where asset bytes come from.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use crate::error::LoadError;

/// A byte source for asset paths. Implementations are shared with the loader
/// threads, so they must be `Send + Sync`.
pub trait AssetSource: Send + Sync {
    /// Fetch the raw bytes stored under `path`.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}

// ---------------------------------------------------------------------------
// FsAssetSource
// ---------------------------------------------------------------------------

/// Reads assets from disk.
///
/// Root-style paths (`/earth.jpg`) resolve against `root`; bare names
/// (`earth.jpg`) resolve against the relative base, which defaults to the
/// same directory.
#[derive(Clone, Debug)]
pub struct FsAssetSource {
    root: PathBuf,
    relative_base: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            relative_base: root.clone(),
            root,
        }
    }

    /// Resolve bare names against a different directory.
    pub fn with_relative_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.relative_base = base.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an asset path onto the filesystem. Paths that try to climb out of
    /// their base directory are rejected.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let (base, rest) = match path.strip_prefix('/') {
            Some(rest) => (&self.root, rest),
            None => (&self.relative_base, path),
        };
        let rest = Path::new(rest);
        if rest.as_os_str().is_empty()
            || rest
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(base.join(rest))
    }
}

impl AssetSource for FsAssetSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| LoadError::NotFound(path.to_string()))?;
        std::fs::read(&full).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_string()),
            _ => LoadError::Io { path: full, source },
        })
    }
}

// ---------------------------------------------------------------------------
// MemoryAssetSource
// ---------------------------------------------------------------------------

/// In-memory source keyed by exact path. Records every fetch so tests can
/// check which paths were attempted and in what order.
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    files: HashMap<String, Vec<u8>>,
    fetched: Mutex<Vec<String>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    /// Every path passed to [`fetch`](AssetSource::fetch), in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        if let Ok(mut log) = self.fetched.lock() {
            log.push(path.to_string());
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_string()))
    }
}
