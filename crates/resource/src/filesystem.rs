//! Assets rooted at a directory on disk.
//!
//! Every path is resolved relative to the assets root. Absolute paths and
//! paths escaping the root resolve to nothing, so a hostile signature path
//! in a handover record cannot read outside the assets tree.

use nuzum_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

/// Bytes of cacheable assets, shared by every provider in the process.
fn process_cache() -> &'static RwLock<HashMap<PathBuf, SharedResourceData>> {
    static CACHE: OnceLock<RwLock<HashMap<PathBuf, SharedResourceData>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    canonical_base: Option<PathBuf>,
    cached: HashSet<String>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // fails when the directory does not exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
            cached: HashSet::new(),
        }
    }

    /// Marks `path` as loaded once per process, then served from memory.
    pub fn with_cached(mut self, path: impl Into<String>) -> Self {
        self.cached.insert(path.into());
        self
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// `None` when the path would leave the assets root.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // Not on disk (yet): reject any parent-directory component outright.
        let escapes = Path::new(path)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));
        (!escapes).then_some(full_path)
    }

    fn read(&self, path: &str, full_path: &Path) -> Result<SharedResourceData, ResourceError> {
        std::fs::read(full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn load_cached(&self, path: &str, full_path: &Path) -> Result<SharedResourceData, ResourceError> {
        let key = self.base_path.join(path);
        if let Ok(cache) = process_cache().read()
            && let Some(data) = cache.get(&key)
        {
            return Ok(Arc::clone(data));
        }

        let data = self.read(path, full_path)?;
        if let Ok(mut cache) = process_cache().write() {
            log::debug!("Caching asset {} ({} bytes)", key.display(), data.len());
            cache.insert(key, Arc::clone(&data));
        }
        Ok(data)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside assets root)", path)))?;

        if self.cached.contains(path) {
            self.load_cached(path, &full_path)
        } else {
            self.read(path, &full_path)
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_nested_asset() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("signatures")).unwrap();
        fs::write(dir.path().join("signatures/a.png"), b"sig").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists("signatures/a.png"));
        assert_eq!(&*provider.load("signatures/a.png").unwrap(), b"sig");
    }

    #[test]
    fn missing_asset_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(matches!(provider.load("images/logo.png"), Err(ResourceError::NotFound(_))));
        assert!(!provider.exists("images/logo.png"));
    }

    #[test]
    fn directories_are_not_assets() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(!provider.exists("images"));
    }

    #[test]
    fn blocks_paths_outside_root() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        assert!(provider.load("../../../etc/passwd").is_err());
        assert!(!provider.exists("/etc/passwd"));
        assert!(!provider.exists("foo/../../../bar"));
    }

    #[test]
    fn cached_asset_survives_deletion() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"logo-v1").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path()).with_cached("logo.png");
        assert_eq!(&*provider.load("logo.png").unwrap(), b"logo-v1");

        fs::remove_file(dir.path().join("logo.png")).unwrap();
        assert_eq!(&*provider.load("logo.png").unwrap(), b"logo-v1");

        let uncached = FilesystemResourceProvider::new(dir.path());
        assert!(uncached.load("logo.png").is_err());
    }
}
