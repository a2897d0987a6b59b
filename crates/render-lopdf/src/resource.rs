//! Loads image resources from a directory on disk.
//!
//! Names are resolved relative to the base directory and must stay inside it:
//! absolute paths and `..` components are refused.

use petty_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct DirectoryResourceProvider {
    base_path: PathBuf,
    canonical_base: Option<PathBuf>,
}

impl DirectoryResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();
        let canonical_base = base_path.canonicalize().ok();
        Self {
            base_path,
            canonical_base,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let full_path = self.base_path.join(relative);
        // Symlinks can still point outside the base.
        if let (Ok(canonical), Some(base)) = (full_path.canonicalize(), &self.canonical_base) {
            return canonical.starts_with(base).then_some(canonical);
        }
        Some(full_path)
    }
}

impl ResourceProvider for DirectoryResourceProvider {
    fn load(&self, name: &str) -> Result<SharedResourceData, ResourceError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside resource directory)", name)))?;

        std::fs::read(&path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(name.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|path| path.is_file())
    }

    fn name(&self) -> &'static str {
        "DirectoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_files_inside_base() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/dot.png"), b"png bytes").unwrap();

        let provider = DirectoryResourceProvider::new(dir.path());
        assert_eq!(&*provider.load("img/dot.png").unwrap(), b"png bytes");
        assert!(provider.exists("img/dot.png"));
        assert!(!provider.exists("img"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = DirectoryResourceProvider::new(dir.path());
        assert!(matches!(provider.load("nope.png"), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn refuses_to_leave_base() {
        let dir = tempdir().unwrap();
        let provider = DirectoryResourceProvider::new(dir.path());

        assert!(provider.load("../../../etc/passwd").is_err());
        assert!(provider.load("/etc/passwd").is_err());
        assert!(!provider.exists("img/../../secret"));
    }
}
