// Bundle loader backed by the asset directory of the dashboard

use crate::logging::{debug, trace};
use crate::resolve::BundleLoader;
use crate::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Loads assets found below `root`.
///
/// A file is loaded once; later requests for it complete immediately.
#[derive(Debug)]
pub struct AssetLoader {
    root: PathBuf,
    loaded: Mutex<HashSet<String>>,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            loaded: Mutex::new(HashSet::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_loaded(&self, file: &str) -> bool {
        self.loaded.lock().contains(file)
    }

    /// Loaded files, sorted
    pub fn loaded(&self) -> Vec<String> {
        let mut files: Vec<String> = self.loaded.lock().iter().cloned().collect();
        files.sort();
        files
    }
}

#[async_trait]
impl BundleLoader for AssetLoader {
    async fn load(&self, files: &[String]) -> Result<()> {
        for file in files {
            if self.is_loaded(file) {
                trace!(file = %file, "Asset already loaded");
                continue;
            }

            let path = self.root.join(file);
            let metadata = tokio::fs::metadata(&path)
                .await
                .map_err(|e| Error::BundleLoad(format!("{}: {}", path.display(), e)))?;
            if !metadata.is_file() {
                return Err(Error::BundleLoad(format!(
                    "{} is not a file",
                    path.display()
                )));
            }

            self.loaded.lock().insert(file.clone());
            debug!(file = %file, bytes = metadata.len(), "Asset loaded");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_loads_existing_files_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dialog.js"), "// js").unwrap();

        let loader = AssetLoader::new(dir.path());
        let files = vec!["dialog.js".to_string()];
        loader.load(&files).await.unwrap();
        assert!(loader.is_loaded("dialog.js"));

        std::fs::remove_file(dir.path().join("dialog.js")).unwrap();
        loader.load(&files).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());

        let err = loader.load(&["nope.css".to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::BundleLoad(_)));
        assert!(loader.loaded().is_empty());
    }

    #[tokio::test]
    async fn test_directory_is_not_an_asset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        let loader = AssetLoader::new(dir.path());

        assert!(loader.load(&["css".to_string()]).await.is_err());
    }
}
