//! Listing the assets a module owns

use asmpack_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of the asset paths stored under a folder.
///
/// Implementations return project-relative, `/`-separated paths and only
/// paths considered project-owned.
pub trait AssetLister {
    fn list_assets(&self, folder: &str) -> Result<Vec<String>>;
}

impl<F> AssetLister for F
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    fn list_assets(&self, folder: &str) -> Result<Vec<String>> {
        self(folder)
    }
}

/// Lists assets by walking the project directory.
///
/// Sub-folders are reported as assets in their own right, followed by their
/// contents; entries are visited in name order.
pub struct FsAssetLister {
    project_root: PathBuf,
    root_prefix: String,
    include_meta: bool,
}

impl FsAssetLister {
    /// Create a lister for a project; only paths under `assets_root` are kept
    pub fn new<P: AsRef<Path>>(project_root: P, assets_root: &str) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            root_prefix: format!("{}/", assets_root.trim_end_matches('/')),
            include_meta: false,
        }
    }

    /// Also report `.meta` sidecar files
    pub fn with_meta(mut self, include_meta: bool) -> Self {
        self.include_meta = include_meta;
        self
    }

    fn walk(&self, dir: &Path, rel_dir: &str, out: &mut Vec<String>) -> Result<()> {
        let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !self.include_meta && file_name.ends_with(".meta") {
                continue;
            }

            let rel_path = format!("{}/{}", rel_dir, file_name);
            let is_dir = entry.file_type()?.is_dir();
            if rel_path.starts_with(&self.root_prefix) {
                out.push(rel_path.clone());
            }
            if is_dir {
                self.walk(&entry.path(), &rel_path, out)?;
            }
        }

        Ok(())
    }
}

impl AssetLister for FsAssetLister {
    fn list_assets(&self, folder: &str) -> Result<Vec<String>> {
        let folder = folder.trim_end_matches('/');
        let dir = self.project_root.join(folder);
        let mut assets = Vec::new();
        if dir.is_dir() {
            self.walk(&dir, folder, &mut assets)?;
        }
        Ok(assets)
    }
}
