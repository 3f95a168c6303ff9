//! Module catalog: the read-only snapshot of every known module

use crate::config::CatalogConfig;
use crate::descriptor::{parse_descriptor, read_meta_guid};
use crate::types::{Module, ReferenceToken};
use asmpack_core::{AsmpackError, ModuleId, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Snapshot of all modules known for one session.
///
/// Order is significant: name references match the first eligible module in
/// catalog order. Built once by the caller and passed to every resolution.
#[derive(Debug, Default, Clone)]
pub struct ModuleCatalog {
    modules: Vec<Module>,
}

impl ModuleCatalog {
    /// Create a catalog from already-parsed modules, keeping their order
    pub fn from_modules(modules: Vec<Module>) -> Self {
        let catalog = Self { modules };
        catalog.warn_duplicate_names();
        catalog
    }

    /// Scan `<project_root>/<assets_root>` for module descriptors.
    ///
    /// Directories are walked in name order so the catalog order is stable
    /// across runs. A missing assets root yields an empty catalog.
    pub fn load_from_project<P: AsRef<Path>>(project_root: P, config: &CatalogConfig) -> Result<Self> {
        let project_root = project_root.as_ref();
        let mut modules = Vec::new();
        let assets_root = config.assets_root.trim_end_matches('/');
        let root = project_root.join(assets_root);
        Self::scan_directory(&mut modules, &root, assets_root, config)?;
        debug!(
            count = modules.len(),
            root = %root.display(),
            "loaded module catalog"
        );
        Ok(Self::from_modules(modules))
    }

    fn scan_directory(
        modules: &mut Vec<Module>,
        dir: &Path,
        rel_dir: &str,
        config: &CatalogConfig,
    ) -> Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }

        let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let rel_path = format!("{}/{}", rel_dir, file_name);

            if path.is_dir() {
                Self::scan_directory(modules, &path, &rel_path, config)?;
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == config.descriptor_extension)
                .unwrap_or(false)
            {
                let content = fs::read_to_string(&path)?;
                let id = Self::sidecar_id(&path).unwrap_or_else(|| {
                    debug!(path = %rel_path, "no sidecar identifier, deriving from path");
                    ModuleId::from_path(&rel_path)
                });
                modules.push(parse_descriptor(&content, &rel_path, id)?);
            }
        }

        Ok(())
    }

    fn sidecar_id(descriptor_path: &Path) -> Option<ModuleId> {
        let mut meta_path = descriptor_path.as_os_str().to_owned();
        meta_path.push(".meta");
        let meta = fs::read_to_string(meta_path).ok()?;
        read_meta_guid(&meta)
    }

    fn warn_duplicate_names(&self) {
        for (name, ids) in self.duplicate_names() {
            warn!(
                name,
                count = ids.len(),
                "ambiguous module name; name references pick the first match in catalog order"
            );
        }
    }

    /// All modules in catalog order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Get a module by identifier
    pub fn get_by_id(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    /// Get the first module with the given display name
    pub fn get_by_name(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Get a module by its descriptor path (project-relative, either separator)
    pub fn find_by_path(&self, asset_path: &str) -> Option<&Module> {
        let normalized = asset_path.replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");
        self.modules.iter().find(|m| m.asset_path == normalized)
    }

    /// Resolve a root selector: a descriptor path, `GUID:<id>`, or a display name
    pub fn select(&self, selector: &str) -> Result<&Module> {
        if selector.trim().is_empty() {
            return Err(AsmpackError::InvalidSelection(
                "empty module selector".to_string(),
            ));
        }

        if let Some(module) = self.find_by_path(selector) {
            return Ok(module);
        }

        let found = match ReferenceToken::parse(selector) {
            ReferenceToken::ById(id) => self.get_by_id(&id),
            ReferenceToken::ByName(name) => {
                if self.modules.iter().filter(|m| m.name == name).count() > 1 {
                    warn!(name = %name, "selector matches several modules, using the first");
                }
                self.get_by_name(&name)
            }
        };

        found.ok_or_else(|| AsmpackError::ModuleNotFound(selector.to_string()))
    }

    /// Display names shared by more than one module, with their identifiers,
    /// in order of first appearance
    pub fn duplicate_names(&self) -> Vec<(&str, Vec<&ModuleId>)> {
        let mut by_name: HashMap<&str, Vec<&ModuleId>> = HashMap::new();
        let mut order = Vec::new();
        for module in &self.modules {
            let ids = by_name.entry(module.name.as_str()).or_default();
            if ids.is_empty() {
                order.push(module.name.as_str());
            }
            ids.push(&module.id);
        }

        order
            .into_iter()
            .filter_map(|name| {
                by_name
                    .remove(name)
                    .filter(|ids| ids.len() > 1)
                    .map(|ids| (name, ids))
            })
            .collect()
    }

    /// Whether more than one module carries this display name
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.modules.iter().filter(|m| m.name == name).nth(1).is_some()
    }

    /// Get the number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
