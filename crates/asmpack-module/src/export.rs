//! Export set assembly: a root module's assets plus those of its closure

use crate::catalog::ModuleCatalog;
use crate::lister::AssetLister;
use crate::resolver::ClosureResolver;
use crate::types::Module;
use asmpack_core::{ModuleId, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// A module included in an export, by reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedModule {
    pub id: ModuleId,
    pub name: String,
    pub folder: String,
}

impl From<&Module> for ExportedModule {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id.clone(),
            name: module.name.clone(),
            folder: module.folder.clone(),
        }
    }
}

/// Everything a packaging step needs for one root module
#[derive(Debug, Clone, Serialize)]
pub struct ExportSet {
    pub root: ExportedModule,
    /// Closure modules in discovery order, excluding the root unless it is
    /// reachable from its own references
    pub modules: Vec<ExportedModule>,
    /// Root assets first, then each closure module's assets
    pub paths: Vec<String>,
}

impl ExportSet {
    /// Drop repeated paths, keeping the first occurrence
    pub fn dedup_paths(&mut self) {
        let mut seen = HashSet::new();
        self.paths.retain(|p| seen.insert(p.clone()));
    }

    /// Consume the set, keeping only the path list
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

/// Concatenate the owned assets of each module, in module order.
///
/// Paths are passed through as the lister returns them; overlapping
/// folders produce repeated paths.
pub fn collect_owned_assets<L>(modules: &[&Module], lister: &L) -> Result<Vec<String>>
where
    L: AssetLister + ?Sized,
{
    let mut paths = Vec::new();
    for module in modules {
        let owned = lister.list_assets(&module.folder)?;
        debug!(module = %module.name, folder = %module.folder, count = owned.len(), "collected assets");
        paths.extend(owned);
    }
    Ok(paths)
}

/// Build the export set for `root`: its own assets followed by the assets of
/// every module in its reference closure
pub fn build_export_set<L>(root: &Module, catalog: &ModuleCatalog, lister: &L) -> Result<ExportSet>
where
    L: AssetLister + ?Sized,
{
    let mut paths = collect_owned_assets(&[root], lister)?;

    let closure = ClosureResolver::new(catalog).resolve_closure(&root.references);
    paths.extend(collect_owned_assets(&closure, lister)?);

    debug!(
        root = %root.name,
        modules = closure.len(),
        paths = paths.len(),
        "built export set"
    );

    Ok(ExportSet {
        root: root.into(),
        modules: closure.into_iter().map(ExportedModule::from).collect(),
        paths,
    })
}
