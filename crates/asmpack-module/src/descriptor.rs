//! Descriptor and sidecar parsing

use crate::types::{DescriptorFile, Module, ReferenceToken};
use asmpack_core::{AsmpackError, ModuleId, Result};

/// Parse a raw `.asmdef` descriptor into a module record.
///
/// `asset_path` is the project-relative, `/`-separated path of the
/// descriptor; the module's owned folder is its parent.
pub fn parse_descriptor(raw: &str, asset_path: &str, id: ModuleId) -> Result<Module> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let descriptor: DescriptorFile =
        serde_json::from_str(text).map_err(|e| AsmpackError::DescriptorParse {
            path: asset_path.to_string(),
            message: e.to_string(),
        })?;

    let references = descriptor
        .references
        .iter()
        .map(|r| ReferenceToken::parse(r))
        .collect();

    Ok(Module {
        id,
        name: descriptor.name.clone(),
        references,
        folder: folder_of(asset_path).to_string(),
        asset_path: asset_path.to_string(),
        descriptor,
    })
}

/// Read the `guid:` entry from a `.meta` sidecar
pub fn read_meta_guid(meta: &str) -> Option<ModuleId> {
    meta.lines()
        .filter_map(|line| line.trim().strip_prefix("guid:"))
        .map(str::trim)
        .find(|guid| !guid.is_empty())
        .map(|guid| ModuleId::new(guid))
}

/// Containing folder of a project-relative path, or `""` at the top level
pub fn folder_of(asset_path: &str) -> &str {
    asset_path
        .rfind('/')
        .map(|i| &asset_path[..i])
        .unwrap_or("")
}
