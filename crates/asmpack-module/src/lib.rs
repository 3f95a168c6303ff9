//! asmpack Module - Module catalog and dependency-closure resolution
//!
//! This crate loads a project's module descriptors into a read-only
//! catalog, resolves the transitive references of a root module, and maps
//! the resolved modules to the assets they own for export.

mod catalog;
mod config;
mod descriptor;
mod export;
mod lister;
mod manifest;
mod resolver;
mod types;

pub use catalog::ModuleCatalog;
pub use config::{AsmpackConfig, CatalogConfig, ExportConfig};
pub use descriptor::{folder_of, parse_descriptor, read_meta_guid};
pub use export::{build_export_set, collect_owned_assets, ExportSet, ExportedModule};
pub use lister::{AssetLister, FsAssetLister};
pub use manifest::{ExportManifest, ManifestModule};
pub use resolver::{dedup_by_name, resolve_closure, ClosureResolver};
pub use types::{DescriptorFile, Module, ReferenceToken, VersionDefine, GUID_MARKER};
