//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `ASMPACK_ASSETS_ROOT`, `ASMPACK_INCLUDE_META`, `ASMPACK_LOG`
//! 2. Project-local: `<project>/.asmpack/config.toml`
//! 3. Global: `~/.asmpack/config.toml`

use asmpack_core::{AsmpackError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalog scanning settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Project-relative folder scanned for descriptors; also the prefix
    /// every project-owned asset path must start with
    pub assets_root: String,
    /// File extension of module descriptors, without the dot
    pub descriptor_extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            assets_root: "Assets".to_string(),
            descriptor_extension: "asmdef".to_string(),
        }
    }
}

/// Export step settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub include_meta: bool,
    /// Recorded on the manifest for the packaging step; asmpack itself never
    /// follows per-file asset dependencies
    pub include_dependencies: bool,
    pub dedup_paths: bool,
    pub output: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_meta: false,
            include_dependencies: false,
            dedup_paths: false,
            output: "build/export.toml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogSection {
    #[serde(default)]
    assets_root: Option<String>,
    #[serde(default)]
    descriptor_extension: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExportSection {
    #[serde(default)]
    include_meta: Option<bool>,
    #[serde(default)]
    include_dependencies: Option<bool>,
    #[serde(default)]
    dedup_paths: Option<bool>,
    #[serde(default)]
    output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LogSection {
    #[serde(default)]
    filter: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    catalog: CatalogSection,
    #[serde(default)]
    export: ExportSection,
    #[serde(default)]
    log: LogSection,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct AsmpackConfig {
    pub catalog: CatalogConfig,
    pub export: ExportConfig,
    /// Log filter directive (e.g. "debug", "asmpack_module=trace")
    pub log_filter: Option<String>,
}

impl AsmpackConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        // Layer 1: Global config (~/.asmpack/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        // Layer 2: Project-local config (<project>/.asmpack/config.toml)
        let local_path = project_root.join(".asmpack").join("config.toml");
        if local_path.exists() {
            config.merge(Self::load_file(&local_path)?);
        }

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Load config from a specific file path only, without environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::load_file(path)?);
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".asmpack").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            AsmpackError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge(&mut self, overlay: ConfigFile) {
        if let Some(root) = overlay.catalog.assets_root {
            self.catalog.assets_root = root;
        }
        if let Some(ext) = overlay.catalog.descriptor_extension {
            self.catalog.descriptor_extension = ext.trim_start_matches('.').to_string();
        }

        if let Some(v) = overlay.export.include_meta {
            self.export.include_meta = v;
        }
        if let Some(v) = overlay.export.include_dependencies {
            self.export.include_dependencies = v;
        }
        if let Some(v) = overlay.export.dedup_paths {
            self.export.dedup_paths = v;
        }
        if let Some(output) = overlay.export.output {
            self.export.output = output;
        }

        if overlay.log.filter.is_some() {
            self.log_filter = overlay.log.filter;
        }
    }

    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("ASMPACK_ASSETS_ROOT") {
            self.catalog.assets_root = root;
        }
        if let Some(flag) = lookup("ASMPACK_INCLUDE_META") {
            self.export.include_meta = matches!(flag.as_str(), "1" | "true" | "yes");
        }
        if let Some(filter) = lookup("ASMPACK_LOG") {
            self.log_filter = Some(filter);
        }
    }
}
