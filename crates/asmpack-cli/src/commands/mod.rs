//! CLI command implementations

pub mod export;
pub mod info;
pub mod list;
pub mod resolve;

use anyhow::{Context, Result};
use asmpack_module::{AsmpackConfig, ModuleCatalog};
use std::path::PathBuf;

/// Per-invocation state: the project, its config, and the catalog snapshot
pub struct Session {
    pub project: PathBuf,
    pub config: AsmpackConfig,
    pub catalog: ModuleCatalog,
}

impl Session {
    /// Scan the project once; every command resolves against this snapshot
    pub fn load(project: PathBuf, config: AsmpackConfig) -> Result<Self> {
        if !project.is_dir() {
            anyhow::bail!("Project directory not found: {}", project.display());
        }

        let catalog = ModuleCatalog::load_from_project(&project, &config.catalog)
            .with_context(|| format!("Failed to load module catalog from {}", project.display()))?;
        tracing::info!(modules = catalog.len(), project = %project.display(), "catalog ready");

        Ok(Self {
            project,
            config,
            catalog,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::TempProject;
    use super::*;

    #[test]
    fn test_session_loads_catalog() {
        let project = TempProject::new();
        let session = project.session();
        assert_eq!(session.catalog.len(), 3);
    }

    #[test]
    fn test_session_missing_project() {
        let missing = std::env::temp_dir().join(format!("asmpack_missing_{}", uuid::Uuid::new_v4()));
        assert!(Session::load(missing, AsmpackConfig::default()).is_err());
    }
}
