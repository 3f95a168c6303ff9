//! Export manifest
//!
//! Records an export set (root, closure modules, ordered asset list) for a
//! packaging step, with a checksum over the asset list.

use crate::export::ExportSet;
use asmpack_core::{AsmpackError, ContentHash, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A module recorded in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestModule {
    pub id: String,
    pub name: String,
    pub folder: String,
}

/// Manifest describing one export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub root: ManifestModule,
    pub generated_at: String,
    /// Whether the packaging step should add per-file asset dependencies
    #[serde(default)]
    pub include_dependencies: bool,
    #[serde(default)]
    pub modules: Vec<ManifestModule>,
    #[serde(default)]
    pub assets: Vec<String>,
    pub checksum: String,
}

/// TOML wrapper
#[derive(Debug, Serialize, Deserialize)]
struct ManifestFile {
    manifest: ExportManifest,
}

impl ExportManifest {
    /// Create a manifest from an export set
    pub fn from_export(set: &ExportSet, include_dependencies: bool) -> Self {
        let module = |m: &crate::export::ExportedModule| ManifestModule {
            id: m.id.to_string(),
            name: m.name.clone(),
            folder: m.folder.clone(),
        };

        Self {
            root: module(&set.root),
            generated_at: now_iso8601(),
            include_dependencies,
            modules: set.modules.iter().map(module).collect(),
            assets: set.paths.clone(),
            checksum: checksum(&set.paths),
        }
    }

    /// Check that the stored checksum matches the asset list
    pub fn verify(&self) -> bool {
        self.checksum == checksum(&self.assets)
    }

    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: ManifestFile = toml::from_str(&content).map_err(|e| {
            AsmpackError::ManifestError(format!("Failed to parse manifest: {}", e))
        })?;
        Ok(file.manifest)
    }

    /// Save manifest to file as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = ManifestFile {
            manifest: self.clone(),
        };
        let content = toml::to_string_pretty(&file).map_err(|e| {
            AsmpackError::ManifestError(format!("Failed to serialize manifest: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Serialize manifest as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn checksum(assets: &[String]) -> String {
    ContentHash::from_lines(assets).to_prefixed_hex()
}

fn now_iso8601() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let days = (secs / 86400) as i64;
    let time_secs = secs % 86400;

    let (y, m, d) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        y,
        m,
        d,
        time_secs / 3600,
        (time_secs % 3600) / 60,
        time_secs % 60
    )
}

/// Convert days since the Unix epoch to a (year, month, day) civil date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportSet, ExportedModule};
    use asmpack_core::ModuleId;

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "asmpack_manifest_test_{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_set() -> ExportSet {
        let exported = |id: &str, name: &str| ExportedModule {
            id: ModuleId::new(id),
            name: name.to_string(),
            folder: format!("Assets/{}", name),
        };
        ExportSet {
            root: exported("3", "App"),
            modules: vec![exported("1", "Core"), exported("2", "UI")],
            paths: vec![
                "Assets/App/App.asmdef".to_string(),
                "Assets/Core/Core.asmdef".to_string(),
                "Assets/UI/UI.asmdef".to_string(),
            ],
        }
    }

    #[test]
    fn test_manifest_save_and_load() {
        let dir = temp_dir();
        let path = dir.join("nested").join("export.toml");

        let manifest = ExportManifest::from_export(&sample_set(), false);
        manifest.save(&path).unwrap();
        let loaded = ExportManifest::load(&path).unwrap();

        assert_eq!(loaded.root.name, "App");
        assert_eq!(loaded.modules.len(), 2);
        assert_eq!(loaded.modules[1].id, "2");
        assert_eq!(loaded.assets, manifest.assets);
        assert!(!loaded.include_dependencies);
        assert!(loaded.verify());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut manifest = ExportManifest::from_export(&sample_set(), true);
        assert!(manifest.include_dependencies);
        assert!(manifest.verify());

        manifest.assets.push("Assets/Extra.cs".to_string());
        assert!(!manifest.verify());
    }

    #[test]
    fn test_to_json() {
        let manifest = ExportManifest::from_export(&sample_set(), false);
        let json: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(json["root"]["name"], "App");
        assert_eq!(json["assets"].as_array().unwrap().len(), 3);
        assert!(json["checksum"].as_str().unwrap().starts_with("sha256:"));
    }

    #[test]
    fn test_load_invalid_manifest() {
        let dir = temp_dir();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[manifest]\nroot = 3\n").unwrap();
        assert!(matches!(
            ExportManifest::load(&path),
            Err(AsmpackError::ManifestError(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(20_743), (2026, 10, 17));
    }

    #[test]
    fn test_generated_at_format() {
        let stamp = now_iso8601();
        assert_eq!(stamp.len(), 20);
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[10..11], "T");
    }
}
