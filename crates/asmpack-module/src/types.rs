//! Module and reference type definitions

use asmpack_core::ModuleId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker that turns a reference token into an identifier reference
pub const GUID_MARKER: &str = "GUID:";

/// A reference from one module to another, as written in a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReferenceToken {
    /// Reference by catalog identifier (`GUID:<id>`)
    ById(ModuleId),
    /// Reference by display name
    ByName(String),
}

impl ReferenceToken {
    /// Parse a raw token. Any token containing `GUID:` is an identifier
    /// reference; the identifier is the token with the marker removed.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(GUID_MARKER) {
            ReferenceToken::ById(ModuleId::new(raw.replace(GUID_MARKER, "")))
        } else {
            ReferenceToken::ByName(raw.to_string())
        }
    }

    /// The name this token refers to, if it is a name reference
    pub fn as_name(&self) -> Option<&str> {
        match self {
            ReferenceToken::ByName(name) => Some(name),
            ReferenceToken::ById(_) => None,
        }
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceToken::ById(id) => write!(f, "{}{}", GUID_MARKER, id),
            ReferenceToken::ByName(name) => f.write_str(name),
        }
    }
}

impl From<String> for ReferenceToken {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ReferenceToken> for String {
    fn from(token: ReferenceToken) -> Self {
        token.to_string()
    }
}

/// A conditional define entry in a descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionDefine {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub define: String,
}

/// JSON layout of an `.asmdef` descriptor file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorFile {
    pub name: String,
    #[serde(default)]
    pub root_namespace: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub include_platforms: Vec<String>,
    #[serde(default)]
    pub exclude_platforms: Vec<String>,
    #[serde(default)]
    pub allow_unsafe_code: bool,
    #[serde(default)]
    pub override_references: bool,
    #[serde(default)]
    pub precompiled_references: Vec<String>,
    #[serde(default = "default_true")]
    pub auto_referenced: bool,
    #[serde(default)]
    pub define_constraints: Vec<String>,
    #[serde(default)]
    pub version_defines: Vec<VersionDefine>,
    #[serde(default)]
    pub no_engine_references: bool,
}

fn default_true() -> bool {
    true
}

/// A node in the dependency graph
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    /// Catalog-assigned identifier
    pub id: ModuleId,
    /// Display name; not guaranteed unique across a catalog
    pub name: String,
    /// Declared references, in descriptor order
    pub references: Vec<ReferenceToken>,
    /// Project-relative folder owning this module's assets
    pub folder: String,
    /// Project-relative path of the descriptor itself
    pub asset_path: String,
    /// Remaining descriptor fields
    #[serde(skip)]
    pub descriptor: DescriptorFile,
}

impl Module {
    /// Build a module with only the fields the resolver needs
    pub fn new(id: impl Into<ModuleId>, name: &str, references: &[&str], folder: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            references: references.iter().map(|r| ReferenceToken::parse(r)).collect(),
            folder: folder.to_string(),
            asset_path: format!("{}/{}.asmdef", folder, name),
            descriptor: DescriptorFile {
                name: name.to_string(),
                references: references.iter().map(|r| r.to_string()).collect(),
                auto_referenced: true,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guid_token() {
        let token = ReferenceToken::parse("GUID:6055be8ebefd69e48b49212b09b47b2f");
        assert_eq!(
            token,
            ReferenceToken::ById(ModuleId::new("6055be8ebefd69e48b49212b09b47b2f"))
        );
    }

    #[test]
    fn test_parse_name_token() {
        let token = ReferenceToken::parse("Unity.TextMeshPro");
        assert_eq!(token, ReferenceToken::ByName("Unity.TextMeshPro".to_string()));
        assert_eq!(token.as_name(), Some("Unity.TextMeshPro"));
    }

    #[test]
    fn test_marker_anywhere_is_identifier() {
        let token = ReferenceToken::parse("x-GUID:abc");
        assert_eq!(token, ReferenceToken::ById(ModuleId::new("x-abc")));
    }

    #[test]
    fn test_empty_guid_token() {
        let token = ReferenceToken::parse("GUID:");
        assert_eq!(token, ReferenceToken::ById(ModuleId::new("")));
    }

    #[test]
    fn test_display_restores_raw() {
        assert_eq!(ReferenceToken::parse("GUID:abc").to_string(), "GUID:abc");
        assert_eq!(ReferenceToken::parse("Core").to_string(), "Core");
    }

    #[test]
    fn test_token_serde_as_string() {
        let tokens: Vec<ReferenceToken> =
            serde_json::from_str(r#"["GUID:abc", "Core"]"#).unwrap();
        assert!(matches!(&tokens[0], ReferenceToken::ById(id) if id.as_str() == "abc"));
        assert!(matches!(&tokens[1], ReferenceToken::ByName(n) if n == "Core"));
        assert_eq!(
            serde_json::to_string(&tokens).unwrap(),
            r#"["GUID:abc","Core"]"#
        );
    }

    #[test]
    fn test_descriptor_defaults() {
        let file: DescriptorFile = serde_json::from_str(r#"{ "name": "Core" }"#).unwrap();
        assert_eq!(file.name, "Core");
        assert!(file.references.is_empty());
        assert!(file.auto_referenced);
        assert!(!file.allow_unsafe_code);
    }

    #[test]
    fn test_descriptor_full() {
        let json = r#"{
            "name": "Game.UI",
            "rootNamespace": "Game.UI",
            "references": ["GUID:abc", "Game.Core"],
            "includePlatforms": ["Editor"],
            "excludePlatforms": [],
            "allowUnsafeCode": true,
            "overrideReferences": false,
            "precompiledReferences": [],
            "autoReferenced": false,
            "defineConstraints": ["UNITY_INCLUDE_TESTS"],
            "versionDefines": [
                { "name": "com.unity.inputsystem", "expression": "1.0.0", "define": "HAS_INPUT" }
            ],
            "noEngineReferences": false
        }"#;
        let file: DescriptorFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.root_namespace, "Game.UI");
        assert_eq!(file.references, vec!["GUID:abc", "Game.Core"]);
        assert_eq!(file.include_platforms, vec!["Editor"]);
        assert!(file.allow_unsafe_code);
        assert!(!file.auto_referenced);
        assert_eq!(file.version_defines[0].define, "HAS_INPUT");
    }
}
