//! Stable module identifiers

use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a derived identifier, matching the 32-hex-digit form of sidecar GUIDs.
const DERIVED_ID_LEN: usize = 32;

/// A catalog-assigned module identifier.
///
/// Opaque to the resolver: two identifiers are equal iff their strings are.
/// Normally read from the descriptor's `.meta` sidecar; descriptors without
/// one get an identifier derived from their project-relative path.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Create an identifier from its raw string form
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Derive an identifier from a project-relative descriptor path
    pub fn from_path(asset_path: &str) -> Self {
        let hex = ContentHash::from_str(asset_path).to_hex();
        Self(hex[..DERIVED_ID_LEN].to_string())
    }

    /// Get the raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
