//! asmpack Core - Foundational types for asmpack
//!
//! This crate provides the core types that all other asmpack crates depend on:
//! - `ModuleId` - Catalog-assigned module identifiers
//! - `ContentHash` - SHA-256 based content hashing
//! - Error types and Result alias

mod error;
mod hash;
mod id;

pub use error::{AsmpackError, Result};
pub use hash::ContentHash;
pub use id::ModuleId;
