//! Well-known attribute keys of classpath entries.

use std::path::PathBuf;

use super::AttributeKey;
use crate::record::{Artifact, ModuleId};

/// Module the entry was resolved from.
pub const MODULE_ID: AttributeKey<ModuleId> = AttributeKey::new("moduleID");

/// Artifact the entry was resolved from.
pub const ARTIFACT: AttributeKey<Artifact> = AttributeKey::new("artifact");

/// Configuration the entry belongs to, e.g. `compile`.
pub const CONFIGURATION: AttributeKey<String> = AttributeKey::new("configuration");

/// Incremental compilation analysis stored next to a classes directory.
pub const ANALYSIS: AttributeKey<PathBuf> = AttributeKey::new("analysis");
