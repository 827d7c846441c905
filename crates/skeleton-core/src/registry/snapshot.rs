//! Known-good registry document types

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Pinned metadata for one resolvable module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleInfo {
    /// Semantic or placeholder version string
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,

    /// Commit or content hash pinning the module
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,

    /// Source repository URI
    #[serde(deserialize_with = "null_as_default")]
    pub repo: String,

    /// Tracked branch; empty when the entry is release-pinned
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
}

/// Point-in-time snapshot of known-good module versions (`known_good.json`)
///
/// Only `modules` is interpreted. The remaining fields are provenance metadata
/// carried through for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,

    /// Module name (registry casing) to pinned metadata
    #[serde(default, deserialize_with = "null_as_default")]
    pub modules: BTreeMap<String, ModuleInfo>,

    #[serde(
        default,
        rename = "manifest_sha256",
        deserialize_with = "null_as_default"
    )]
    pub manifest_digest: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub suite: String,

    #[serde(default, rename = "duration_s", deserialize_with = "null_as_default")]
    pub duration_seconds: i64,
}

impl RegistrySnapshot {
    /// Look up a module by its exact registry name
    pub fn get(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.get(name)
    }

    /// All module names, sorted lexicographically
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
