//! Module name normalization and resolution against the registry

use super::revision::{RevisionLookup, FALLBACK_BRANCH};
use crate::error::{Result, ScaffoldError};
use crate::registry::{ModuleInfo, RegistrySnapshot};
use std::collections::BTreeMap;

/// Version recorded for modules resolved through the fallback lookup
pub const FALLBACK_VERSION: &str = "0.1.0";

/// Canonical module name to pinned metadata, ordered by name
pub type ResolvedModuleSet = BTreeMap<String, ModuleInfo>;

/// Prefix a module name with the canonical prefix unless it already carries it.
///
/// Blank input, or the bare prefix, normalizes to an empty string. Applying this
/// twice yields the same result as applying it once.
pub fn normalize_module_name(prefix: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() || name == prefix {
        return String::new();
    }
    if name.starts_with(prefix) {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    }
}

/// Repository name used for the remote lookup (canonical prefix stripped)
pub fn repo_name<'a>(prefix: &str, name: &'a str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// Resolves requested module names against a registry snapshot
pub struct ModuleResolver<'a> {
    prefix: &'a str,
    lookup: &'a RevisionLookup,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(prefix: &'a str, lookup: &'a RevisionLookup) -> Self {
        Self { prefix, lookup }
    }

    /// Resolve a single, already normalized module name
    pub async fn resolve_one(&self, name: &str, snapshot: &RegistrySnapshot) -> Result<ModuleInfo> {
        if let Some(info) = snapshot.get(name) {
            tracing::debug!(module = name, version = %info.version, "Resolved from registry");
            return Ok(info.clone());
        }

        let repo = repo_name(self.prefix, name);
        tracing::info!(module = name, repo, "Not in registry, looking up latest commit");

        let hash = self
            .lookup
            .latest_main_commit(repo)
            .await
            .map_err(|source| ScaffoldError::UnresolvedModule {
                module: name.to_string(),
                source,
            })?;

        Ok(ModuleInfo {
            version: FALLBACK_VERSION.to_string(),
            hash,
            repo: self.lookup.repo_uri(repo),
            branch: FALLBACK_BRANCH.to_string(),
        })
    }

    /// Resolve every requested name. Any failed fallback aborts the whole set.
    pub async fn resolve_modules<S: AsRef<str>>(
        &self,
        names: &[S],
        snapshot: &RegistrySnapshot,
    ) -> Result<ResolvedModuleSet> {
        let mut selected = ResolvedModuleSet::new();

        for name in names {
            let module_name = normalize_module_name(self.prefix, name.as_ref());
            if module_name.is_empty() {
                tracing::warn!("Skipping blank module name");
                continue;
            }
            if selected.contains_key(&module_name) {
                continue;
            }

            let info = self.resolve_one(&module_name, snapshot).await?;
            selected.insert(module_name, info);
        }

        Ok(selected)
    }
}
