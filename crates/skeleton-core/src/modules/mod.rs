//! Module resolution
//!
//! This module provides:
//! - Module name normalization to the canonical prefix
//! - Resolution against the registry snapshot
//! - The latest-commit fallback for modules missing from the registry
//! - Named module presets

pub mod presets;
pub mod resolver;
pub mod revision;

pub use presets::{ModulePreset, ModulePresets};
pub use resolver::{normalize_module_name, repo_name, ModuleResolver, ResolvedModuleSet};
pub use revision::{LookupError, RevisionLookup};
