//! Known-good module registry
//!
//! This module provides:
//! - Registry document types (RegistrySnapshot, ModuleInfo)
//! - Loading from a local path or an HTTP(S) URL

pub mod loader;
pub mod snapshot;

pub use loader::{parse_snapshot, registry_url_from_env, RegistryLoader, RegistrySource};
pub use snapshot::{ModuleInfo, RegistrySnapshot};
