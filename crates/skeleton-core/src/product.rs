//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface each product binary implements to configure
//! module naming, the registry and revision endpoints, and the embedded template tree.

use crate::project::ProjectSpec;
use include_dir::Dir;
use std::path::Path;

/// Configuration trait for skeleton-generating products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Module naming (canonical prefix, source-hosting owner)
/// - Registry and revision-lookup endpoints
/// - Project defaults and embedded resources
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Canonical prefix every resolved module name carries (e.g. `score_`)
    fn module_prefix(&self) -> &'static str;

    /// Owner (organisation) hosting the module repositories
    fn github_owner(&self) -> &'static str;

    /// Base URL of the API used for the latest-revision fallback
    fn github_api_url(&self) -> &'static str {
        "https://api.github.com"
    }

    /// Default URL or path of the known-good registry document
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    fn default_project_name(&self) -> &'static str;

    fn default_target_dir(&self) -> &'static str {
        "."
    }

    /// Default build-tool version written into generated projects
    fn default_tool_version(&self) -> &'static str;

    /// Embedded template tree containing the `module` and `application/*` subtrees
    fn templates(&self) -> &'static Dir<'static>;

    /// Embedded module preset document (YAML)
    fn module_presets(&self) -> &'static str;

    /// File name of the project config written into generated projects
    fn config_file_name(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, spec: &ProjectSpec) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
