//! Build-tool version validation

use crate::error::{Result, ScaffoldError};
use semver::Version;

/// Parse a build-tool version string, handling a leading `v`
pub fn parse_tool_version(version_str: &str) -> Result<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|e| {
        ScaffoldError::validation(format!("invalid --bazel-version '{}': {}", version_str, e))
    })
}

/// Normalized form written into generated projects (no leading `v`)
pub fn normalize_tool_version(version_str: &str) -> Result<String> {
    parse_tool_version(version_str).map(|v| v.to_string())
}
