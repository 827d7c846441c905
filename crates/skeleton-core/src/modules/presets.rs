//! Named module presets (predefined module lists)

use super::resolver::normalize_module_name;
use crate::error::{Result, ScaffoldError};
use crate::project::ProjectShape;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A predefined module list, optionally restricted to a project shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePreset {
    pub id: String,

    #[serde(default)]
    pub label: String,

    /// Restricts the preset to `Application` or `Module` projects
    #[serde(default, alias = "projectType")]
    pub project_type: Option<String>,

    /// Restricts the preset to an application flavor (`daal`, `feo`)
    #[serde(default, alias = "appType")]
    pub app_type: Option<String>,

    #[serde(default)]
    pub modules: Vec<String>,
}

impl ModulePreset {
    /// Check whether the preset may be used for the given project shape
    pub fn applies_to(&self, shape: ProjectShape) -> bool {
        if let Some(project_type) = &self.project_type {
            if !project_type.eq_ignore_ascii_case(shape.project_type()) {
                return false;
            }
        }
        if let Some(app_type) = &self.app_type {
            match shape.app_flavor() {
                Some(flavor) if app_type.eq_ignore_ascii_case(flavor.as_str()) => {}
                _ => return false,
            }
        }
        true
    }
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<ModulePreset>,
}

/// Validated collection of module presets
#[derive(Debug, Clone, Default)]
pub struct ModulePresets {
    presets: Vec<ModulePreset>,
}

impl ModulePresets {
    /// Parse and validate a preset document, normalizing module names to `prefix`
    pub fn parse(yaml: &str, prefix: &str) -> Result<Self> {
        let file: PresetFile = serde_yaml::from_str(yaml)
            .map_err(|e| ScaffoldError::validation(format!("Failed to parse module presets: {}", e)))?;

        let mut seen = HashSet::new();
        let mut presets = Vec::with_capacity(file.presets.len());

        for mut preset in file.presets {
            preset.id = preset.id.trim().to_string();
            preset.label = preset.label.trim().to_string();
            preset.project_type = trim_optional(preset.project_type);
            preset.app_type = trim_optional(preset.app_type);

            if preset.id.is_empty() {
                return Err(ScaffoldError::validation("module preset missing id"));
            }
            if !seen.insert(preset.id.clone()) {
                return Err(ScaffoldError::validation(format!(
                    "duplicate module preset id '{}'",
                    preset.id
                )));
            }
            if preset.label.is_empty() {
                preset.label = preset.id.clone();
            }

            preset.modules = dedupe(
                preset
                    .modules
                    .iter()
                    .map(|m| normalize_module_name(prefix, m)),
            );
            presets.push(preset);
        }

        Ok(Self { presets })
    }

    pub fn all(&self) -> &[ModulePreset] {
        &self.presets
    }

    /// Presets usable for the given project shape, in document order
    pub fn applicable(&self, shape: ProjectShape) -> Vec<&ModulePreset> {
        self.presets.iter().filter(|p| p.applies_to(shape)).collect()
    }

    pub fn find(&self, id: &str) -> Option<&ModulePreset> {
        let id = id.trim();
        self.presets.iter().find(|p| p.id == id)
    }

    /// Sorted preset ids (for error messages and listings)
    pub fn known_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.presets.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Module list of a preset selected non-interactively
    pub fn select(&self, id: &str, shape: ProjectShape) -> Result<Vec<String>> {
        let preset = self.find(id).ok_or_else(|| {
            ScaffoldError::validation(format!(
                "unknown --module-preset '{}' (known: {})",
                id.trim(),
                self.known_ids().join(", ")
            ))
        })?;

        if !preset.applies_to(shape) {
            return Err(ScaffoldError::validation(format!(
                "module preset '{}' is not applicable to {}",
                preset.id, shape
            )));
        }
        if preset.modules.is_empty() {
            return Err(ScaffoldError::validation(format!(
                "module preset '{}' has no modules",
                preset.id
            )));
        }

        Ok(preset.modules.clone())
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Drop blank and repeated entries; first occurrence wins
pub fn dedupe<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if item.is_empty() || !seen.insert(item.to_string()) {
            continue;
        }
        out.push(item.to_string());
    }
    out
}
