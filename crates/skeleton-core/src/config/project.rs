//! Project config recorded in the generated project root

use crate::error::{Result, ScaffoldError};
use crate::project::ProjectSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Inputs used to generate a project, kept for later reproducibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_name: String,
    pub template: String,
    pub bazel_version: String,
    pub known_good_url: String,
    /// Module names exactly as requested
    pub modules: Vec<String>,
}

impl ProjectConfig {
    pub fn from_spec(spec: &ProjectSpec, modules: &[String]) -> Self {
        Self {
            project_name: spec.name.clone(),
            template: spec.template_id().to_string(),
            bazel_version: spec.tool_version.clone(),
            known_good_url: spec.registry_url.clone(),
            modules: modules.to_vec(),
        }
    }

    /// Write as pretty JSON to `dir/file_name`
    pub async fn write(&self, dir: &Path, file_name: &str) -> Result<()> {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| ScaffoldError::generation(dir, e))?;
        let path = dir.join(file_name);
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| ScaffoldError::generation(&path, e))?;
        fs::write(&path, data)
            .await
            .map_err(|e| ScaffoldError::generation(&path, e))
    }

    pub async fn read(dir: &Path, file_name: &str) -> Result<Self> {
        let path = dir.join(file_name);
        let data = fs::read(&path).await?;
        serde_json::from_slice(&data).map_err(|e| {
            ScaffoldError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}: {}", path.display(), e),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{AppFlavor, ProjectShape};
    use tempfile::TempDir;

    fn spec() -> ProjectSpec {
        ProjectSpec {
            name: "score_app".to_string(),
            target_dir: ".".into(),
            registry_url: "https://example.com/known_good.json".to_string(),
            tool_version: "8.3.0".to_string(),
            shape: ProjectShape::Application(AppFlavor::Feo),
            include_optional_dir: false,
        }
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::from_spec(&spec(), &["feo".to_string()]);

        config.write(temp.path(), "scorex.json").await.unwrap();
        let read = ProjectConfig::read(temp.path(), "scorex.json").await.unwrap();

        assert_eq!(read, config);
        assert_eq!(read.template, "feo_app");
    }

    #[tokio::test]
    async fn test_written_field_names() {
        let temp = TempDir::new().unwrap();
        ProjectConfig::from_spec(&spec(), &["baselibs".to_string()])
            .write(temp.path(), "scorex.json")
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp.path().join("scorex.json")).unwrap())
                .unwrap();
        assert_eq!(raw["project_name"], "score_app");
        assert_eq!(raw["bazel_version"], "8.3.0");
        assert_eq!(raw["known_good_url"], "https://example.com/known_good.json");
        assert_eq!(raw["modules"][0], "baselibs");
    }

    #[tokio::test]
    async fn test_read_missing_config() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            ProjectConfig::read(temp.path(), "scorex.json").await,
            Err(ScaffoldError::Io(_))
        ));
    }
}
