//! Project specification and input validation

use super::version::normalize_tool_version;
use crate::error::{Result, ScaffoldError};
use crate::modules::ModulePresets;
use std::fmt;
use std::path::PathBuf;

/// Application sub-kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppFlavor {
    Daal,
    Feo,
}

impl AppFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppFlavor::Daal => "daal",
            AppFlavor::Feo => "feo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AppFlavor::Daal => "DAAL",
            AppFlavor::Feo => "FEO",
        }
    }

    /// Parse `daal` / `feo` (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daal" => Some(AppFlavor::Daal),
            "feo" => Some(AppFlavor::Feo),
            _ => None,
        }
    }
}

impl fmt::Display for AppFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Top-level project kind. The flavor only exists for applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectShape {
    Module,
    Application(AppFlavor),
}

impl ProjectShape {
    /// Build a shape from the `--project-type` / `--app-type` strings.
    /// The app type is ignored for `Module` projects.
    pub fn parse(project_type: &str, app_type: &str) -> Result<Self> {
        match project_type.trim().to_lowercase().as_str() {
            "" => Err(ScaffoldError::validation(
                "--project-type must be set (Application or Module)",
            )),
            "module" => Ok(ProjectShape::Module),
            "application" => {
                if app_type.trim().is_empty() {
                    return Err(ScaffoldError::validation(
                        "--app-type must be set for Application projects (daal or feo)",
                    ));
                }
                AppFlavor::parse(app_type)
                    .map(ProjectShape::Application)
                    .ok_or_else(|| {
                        ScaffoldError::validation(format!(
                            "invalid --app-type '{}' (use daal or feo)",
                            app_type
                        ))
                    })
            }
            _ => Err(ScaffoldError::validation(format!(
                "invalid --project-type '{}' (use Application or Module)",
                project_type
            ))),
        }
    }

    pub fn project_type(&self) -> &'static str {
        match self {
            ProjectShape::Module => "Module",
            ProjectShape::Application(_) => "Application",
        }
    }

    pub fn app_flavor(&self) -> Option<AppFlavor> {
        match self {
            ProjectShape::Module => None,
            ProjectShape::Application(flavor) => Some(*flavor),
        }
    }

    /// Template subtree walked for this shape
    pub fn template_root(&self) -> &'static str {
        match self {
            ProjectShape::Module => "module",
            ProjectShape::Application(AppFlavor::Daal) => "application/daal",
            ProjectShape::Application(AppFlavor::Feo) => "application/feo",
        }
    }

    /// Template identifier recorded in the project config
    pub fn template_id(&self) -> &'static str {
        match self {
            ProjectShape::Module => "module",
            ProjectShape::Application(AppFlavor::Daal) => "daal_app",
            ProjectShape::Application(AppFlavor::Feo) => "feo_app",
        }
    }
}

impl fmt::Display for ProjectShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectShape::Module => write!(f, "Module"),
            ProjectShape::Application(flavor) => write!(f, "Application ({})", flavor),
        }
    }
}

/// Validated, immutable description of the project to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub name: String,
    /// Base directory; the project is created at `target_dir/name`
    pub target_dir: PathBuf,
    pub registry_url: String,
    /// Build-tool (Bazel) version pin
    pub tool_version: String,
    pub shape: ProjectShape,
    /// Include the optional (dev-environment) template subtree
    pub include_optional_dir: bool,
}

impl ProjectSpec {
    pub fn output_dir(&self) -> PathBuf {
        self.target_dir.join(&self.name)
    }

    pub fn template_id(&self) -> &'static str {
        self.shape.template_id()
    }
}

/// Raw user input, as collected from flags or prompts
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub modules: Vec<String>,
    pub name: String,
    pub target_dir: String,
    pub registry_url: String,
    pub tool_version: String,
    /// `Application` or `Module`
    pub project_type: String,
    /// `daal` or `feo` (Application projects only)
    pub app_type: String,
    pub include_devcontainer: bool,
    pub module_preset: Option<String>,
}

impl ProjectOptions {
    /// `--module` and `--module-preset` are mutually exclusive
    pub fn check_preset_usage(&self) -> Result<()> {
        let has_preset = self
            .module_preset
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());
        let has_modules = self.modules.iter().any(|m| !m.trim().is_empty());
        if has_preset && has_modules {
            return Err(ScaffoldError::validation(
                "--module and --module-preset are mutually exclusive",
            ));
        }
        Ok(())
    }

    /// Swap a requested preset for its module list.
    ///
    /// Returns the applied preset id; afterwards `module_preset` is cleared so
    /// the options validate like an explicit `--module` list.
    pub fn apply_preset(&mut self, presets: &ModulePresets) -> Result<Option<String>> {
        self.check_preset_usage()?;
        let Some(id) = self.module_preset.take().filter(|p| !p.trim().is_empty()) else {
            return Ok(None);
        };
        self.modules = presets.select(&id, self.shape()?)?;
        Ok(Some(id.trim().to_string()))
    }

    pub fn shape(&self) -> Result<ProjectShape> {
        ProjectShape::parse(&self.project_type, &self.app_type)
    }

    /// Validate the options into a `ProjectSpec`
    pub fn validate(&self) -> Result<ProjectSpec> {
        self.check_preset_usage()?;
        let shape = self.shape()?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(ScaffoldError::validation("--name must be set"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ScaffoldError::validation(format!(
                "--name '{}' must be a single directory name",
                name
            )));
        }
        let target_dir = self.target_dir.trim();
        if target_dir.is_empty() {
            return Err(ScaffoldError::validation("--dir must be set"));
        }
        let registry_url = self.registry_url.trim();
        if registry_url.is_empty() {
            return Err(ScaffoldError::validation("--known-good-url must be set"));
        }
        if self.tool_version.trim().is_empty() {
            return Err(ScaffoldError::validation("--bazel-version must be set"));
        }
        let tool_version = normalize_tool_version(&self.tool_version)?;

        Ok(ProjectSpec {
            name: name.to_string(),
            target_dir: PathBuf::from(target_dir),
            registry_url: registry_url.to_string(),
            tool_version,
            shape,
            include_optional_dir: self.include_devcontainer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ProjectOptions {
        ProjectOptions {
            modules: vec!["baselibs".to_string()],
            name: "score_app".to_string(),
            target_dir: ".".to_string(),
            registry_url: "known_good.json".to_string(),
            tool_version: "8.3.0".to_string(),
            project_type: "Application".to_string(),
            app_type: "daal".to_string(),
            include_devcontainer: false,
            module_preset: None,
        }
    }

    #[test]
    fn test_valid_application() {
        let spec = options().validate().unwrap();
        assert_eq!(spec.shape, ProjectShape::Application(AppFlavor::Daal));
        assert_eq!(spec.output_dir(), PathBuf::from("./score_app"));
        assert_eq!(spec.template_id(), "daal_app");
    }

    #[test]
    fn test_module_ignores_app_type() {
        let mut opts = options();
        opts.project_type = "module".to_string();
        opts.app_type = "bogus".to_string();
        let spec = opts.validate().unwrap();
        assert_eq!(spec.shape, ProjectShape::Module);
        assert_eq!(spec.shape.template_root(), "module");
    }

    #[test]
    fn test_application_requires_valid_flavor() {
        let mut opts = options();
        opts.app_type = String::new();
        assert!(opts.validate().unwrap_err().to_string().contains("--app-type must be set"));

        opts.app_type = "ros".to_string();
        assert!(opts.validate().unwrap_err().to_string().contains("invalid --app-type"));

        opts.app_type = "FEO".to_string();
        assert_eq!(
            opts.validate().unwrap().shape,
            ProjectShape::Application(AppFlavor::Feo)
        );
    }

    #[test]
    fn test_invalid_project_type() {
        let mut opts = options();
        opts.project_type = "Library".to_string();
        assert!(matches!(opts.validate(), Err(ScaffoldError::Validation(_))));
    }

    #[test]
    fn test_required_fields() {
        let mut opts = options();
        opts.name = "  ".to_string();
        assert!(opts.validate().unwrap_err().to_string().contains("--name"));

        let mut opts = options();
        opts.target_dir = String::new();
        assert!(opts.validate().unwrap_err().to_string().contains("--dir"));

        let mut opts = options();
        opts.registry_url = String::new();
        assert!(opts.validate().unwrap_err().to_string().contains("--known-good-url"));

        let mut opts = options();
        opts.tool_version = String::new();
        assert!(opts.validate().unwrap_err().to_string().contains("--bazel-version"));
    }

    #[test]
    fn test_name_must_be_single_segment() {
        let mut opts = options();
        opts.name = "../escape".to_string();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_tool_version_is_normalized() {
        let mut opts = options();
        opts.tool_version = "v8.3.0".to_string();
        assert_eq!(opts.validate().unwrap().tool_version, "8.3.0");

        opts.tool_version = "eight".to_string();
        assert!(opts.validate().is_err());
    }

    const PRESETS: &str = "\
presets:
  - id: daal-standard
    projectType: Application
    appType: daal
    modules: [baselibs, communication]
";

    #[test]
    fn test_apply_preset_fills_modules() {
        let presets = ModulePresets::parse(PRESETS, "score_").unwrap();
        let mut opts = options();
        opts.modules.clear();
        opts.module_preset = Some("daal-standard".to_string());

        assert_eq!(
            opts.apply_preset(&presets).unwrap().as_deref(),
            Some("daal-standard")
        );
        assert_eq!(opts.modules, vec!["score_baselibs", "score_communication"]);
        assert_eq!(opts.module_preset, None);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_apply_preset_without_preset_is_noop() {
        let presets = ModulePresets::parse(PRESETS, "score_").unwrap();
        let mut opts = options();
        assert_eq!(opts.apply_preset(&presets).unwrap(), None);
        assert_eq!(opts.modules, vec!["baselibs"]);
    }

    #[test]
    fn test_apply_preset_checks_shape_and_exclusivity() {
        let presets = ModulePresets::parse(PRESETS, "score_").unwrap();

        let mut opts = options();
        opts.modules.clear();
        opts.project_type = "Module".to_string();
        opts.module_preset = Some("daal-standard".to_string());
        assert!(opts
            .apply_preset(&presets)
            .unwrap_err()
            .to_string()
            .contains("not applicable"));

        let mut opts = options();
        opts.module_preset = Some("daal-standard".to_string());
        assert!(opts
            .apply_preset(&presets)
            .unwrap_err()
            .to_string()
            .contains("mutually exclusive"));
    }

    #[test]
    fn test_preset_and_modules_are_exclusive() {
        let mut opts = options();
        opts.module_preset = Some("daal-standard".to_string());
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));

        opts.modules.clear();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_template_roots_are_disjoint() {
        let roots = [
            ProjectShape::Module.template_root(),
            ProjectShape::Application(AppFlavor::Daal).template_root(),
            ProjectShape::Application(AppFlavor::Feo).template_root(),
        ];
        assert_eq!(roots, ["module", "application/daal", "application/feo"]);
    }
}
