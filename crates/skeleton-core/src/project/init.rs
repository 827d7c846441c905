//! Project initialization: registry -> resolver -> renderer -> project config

use super::spec::ProjectSpec;
use crate::config::ProjectConfig;
use crate::error::{Result, ScaffoldError};
use crate::modules::{normalize_module_name, ModuleResolver, ResolvedModuleSet, RevisionLookup};
use crate::product::ProductConfig;
use crate::registry::{RegistryLoader, RegistrySource};
use crate::templates::{SkeletonRenderer, TemplateSource};
use std::path::PathBuf;

/// Information about a generated project
#[derive(Debug, Clone)]
pub struct InitResult {
    /// `target_dir/name`
    pub output_dir: PathBuf,
    pub selected_modules: ResolvedModuleSet,
    /// Written files, relative to `output_dir`, in render order
    pub files: Vec<String>,
}

/// Runs the full generation flow with a fixed set of collaborators
pub struct Scaffolder {
    registry: RegistryLoader,
    lookup: RevisionLookup,
    templates: TemplateSource,
    module_prefix: String,
    config_file_name: String,
}

impl Scaffolder {
    pub fn new(
        registry: RegistryLoader,
        lookup: RevisionLookup,
        templates: TemplateSource,
        module_prefix: &str,
        config_file_name: &str,
    ) -> Self {
        Self {
            registry,
            lookup,
            templates,
            module_prefix: module_prefix.to_string(),
            config_file_name: config_file_name.to_string(),
        }
    }

    /// Wire the product's registry client, revision lookup and embedded templates
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let lookup = RevisionLookup::from_config(config)
            .map_err(|e| ScaffoldError::validation(e.to_string()))?;
        Ok(Self::new(
            RegistryLoader::from_config(config),
            lookup,
            TemplateSource::from_config(config),
            config.module_prefix(),
            config.config_file_name(),
        ))
    }

    /// Replace the template source (e.g. with a local directory)
    pub fn with_templates(mut self, templates: TemplateSource) -> Self {
        self.templates = templates;
        self
    }

    /// Generate the project described by `spec` with the requested modules.
    ///
    /// Nothing is written unless every module resolves. Errors from each stage
    /// are returned unchanged.
    pub async fn run(&self, spec: &ProjectSpec, modules: &[String]) -> Result<InitResult> {
        if modules
            .iter()
            .all(|m| normalize_module_name(&self.module_prefix, m).is_empty())
        {
            return Err(ScaffoldError::validation("at least one module must be set"));
        }

        let source = RegistrySource::parse(&spec.registry_url)?;
        let snapshot = self.registry.load(&source).await?;

        let resolver = ModuleResolver::new(&self.module_prefix, &self.lookup);
        let selected = resolver.resolve_modules(modules, &snapshot).await?;
        tracing::info!(
            modules = ?selected.keys().collect::<Vec<_>>(),
            "Resolved modules"
        );

        let output_dir = spec.output_dir();
        let files = SkeletonRenderer::new(&self.templates)
            .generate(spec, &selected)
            .await?;

        ProjectConfig::from_spec(spec, modules)
            .write(&output_dir, &self.config_file_name)
            .await?;

        Ok(InitResult {
            output_dir,
            selected_modules: selected,
            files,
        })
    }
}
