//! Skeleton rendering: walk a template subtree and write the rendered files

use super::paths;
use super::source::TemplateSource;
use crate::error::{Result, ScaffoldError};
use crate::modules::ResolvedModuleSet;
use crate::project::ProjectSpec;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Fixed set of fields every template is rendered against
#[derive(Debug, Serialize)]
pub struct TemplateContext<'a> {
    pub project_name: &'a str,
    pub selected_modules: &'a ResolvedModuleSet,
    pub bazel_version: &'a str,
}

impl<'a> TemplateContext<'a> {
    pub fn new(spec: &'a ProjectSpec, modules: &'a ResolvedModuleSet) -> Self {
        Self {
            project_name: &spec.name,
            selected_modules: modules,
            bazel_version: &spec.tool_version,
        }
    }
}

/// One template selected for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the template subtree
    pub template: String,
    /// Path relative to the project output directory
    pub output: String,
}

/// Renders a template subtree into a project directory
pub struct SkeletonRenderer<'a> {
    source: &'a TemplateSource,
    env: Environment<'static>,
}

impl<'a> SkeletonRenderer<'a> {
    pub fn new(source: &'a TemplateSource) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { source, env }
    }

    /// Decide which templates of the shape's subtree are rendered, and where to.
    /// The result is ordered by template path.
    pub fn plan(&self, spec: &ProjectSpec) -> Result<Vec<PlannedFile>> {
        let root = spec.shape.template_root();
        let mut planned = Vec::new();

        for rel in self.source.list(root)? {
            if !paths::is_template(&rel) {
                continue;
            }
            if paths::is_optional(&rel) && !spec.include_optional_dir {
                tracing::debug!(template = %rel, "Skipping optional template");
                continue;
            }
            let output = paths::output_path(&rel).ok_or_else(|| {
                ScaffoldError::generation(format!("{}/{}", root, rel), "empty output file name")
            })?;
            planned.push(PlannedFile {
                template: rel,
                output,
            });
        }

        Ok(planned)
    }

    /// Render one template body against the context
    pub fn render(&self, name: &str, body: &str, context: &TemplateContext<'_>) -> Result<String> {
        self.env
            .render_named_str(name, body, context)
            .map_err(|e| ScaffoldError::generation(name, e))
    }

    /// Render the subtree for `spec` into `spec.output_dir()`.
    ///
    /// Existing files are overwritten. On failure, files written so far stay on disk.
    /// Returns the written paths relative to the output directory, in walk order.
    pub async fn generate(
        &self,
        spec: &ProjectSpec,
        modules: &ResolvedModuleSet,
    ) -> Result<Vec<String>> {
        let target_dir = spec.output_dir();
        fs::create_dir_all(&target_dir)
            .await
            .map_err(|e| ScaffoldError::generation(&target_dir, e))?;

        let root = spec.shape.template_root();
        let context = TemplateContext::new(spec, modules);
        let mut written = Vec::new();

        for file in self.plan(spec)? {
            let template_name = format!("{}/{}", root, file.template);
            let body = self.source.read(root, &file.template).await?;
            let rendered = self.render(&template_name, &body, &context)?;

            let dst = target_dir.join(&file.output);
            write_file(&dst, rendered.as_bytes()).await?;
            tracing::debug!(template = %template_name, output = %dst.display(), "Rendered");

            written.push(file.output);
        }

        tracing::info!(
            files = written.len(),
            dir = %target_dir.display(),
            "Generated skeleton"
        );
        Ok(written)
    }
}

async fn write_file(dst: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::generation(parent, e))?;
    }
    fs::write(dst, contents)
        .await
        .map_err(|e| ScaffoldError::generation(dst, e))
}
