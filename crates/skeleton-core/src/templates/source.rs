//! Template sources: the tree embedded in the binary, or a local directory
//!
//! Both expose the same two operations, listing the files of a subtree and
//! reading one of them, so the renderer walks either identically. The local
//! variant exists for template development (`--template-dir`).

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use include_dir::{Dir, DirEntry};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Template source - either embedded at compile time or a local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Embedded(&'static Dir<'static>),
    Local(PathBuf),
}

impl TemplateSource {
    /// Use the product's embedded template tree
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self::Embedded(config.templates())
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// List all files under `subtree`, as `/`-separated paths relative to it,
    /// sorted lexicographically
    pub fn list(&self, subtree: &str) -> Result<Vec<String>> {
        let mut files = match self {
            TemplateSource::Embedded(root) => {
                let dir = root.get_dir(subtree).ok_or_else(|| {
                    ScaffoldError::generation(subtree, "template subtree not found in embedded templates")
                })?;
                let mut files = Vec::new();
                collect_embedded(dir, Path::new(subtree), &mut files);
                files
            }
            TemplateSource::Local(root) => {
                let base = root.join(subtree);
                if !base.is_dir() {
                    return Err(ScaffoldError::generation(
                        &base,
                        "template subtree not found",
                    ));
                }
                let mut files = Vec::new();
                for entry in WalkDir::new(&base).sort_by_file_name() {
                    let entry = entry.map_err(|e| ScaffoldError::generation(&base, e))?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if let Ok(rel) = entry.path().strip_prefix(&base) {
                        files.push(to_slash(rel));
                    }
                }
                files
            }
        };
        files.sort();
        Ok(files)
    }

    /// Read a template body by its subtree-relative path
    pub async fn read(&self, subtree: &str, rel_path: &str) -> Result<String> {
        match self {
            TemplateSource::Embedded(root) => {
                let full = format!("{}/{}", subtree, rel_path);
                let file = root.get_file(&full).ok_or_else(|| {
                    ScaffoldError::generation(&full, "template not found in embedded templates")
                })?;
                file.contents_utf8()
                    .map(str::to_string)
                    .ok_or_else(|| ScaffoldError::generation(&full, "template is not valid UTF-8"))
            }
            TemplateSource::Local(root) => {
                let path = root.join(subtree).join(rel_path);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| ScaffoldError::generation(&path, e))
            }
        }
    }
}

fn collect_embedded(dir: &Dir<'_>, base: &Path, out: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, base, out),
            DirEntry::File(file) => {
                if let Ok(rel) = file.path().strip_prefix(base) {
                    out.push(to_slash(rel));
                }
            }
        }
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
