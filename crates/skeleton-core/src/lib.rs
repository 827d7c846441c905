//! Skeleton Core - Shared library for project skeleton CLIs
//!
//! This library turns a list of module names and a project shape into a
//! ready-to-build source tree. Module versions are pinned from a known-good
//! registry snapshot; modules missing from the snapshot fall back to the latest
//! commit on their main branch. The tree itself is rendered from an embedded
//! template namespace selected by project shape.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - Registry loading, module resolution, template rendering
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `Scaffolder`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use skeleton_core::{ProjectOptions, Scaffolder};
//!
//! let spec = ProjectOptions { /* ... */ }.validate()?;
//! let scaffolder = Scaffolder::from_config(&MyConfig)?;
//! let result = scaffolder.run(&spec, &["baselibs".to_string()]).await?;
//! println!("Generated {}", result.output_dir.display());
//! ```

pub mod config;
pub mod error;
pub mod modules;
pub mod product;
pub mod project;
pub mod registry;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use modules::{ModulePresets, ModuleResolver, ResolvedModuleSet, RevisionLookup};
pub use product::ProductConfig;
pub use project::{AppFlavor, InitResult, ProjectOptions, ProjectShape, ProjectSpec, Scaffolder};
pub use registry::{ModuleInfo, RegistryLoader, RegistrySnapshot, RegistrySource};
pub use templates::{SkeletonRenderer, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
