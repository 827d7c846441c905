//! Template selection and rendering
//!
//! This module provides:
//! - Template sources (embedded tree or local directory)
//! - Path rules (marker suffix, optional subtree, hidden-name escapes)
//! - The skeleton renderer

pub mod paths;
pub mod renderer;
pub mod source;

pub use renderer::{PlannedFile, SkeletonRenderer, TemplateContext};
pub use source::TemplateSource;
