//! Project description and the generation workflow
//!
//! This module provides:
//! - Input validation into an immutable `ProjectSpec`
//! - Build-tool version checks
//! - The `Scaffolder` orchestrating registry, resolver and renderer

pub mod init;
pub mod spec;
pub mod version;

pub use init::{InitResult, Scaffolder};
pub use spec::{AppFlavor, ProjectOptions, ProjectShape, ProjectSpec};
