//! Configuration files written into generated projects

pub mod project;

pub use project::ProjectConfig;
