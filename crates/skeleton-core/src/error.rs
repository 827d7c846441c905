//! Error types for skeleton generation
//!
//! Each variant corresponds to one stage of a run. Every error is fatal: the
//! orchestrator never retries and never returns a partially resolved result.

use crate::modules::revision::LookupError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the registry, resolver, renderer and orchestrator
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The known-good registry could not be read, fetched or parsed
    #[error("Failed to load registry from {source_ref}: {message}")]
    RegistryLoad { source_ref: String, message: String },

    /// A module was missing from the registry and the fallback lookup failed
    #[error("Module '{module}' not in registry and fallback lookup failed: {source}")]
    UnresolvedModule {
        module: String,
        #[source]
        source: LookupError,
    },

    /// A template failed to parse/render, or an output path could not be written
    #[error("Failed to generate {}: {message}", path.display())]
    Generation { path: PathBuf, message: String },

    /// User input does not describe a valid project
    #[error("Invalid input: {0}")]
    Validation(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScaffoldError {
    pub(crate) fn registry(source_ref: impl Into<String>, message: impl ToString) -> Self {
        Self::RegistryLoad {
            source_ref: source_ref.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn generation(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Generation {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type alias for skeleton operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;
