//! Error types for the veneer crate.

use thiserror::Error;

/// Communication failure with the external overlay service.
///
/// This is the only failure mode the reconciliation core distinguishes: the
/// service was unreachable or rejected the call. The core never propagates
/// it to callers as an error — read failures degrade to "not enabled" and
/// write failures are collected per package in a
/// [`ToggleReport`](crate::ToggleReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("overlay service communication failed: {message}")]
pub struct RegistryError {
    message: String,
}

impl RegistryError {
    /// Creates a communication error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur when loading or validating an overlay catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog content is not valid YAML.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Catalog parsed but violates a structural rule.
    #[error("invalid catalog: {0}")]
    Invalid(String),
}
