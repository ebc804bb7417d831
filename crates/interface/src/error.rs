//! Error types for loading a model's interface.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for interface loading.
pub type InterfaceResult<T> = Result<T, InterfaceError>;

/// Errors that can occur while loading a model file.
#[derive(Debug, Error)]
pub enum InterfaceError {
    /// The model file does not exist.
    #[error("model file not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// The model file exists but could not be read.
    #[error("failed to read model file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model file has no content.
    #[error("model file '{}' is empty", path.display())]
    Empty { path: PathBuf },

    /// The bytes are not a valid model for the expected format.
    #[error("'{}' is not a valid ONNX model: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// The model decoded but carries no graph.
    #[error("model '{}' has no graph", path.display())]
    MissingGraph { path: PathBuf },

    /// The loading backend rejected the model.
    #[error("failed to load '{}': {message}", path.display())]
    Backend { path: PathBuf, message: String },
}

impl InterfaceError {
    /// Path of the model file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path }
            | Self::ReadFile { path, .. }
            | Self::Empty { path }
            | Self::Decode { path, .. }
            | Self::MissingGraph { path }
            | Self::Backend { path, .. } => path,
        }
    }
}
