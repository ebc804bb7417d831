use std::path::Path;

use crate::error::{InterfaceError, InterfaceResult};
use crate::model::ModelInterface;

/// Something that can open a model file and report its declared interface.
///
/// Format crates implement this; the binary picks one at startup.
pub trait InterfaceLoader: Send + Sync {
    /// Human-readable name of the backend (e.g. "onnx", "onnxruntime").
    fn name(&self) -> &str;

    /// Load the model at `path`.
    fn load(&self, path: &Path) -> InterfaceResult<ModelInterface>;
}

/// Read a model file, mapping the usual failure modes onto [`InterfaceError`].
pub fn read_model_bytes(path: &Path) -> InterfaceResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => InterfaceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InterfaceError::ReadFile {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if bytes.is_empty() {
        return Err(InterfaceError::Empty {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read model file");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.onnx");

        let err = read_model_bytes(&path).unwrap_err();
        assert!(matches!(err, InterfaceError::NotFound { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("absent.onnx"));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.onnx");
        std::fs::write(&path, b"").unwrap();

        let err = read_model_bytes(&path).unwrap_err();
        assert!(matches!(err, InterfaceError::Empty { .. }));
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = tempdir().unwrap();

        let err = read_model_bytes(dir.path()).unwrap_err();
        assert!(matches!(err, InterfaceError::ReadFile { .. }));
    }

    #[test]
    fn test_reads_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, [8u8, 7]).unwrap();

        assert_eq!(read_model_bytes(&path).unwrap(), vec![8, 7]);
    }
}
