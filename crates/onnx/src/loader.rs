use std::path::Path;

use modelpeek_interface::{
    read_model_bytes, InterfaceError, InterfaceLoader, InterfaceResult, ModelInterface,
};
use prost::Message;

use crate::convert::model_interface;
use crate::proto::ModelProto;

/// Decode raw ONNX bytes into a [`ModelProto`].
pub fn decode_model(bytes: &[u8]) -> Result<ModelProto, prost::DecodeError> {
    ModelProto::decode(bytes)
}

/// Encode a [`ModelProto`] into ONNX bytes.
pub fn encode_model(model: &ModelProto) -> Vec<u8> {
    model.encode_to_vec()
}

/// Reads ONNX files directly, without a runtime.
///
/// Reports graph inputs exactly as declared in the file, including any that
/// are also backed by initializers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnnxLoader;

impl OnnxLoader {
    pub fn new() -> Self {
        Self
    }

    /// Build an interface from bytes already in memory.
    pub fn load_bytes(&self, path: &Path, bytes: &[u8]) -> InterfaceResult<ModelInterface> {
        let model = decode_model(bytes).map_err(|e| InterfaceError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let interface = model_interface(path, &model)?;

        tracing::debug!(
            path = %path.display(),
            ir_version = model.ir_version,
            inputs = interface.inputs.len(),
            outputs = interface.outputs.len(),
            nodes = interface.metadata.node_count.unwrap_or_default(),
            "decoded ONNX model"
        );
        if interface.outputs.is_empty() {
            tracing::warn!(path = %path.display(), "model declares no outputs");
        }

        Ok(interface)
    }
}

impl InterfaceLoader for OnnxLoader {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load(&self, path: &Path) -> InterfaceResult<ModelInterface> {
        let bytes = read_model_bytes(path)?;
        self.load_bytes(path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_outside_schema_are_skipped() {
        // Initializer `w` with dims [4] and a raw_data payload (field 9).
        let tensor = [0x08, 0x04, 0x42, 0x01, b'w', 0x4A, 0x04, 1, 2, 3, 4];
        let mut graph = vec![0x12, 0x01, b'g', 0x2A, tensor.len() as u8];
        graph.extend_from_slice(&tensor);

        let mut bytes = vec![0x08, 0x08];
        // Empty training_info (field 20).
        bytes.extend_from_slice(&[0xA2, 0x01, 0x00]);
        bytes.extend_from_slice(&[0x3A, graph.len() as u8]);
        bytes.extend_from_slice(&graph);

        let model = decode_model(&bytes).unwrap();
        assert_eq!(model.ir_version, 8);
        let graph = model.graph.unwrap();
        assert_eq!(graph.name, "g");
        assert_eq!(graph.initializer[0].name, "w");
        assert_eq!(graph.initializer[0].dims, [4]);
    }

    #[test]
    fn test_load_bytes_flags_initializer() {
        let mut model = ModelProto::default();
        let mut graph = crate::proto::GraphProto::new("g", vec![], vec![]);
        graph.input.push(crate::proto::ValueInfoProto::new("w", None));
        graph
            .initializer
            .push(crate::proto::TensorProto::header("w", 1, vec![4]));
        model.graph = Some(graph);

        let interface = OnnxLoader::new()
            .load_bytes(Path::new("m.onnx"), &encode_model(&model))
            .unwrap();
        assert!(interface.inputs[0].initializer);
        assert!(interface.outputs.is_empty());
    }
}
