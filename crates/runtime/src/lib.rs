//! Model loading through ONNX Runtime.
//!
//! Builds an `ort` session from the file and reports the inputs and
//! outputs the session exposes. Unlike the plain ONNX decoder this reflects
//! what the runtime will actually accept: initializer-backed graph inputs
//! are not listed, and only the metadata the runtime surfaces is filled in.

use std::path::Path;

use modelpeek_interface::{
    read_model_bytes, Dimension, ElementType, InterfaceError, InterfaceLoader, InterfaceResult,
    ModelInterface, ModelMetadata, Shape, TensorType, ValueDescriptor, ValueType,
};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::tensor::TensorElementType;

#[derive(Debug, Clone, Copy)]
pub struct RuntimeLoader {
    optimization_level: u8,
    intra_threads: usize,
}

impl Default for RuntimeLoader {
    fn default() -> Self {
        Self {
            optimization_level: 1,
            intra_threads: 1,
        }
    }
}

impl RuntimeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph optimization level, 0 (disabled) to 3. Higher values are clamped.
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads.max(1);
        self
    }

    fn graph_optimization_level(&self) -> GraphOptimizationLevel {
        match self.optimization_level {
            0 => GraphOptimizationLevel::Disable,
            1 => GraphOptimizationLevel::Level1,
            2 => GraphOptimizationLevel::Level2,
            _ => GraphOptimizationLevel::Level3,
        }
    }

    fn open_session(&self, path: &Path, bytes: &[u8]) -> InterfaceResult<Session> {
        Session::builder()
            .map_err(backend_error(path))?
            .with_optimization_level(self.graph_optimization_level())
            .map_err(backend_error(path))?
            .with_intra_threads(self.intra_threads)
            .map_err(backend_error(path))?
            .commit_from_memory(bytes)
            .map_err(backend_error(path))
    }
}

fn backend_error<E: std::fmt::Display>(path: &Path) -> impl Fn(E) -> InterfaceError + '_ {
    move |e| InterfaceError::Backend {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

impl InterfaceLoader for RuntimeLoader {
    fn name(&self) -> &str {
        "onnxruntime"
    }

    fn load(&self, path: &Path) -> InterfaceResult<ModelInterface> {
        // Read first so missing and empty files report the same errors as the decoder.
        let bytes = read_model_bytes(path)?;
        let session = self.open_session(path, &bytes)?;

        let inputs = session
            .inputs
            .iter()
            .map(|input| ValueDescriptor::new(input.name.clone(), value_type(&input.input_type)))
            .collect::<Vec<_>>();
        let outputs = session
            .outputs
            .iter()
            .map(|output| {
                ValueDescriptor::new(output.name.clone(), value_type(&output.output_type))
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            path = %path.display(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "opened ONNX Runtime session"
        );

        Ok(ModelInterface {
            path: path.to_path_buf(),
            metadata: metadata(&session),
            inputs,
            outputs,
        })
    }
}

fn metadata(session: &Session) -> ModelMetadata {
    match session.metadata() {
        Ok(m) => metadata_fields(
            m.name(),
            m.producer(),
            m.description(),
            m.domain(),
            m.version(),
        ),
        Err(e) => {
            tracing::warn!("session metadata unavailable: {e}");
            ModelMetadata::default()
        }
    }
}

/// Fields the session could not read, or that are blank, stay `None`.
fn metadata_fields<E>(
    name: Result<String, E>,
    producer: Result<String, E>,
    description: Result<String, E>,
    domain: Result<String, E>,
    version: Result<i64, E>,
) -> ModelMetadata {
    let text = |value: Result<String, E>| value.ok().filter(|s| !s.is_empty());
    ModelMetadata {
        graph_name: text(name),
        producer_name: text(producer),
        doc_string: text(description),
        domain: text(domain),
        model_version: version.ok().filter(|v| *v != 0),
        ..Default::default()
    }
}

fn value_type(ty: &ort::value::ValueType) -> ValueType {
    use ort::value::ValueType as Ort;

    match ty {
        Ort::Tensor {
            ty,
            shape,
            dimension_symbols,
        } => {
            let dims: Vec<i64> = shape.iter().copied().collect();
            let symbols: &[String] = dimension_symbols.as_ref();
            ValueType::Tensor(TensorType::new(
                element_type(*ty),
                Some(tensor_shape(&dims, symbols)),
            ))
        }
        Ort::Sequence(inner) => ValueType::Sequence {
            element: Box::new(value_type(inner)),
        },
        Ort::Map { key, value } => ValueType::Map {
            key: element_type(*key),
            value: Box::new(ValueType::Tensor(TensorType::new(element_type(*value), None))),
        },
        Ort::Optional(inner) => ValueType::Optional {
            element: Box::new(value_type(inner)),
        },
        #[allow(unreachable_patterns)]
        _ => ValueType::Unknown,
    }
}

/// Negative sizes are dynamic axes; a non-empty symbol names them.
fn tensor_shape(dims: &[i64], symbols: &[String]) -> Shape {
    dims.iter()
        .enumerate()
        .map(|(i, &size)| {
            if size >= 0 {
                return Dimension::Fixed(size);
            }
            match symbols.get(i) {
                Some(name) if !name.is_empty() => Dimension::Symbolic(name.clone()),
                _ => Dimension::Unknown,
            }
        })
        .collect::<Vec<_>>()
        .into()
}

fn element_type(ty: TensorElementType) -> ElementType {
    match ty {
        TensorElementType::Undefined => ElementType::Undefined,
        TensorElementType::Float32 => ElementType::Float32,
        TensorElementType::Uint8 => ElementType::Uint8,
        TensorElementType::Int8 => ElementType::Int8,
        TensorElementType::Uint16 => ElementType::Uint16,
        TensorElementType::Int16 => ElementType::Int16,
        TensorElementType::Int32 => ElementType::Int32,
        TensorElementType::Int64 => ElementType::Int64,
        TensorElementType::String => ElementType::String,
        TensorElementType::Bool => ElementType::Bool,
        TensorElementType::Float16 => ElementType::Float16,
        TensorElementType::Float64 => ElementType::Float64,
        TensorElementType::Uint32 => ElementType::Uint32,
        TensorElementType::Uint64 => ElementType::Uint64,
        TensorElementType::Complex64 => ElementType::Complex64,
        TensorElementType::Complex128 => ElementType::Complex128,
        TensorElementType::Bfloat16 => ElementType::Bfloat16,
        TensorElementType::Float8E4M3FN => ElementType::Float8E4M3Fn,
        TensorElementType::Float8E4M3FNUZ => ElementType::Float8E4M3FnUz,
        TensorElementType::Float8E5M2 => ElementType::Float8E5M2,
        TensorElementType::Float8E5M2FNUZ => ElementType::Float8E5M2FnUz,
        TensorElementType::Uint4 => ElementType::Uint4,
        TensorElementType::Int4 => ElementType::Int4,
    }
}
