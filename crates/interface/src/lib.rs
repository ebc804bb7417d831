//! Declared interface of a serialized model.
//!
//! This crate holds the format-independent view a model inspector prints:
//! - Element types, shapes and value types of graph inputs/outputs
//! - Model metadata (IR version, producer, opsets, properties)
//! - The [`InterfaceLoader`] trait that format backends implement
//!
//! # Example
//!
//! ```ignore
//! use modelpeek_interface::InterfaceLoader;
//!
//! let model = loader.load(Path::new("model/best.onnx"))?;
//! for input in &model.inputs {
//!     println!("{}: {}", input.name, input.value_type);
//! }
//! ```

mod element;
mod error;
mod loader;
mod model;
mod shape;
mod value;

pub use element::ElementType;
pub use error::{InterfaceError, InterfaceResult};
pub use loader::{read_model_bytes, InterfaceLoader};
pub use model::{ModelInterface, ModelMetadata, OpsetImport, DEFAULT_OPSET_DOMAIN};
pub use shape::{Dimension, Shape};
pub use value::{TensorType, ValueDescriptor, ValueType};
