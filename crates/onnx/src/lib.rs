//! ONNX model decoding.
//!
//! Parses the protobuf `ModelProto` with `prost` and converts the main
//! graph's declared inputs and outputs into `modelpeek_interface` types.
//! Only the interface-relevant subset of `onnx.proto` is modelled; weights
//! and node attributes are skipped while decoding.

mod convert;
mod loader;
pub mod proto;

pub use convert::{model_interface, value_descriptor, value_type};
pub use loader::{decode_model, encode_model, OnnxLoader};
