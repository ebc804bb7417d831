//! ONNX protobuf messages, generated by `prost-build` from `proto/onnx.proto`.
//!
//! Only the interface subset of the upstream schema is compiled in. Tensor
//! payloads and node attributes are skipped while decoding.

include!(concat!(env!("OUT_DIR"), "/onnx.rs"));

mod construct;
