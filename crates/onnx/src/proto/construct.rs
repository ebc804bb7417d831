//! Constructors for assembling models in code, mostly test fixtures.

use super::tensor_shape_proto::{dimension, Dimension};
use super::{
    type_proto, GraphProto, ModelProto, OperatorSetIdProto, TensorProto, TensorShapeProto,
    TypeProto, ValueInfoProto,
};

impl Dimension {
    /// Axis with a fixed size.
    pub fn fixed(size: i64) -> Self {
        Self {
            value: Some(dimension::Value::DimValue(size)),
            denotation: String::new(),
        }
    }

    /// Axis named by a symbolic parameter.
    pub fn param(name: impl Into<String>) -> Self {
        Self {
            value: Some(dimension::Value::DimParam(name.into())),
            denotation: String::new(),
        }
    }
}

impl TensorShapeProto {
    pub fn new(dim: Vec<Dimension>) -> Self {
        Self { dim }
    }
}

impl TypeProto {
    /// Dense tensor type. `shape == None` leaves the rank unknown.
    pub fn tensor(elem_type: i32, shape: Option<TensorShapeProto>) -> Self {
        Self {
            value: Some(type_proto::Value::TensorType(
                type_proto::Tensor { elem_type, shape }.into(),
            )),
            denotation: String::new(),
        }
    }

    pub fn sequence(elem_type: TypeProto) -> Self {
        Self {
            value: Some(type_proto::Value::SequenceType(
                type_proto::Sequence {
                    elem_type: Some(Box::new(elem_type)),
                }
                .into(),
            )),
            denotation: String::new(),
        }
    }

    pub fn map(key_type: i32, value_type: TypeProto) -> Self {
        Self {
            value: Some(type_proto::Value::MapType(
                type_proto::Map {
                    key_type,
                    value_type: Some(Box::new(value_type)),
                }
                .into(),
            )),
            denotation: String::new(),
        }
    }

    pub fn optional(elem_type: TypeProto) -> Self {
        Self {
            value: Some(type_proto::Value::OptionalType(
                type_proto::Optional {
                    elem_type: Some(Box::new(elem_type)),
                }
                .into(),
            )),
            denotation: String::new(),
        }
    }
}

impl ValueInfoProto {
    pub fn new(name: impl Into<String>, r#type: Option<TypeProto>) -> Self {
        Self {
            name: name.into(),
            r#type,
            doc_string: String::new(),
        }
    }

    /// Dense tensor value with a known shape.
    pub fn tensor(name: impl Into<String>, elem_type: i32, dims: Vec<Dimension>) -> Self {
        Self::new(
            name,
            Some(TypeProto::tensor(elem_type, Some(TensorShapeProto::new(dims)))),
        )
    }
}

impl TensorProto {
    /// Tensor header without payload, as used for initializers.
    pub fn header(name: impl Into<String>, data_type: i32, dims: Vec<i64>) -> Self {
        Self {
            dims,
            data_type,
            name: name.into(),
        }
    }
}

impl ModelProto {
    /// Model wrapping `graph` with the given IR version and a default-domain opset.
    pub fn with_graph(ir_version: i64, opset_version: i64, graph: GraphProto) -> Self {
        Self {
            ir_version,
            opset_import: vec![OperatorSetIdProto {
                domain: String::new(),
                version: opset_version,
            }],
            graph: Some(graph),
            ..Default::default()
        }
    }
}

impl GraphProto {
    pub fn new(
        name: impl Into<String>,
        input: Vec<ValueInfoProto>,
        output: Vec<ValueInfoProto>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            ..Default::default()
        }
    }
}
