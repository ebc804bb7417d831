//! Declared graph values (inputs and outputs) and their types.

use serde::Serialize;
use std::fmt;

use crate::element::ElementType;
use crate::shape::Shape;

/// Element type plus optional shape. `shape == None` means the rank is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TensorType {
    pub elem_type: ElementType,
    pub shape: Option<Shape>,
}

impl TensorType {
    pub fn new(elem_type: ElementType, shape: Option<Shape>) -> Self {
        Self { elem_type, shape }
    }
}

/// Type of a declared value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueType {
    Tensor(TensorType),
    SparseTensor(TensorType),
    Sequence { element: Box<ValueType> },
    Map { key: ElementType, value: Box<ValueType> },
    Optional { element: Box<ValueType> },
    /// No type was recorded for the value.
    Unknown,
}

impl ValueType {
    pub fn tensor(elem_type: ElementType, shape: Shape) -> Self {
        Self::Tensor(TensorType::new(elem_type, Some(shape)))
    }

    /// Tensor type for dense or sparse tensors.
    pub fn as_tensor(&self) -> Option<&TensorType> {
        match self {
            Self::Tensor(t) | Self::SparseTensor(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tensor(t) => write!(f, "tensor({})", t.elem_type),
            Self::SparseTensor(t) => write!(f, "sparse_tensor({})", t.elem_type),
            Self::Sequence { element } => write!(f, "sequence<{element}>"),
            Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Self::Optional { element } => write!(f, "optional<{element}>"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// One declared graph input or output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denotation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<String>,
    /// Input whose value is also supplied by a graph initializer.
    pub initializer: bool,
}

impl ValueDescriptor {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            denotation: None,
            doc_string: None,
            initializer: false,
        }
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.value_type.as_tensor().map(|t| t.elem_type)
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.value_type.as_tensor().and_then(|t| t.shape.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Dimension;

    #[test]
    fn test_nested_display() {
        let seq = ValueType::Sequence {
            element: Box::new(ValueType::Map {
                key: ElementType::String,
                value: Box::new(ValueType::tensor(ElementType::Float32, Shape::default())),
            }),
        };
        assert_eq!(seq.to_string(), "sequence<map<string, tensor(float32)>>");

        let opt = ValueType::Optional {
            element: Box::new(ValueType::SparseTensor(TensorType::new(
                ElementType::Int64,
                None,
            ))),
        };
        assert_eq!(opt.to_string(), "optional<sparse_tensor(int64)>");
    }

    #[test]
    fn test_descriptor_accessors() {
        let desc = ValueDescriptor::new(
            "images",
            ValueType::tensor(ElementType::Float32, Shape::fixed([1, 3, 640, 640])),
        );
        assert_eq!(desc.element_type(), Some(ElementType::Float32));
        assert_eq!(desc.shape().map(Shape::rank), Some(4));

        let seq = ValueDescriptor::new(
            "tokens",
            ValueType::Sequence {
                element: Box::new(ValueType::Unknown),
            },
        );
        assert_eq!(seq.element_type(), None);
        assert!(seq.shape().is_none());
    }

    #[test]
    fn test_descriptor_json() {
        let desc = ValueDescriptor::new(
            "x",
            ValueType::tensor(
                ElementType::Int64,
                Shape::new(vec![Dimension::Symbolic("n".to_string()), Dimension::Fixed(2)]),
            ),
        );
        let value = serde_json::to_value(&desc).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "x",
                "type": { "kind": "tensor", "elem_type": "int64", "shape": ["n", 2] },
                "initializer": false,
            })
        );
    }

    #[test]
    fn test_nested_json_has_single_kind() {
        let ty = ValueType::Sequence {
            element: Box::new(ValueType::Unknown),
        };
        let value = serde_json::to_value(&ty).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "kind": "sequence", "element": { "kind": "unknown" } })
        );
    }
}
