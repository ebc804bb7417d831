//! Conversion from decoded protobuf messages to interface types.

use std::collections::HashSet;
use std::path::Path;

use modelpeek_interface::{
    Dimension, ElementType, InterfaceError, InterfaceResult, ModelInterface, ModelMetadata,
    OpsetImport, Shape, TensorType, ValueDescriptor, ValueType,
};

use crate::proto::tensor_shape_proto::{self, dimension};
use crate::proto::{
    type_proto, GraphProto, ModelProto, TensorShapeProto, TypeProto, ValueInfoProto,
};

/// Build the interface of a decoded model. Fails if the model has no graph.
pub fn model_interface(path: &Path, model: &ModelProto) -> InterfaceResult<ModelInterface> {
    let graph = model.graph.as_ref().ok_or_else(|| InterfaceError::MissingGraph {
        path: path.to_path_buf(),
    })?;

    let initializers = initializer_names(graph);

    let inputs = graph
        .input
        .iter()
        .map(|info| {
            let mut desc = value_descriptor(info);
            desc.initializer = initializers.contains(info.name.as_str());
            desc
        })
        .collect();
    let outputs = graph.output.iter().map(value_descriptor).collect();

    Ok(ModelInterface {
        path: path.to_path_buf(),
        metadata: metadata(model, graph),
        inputs,
        outputs,
    })
}

fn initializer_names(graph: &GraphProto) -> HashSet<&str> {
    let dense = graph.initializer.iter().map(|t| t.name.as_str());
    let sparse = graph
        .sparse_initializer
        .iter()
        .filter_map(|s| s.values.as_ref())
        .map(|t| t.name.as_str());
    dense.chain(sparse).filter(|name| !name.is_empty()).collect()
}

fn metadata(model: &ModelProto, graph: &GraphProto) -> ModelMetadata {
    ModelMetadata {
        ir_version: non_zero(model.ir_version),
        producer_name: non_empty(&model.producer_name),
        producer_version: non_empty(&model.producer_version),
        domain: non_empty(&model.domain),
        model_version: non_zero(model.model_version),
        doc_string: non_empty(&model.doc_string),
        graph_name: non_empty(&graph.name),
        opset_imports: model
            .opset_import
            .iter()
            .map(|op| OpsetImport {
                domain: op.domain.clone(),
                version: op.version,
            })
            .collect(),
        node_count: Some(graph.node.len()),
        initializer_count: Some(graph.initializer.len() + graph.sparse_initializer.len()),
        properties: model
            .metadata_props
            .iter()
            .map(|p| (p.key.clone(), p.value.clone()))
            .collect(),
    }
}

/// Convert one declared value. The `initializer` flag is left unset.
pub fn value_descriptor(info: &ValueInfoProto) -> ValueDescriptor {
    let ty = info.r#type.as_ref();
    ValueDescriptor {
        name: info.name.clone(),
        value_type: nested(ty),
        denotation: ty.and_then(|t| non_empty(&t.denotation)),
        doc_string: non_empty(&info.doc_string),
        initializer: false,
    }
}

pub fn value_type(ty: &TypeProto) -> ValueType {
    match &ty.value {
        Some(type_proto::Value::TensorType(t)) => {
            ValueType::Tensor(tensor_type(t.elem_type, t.shape.as_ref()))
        }
        Some(type_proto::Value::SparseTensorType(t)) => {
            ValueType::SparseTensor(tensor_type(t.elem_type, t.shape.as_ref()))
        }
        Some(type_proto::Value::SequenceType(s)) => ValueType::Sequence {
            element: Box::new(nested(s.elem_type.as_deref())),
        },
        Some(type_proto::Value::MapType(m)) => ValueType::Map {
            key: ElementType::from_onnx(m.key_type),
            value: Box::new(nested(m.value_type.as_deref())),
        },
        Some(type_proto::Value::OptionalType(o)) => ValueType::Optional {
            element: Box::new(nested(o.elem_type.as_deref())),
        },
        None => ValueType::Unknown,
    }
}

fn nested(ty: Option<&TypeProto>) -> ValueType {
    ty.map(value_type).unwrap_or(ValueType::Unknown)
}

fn tensor_type(elem_type: i32, shape: Option<&TensorShapeProto>) -> TensorType {
    TensorType {
        elem_type: ElementType::from_onnx(elem_type),
        shape: shape.map(|s| Shape::new(s.dim.iter().map(axis).collect())),
    }
}

fn axis(dim: &tensor_shape_proto::Dimension) -> Dimension {
    match &dim.value {
        Some(dimension::Value::DimValue(size)) => Dimension::Fixed(*size),
        Some(dimension::Value::DimParam(name)) if !name.is_empty() => {
            Dimension::Symbolic(name.clone())
        }
        _ => Dimension::Unknown,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn non_zero(v: i64) -> Option<i64> {
    (v != 0).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::tensor_proto::DataType;
    use crate::proto::tensor_shape_proto::Dimension as ProtoDim;
    use crate::proto::{SparseTensorProto, TensorProto};

    const FLOAT: i32 = DataType::Float as i32;
    const INT64: i32 = DataType::Int64 as i32;
    const STRING: i32 = DataType::String as i32;

    #[test]
    fn test_missing_graph() {
        let model = ModelProto {
            ir_version: 8,
            ..Default::default()
        };
        let err = model_interface(Path::new("x.onnx"), &model).unwrap_err();
        assert!(matches!(err, InterfaceError::MissingGraph { .. }));
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(axis(&ProtoDim::fixed(3)), Dimension::Fixed(3));
        assert_eq!(axis(&ProtoDim::fixed(-1)), Dimension::Fixed(-1));
        assert_eq!(
            axis(&ProtoDim::param("batch")),
            Dimension::Symbolic("batch".to_string())
        );
        assert_eq!(axis(&ProtoDim::param("")), Dimension::Unknown);
        assert_eq!(axis(&ProtoDim::default()), Dimension::Unknown);
    }

    #[test]
    fn test_tensor_without_shape_has_unknown_rank() {
        let ty = TypeProto::tensor(FLOAT, None);
        assert_eq!(
            value_type(&ty),
            ValueType::Tensor(TensorType::new(ElementType::Float32, None))
        );
    }

    #[test]
    fn test_scalar_tensor() {
        let ty = TypeProto::tensor(INT64, Some(TensorShapeProto::new(vec![])));
        let converted = value_type(&ty);
        assert_eq!(converted.as_tensor().unwrap().shape, Some(Shape::default()));
    }

    #[test]
    fn test_nested_types() {
        let ty = TypeProto::sequence(TypeProto::map(
            STRING,
            TypeProto::optional(TypeProto::tensor(FLOAT, None)),
        ));
        assert_eq!(
            value_type(&ty).to_string(),
            "sequence<map<string, optional<tensor(float32)>>>"
        );
    }

    #[test]
    fn test_untyped_value() {
        let info = ValueInfoProto::new("mystery", None);
        let desc = value_descriptor(&info);
        assert_eq!(desc.value_type, ValueType::Unknown);
        assert_eq!(desc.denotation, None);
    }

    #[test]
    fn test_sequence_without_element() {
        let ty = TypeProto {
            value: Some(type_proto::Value::SequenceType(
                type_proto::Sequence { elem_type: None }.into(),
            )),
            denotation: String::new(),
        };
        assert_eq!(value_type(&ty).to_string(), "sequence<unknown>");
    }

    #[test]
    fn test_initializer_inputs_flagged() {
        let mut graph = GraphProto::new(
            "g",
            vec![
                ValueInfoProto::tensor("x", FLOAT, vec![ProtoDim::fixed(1)]),
                ValueInfoProto::tensor("w", FLOAT, vec![ProtoDim::fixed(4)]),
                ValueInfoProto::tensor("s", FLOAT, vec![ProtoDim::fixed(4)]),
            ],
            vec![ValueInfoProto::tensor("y", FLOAT, vec![ProtoDim::fixed(1)])],
        );
        graph.initializer.push(TensorProto::header("w", FLOAT, vec![4]));
        graph.sparse_initializer.push(SparseTensorProto {
            values: Some(TensorProto::header("s", FLOAT, vec![2])),
            indices: None,
            dims: vec![4],
        });
        let model = ModelProto::with_graph(3, 9, graph);

        let iface = model_interface(Path::new("m.onnx"), &model).unwrap();
        let flags: Vec<bool> = iface.inputs.iter().map(|i| i.initializer).collect();
        assert_eq!(flags, [false, true, true]);
        assert!(!iface.outputs[0].initializer);
        assert_eq!(iface.metadata.initializer_count, Some(2));
    }

    #[test]
    fn test_metadata_blanks_are_none() {
        let model = ModelProto {
            graph: Some(GraphProto::default()),
            ..Default::default()
        };
        let iface = model_interface(Path::new("m.onnx"), &model).unwrap();
        let meta = iface.metadata;
        assert_eq!(meta.ir_version, None);
        assert_eq!(meta.producer_name, None);
        assert_eq!(meta.graph_name, None);
        assert_eq!(meta.node_count, Some(0));
        assert!(meta.opset_imports.is_empty());
    }
}
