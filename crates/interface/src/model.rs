//! Whole-model view: metadata plus declared inputs and outputs.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::value::ValueDescriptor;

/// Default operator set domain.
pub const DEFAULT_OPSET_DOMAIN: &str = "ai.onnx";

/// Operator set a graph targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpsetImport {
    /// Empty for the default `ai.onnx` domain.
    pub domain: String,
    pub version: i64,
}

impl OpsetImport {
    pub fn domain_name(&self) -> &str {
        if self.domain.is_empty() {
            DEFAULT_OPSET_DOMAIN
        } else {
            &self.domain
        }
    }
}

impl fmt::Display for OpsetImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.domain_name(), self.version)
    }
}

/// Descriptive metadata. Backends fill what they can see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opset_imports: Vec<OpsetImport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer_count: Option<usize>,
    /// Free-form key/value pairs in file order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<(String, String)>,
}

impl ModelMetadata {
    /// Producer name and version joined, e.g. `pytorch 2.1.0`.
    pub fn producer(&self) -> Option<String> {
        match (&self.producer_name, &self.producer_version) {
            (Some(name), Some(version)) => Some(format!("{name} {version}")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(version)) => Some(version.clone()),
            (None, None) => None,
        }
    }
}

/// Declared interface of a loaded model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInterface {
    pub path: PathBuf,
    pub metadata: ModelMetadata,
    /// Graph inputs in declaration order.
    pub inputs: Vec<ValueDescriptor>,
    /// Graph outputs in declaration order.
    pub outputs: Vec<ValueDescriptor>,
}

impl ModelInterface {
    /// Inputs a caller must feed, i.e. excluding initializer-backed ones.
    pub fn runtime_inputs(&self) -> impl Iterator<Item = &ValueDescriptor> {
        self.inputs.iter().filter(|input| !input.initializer)
    }

    pub fn input(&self, name: &str) -> Option<&ValueDescriptor> {
        self.inputs.iter().find(|input| input.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&ValueDescriptor> {
        self.outputs.iter().find(|output| output.name == name)
    }
}
