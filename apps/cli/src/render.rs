//! Text and JSON rendering of a loaded model's interface.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use modelpeek_interface::{ModelInterface, ModelMetadata, ValueDescriptor, ValueType};

/// Width of the field labels in text output.
const LABEL_WIDTH: usize = 7;

fn visible_inputs(model: &ModelInterface, skip_initializers: bool) -> Vec<&ValueDescriptor> {
    if skip_initializers {
        model.runtime_inputs().collect()
    } else {
        model.inputs.iter().collect()
    }
}

/// The load confirmation line.
pub fn write_confirmation(out: &mut impl Write, model: &ModelInterface) -> io::Result<()> {
    writeln!(out, "✅ Model loaded: {}", model.path.display())
}

pub fn render_text(
    out: &mut impl Write,
    model: &ModelInterface,
    skip_initializers: bool,
    show_metadata: bool,
) -> io::Result<()> {
    write_confirmation(out, model)?;

    if show_metadata {
        write_metadata(out, &model.metadata)?;
    }

    let inputs = visible_inputs(model, skip_initializers);
    if inputs.is_empty() {
        writeln!(out, "\n(no inputs)")?;
    }
    for (i, input) in inputs.into_iter().enumerate() {
        writeln!(out, "\n🔹 Input {i}:")?;
        write_descriptor(out, input)?;
    }

    if model.outputs.is_empty() {
        writeln!(out, "\n(no outputs)")?;
    }
    for (i, output) in model.outputs.iter().enumerate() {
        writeln!(out, "\n🔹 Output {i}:")?;
        write_descriptor(out, output)?;
    }

    Ok(())
}

fn field(out: &mut impl Write, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    let label = format!("{label}:");
    writeln!(out, "   {label:<LABEL_WIDTH$}{value}")
}

fn write_descriptor(out: &mut impl Write, desc: &ValueDescriptor) -> io::Result<()> {
    if desc.initializer {
        field(out, "name", format_args!("{} (initializer)", desc.name))?;
    } else {
        field(out, "name", &desc.name)?;
    }

    let ty = match &desc.value_type {
        ValueType::Tensor(t) => t.elem_type.to_string(),
        other => other.to_string(),
    };
    match &desc.denotation {
        Some(denotation) => field(out, "type", format_args!("{ty} ({denotation})"))?,
        None => field(out, "type", ty)?,
    }

    if let Some(tensor) = desc.value_type.as_tensor() {
        match &tensor.shape {
            Some(shape) => field(out, "shape", shape)?,
            None => field(out, "shape", "[...]")?,
        }
    }

    if let Some(doc) = &desc.doc_string {
        field(out, "doc", doc)?;
    }

    Ok(())
}

fn write_metadata(out: &mut impl Write, meta: &ModelMetadata) -> io::Result<()> {
    if let Some(ir_version) = meta.ir_version {
        field(out, "ir", ir_version)?;
    }
    if let Some(producer) = meta.producer() {
        field(out, "by", producer)?;
    }
    if !meta.opset_imports.is_empty() {
        let opsets: Vec<String> = meta.opset_imports.iter().map(|o| o.to_string()).collect();
        field(out, "opset", opsets.join(", "))?;
    }
    match (meta.model_version, &meta.domain) {
        (Some(version), Some(domain)) => {
            field(out, "model", format_args!("v{version} ({domain})"))?
        }
        (Some(version), None) => field(out, "model", format_args!("v{version}"))?,
        (None, Some(domain)) => field(out, "model", domain)?,
        (None, None) => {}
    }

    let graph = meta.graph_name.as_deref().unwrap_or("(unnamed)");
    match (meta.node_count, meta.initializer_count) {
        (Some(nodes), Some(inits)) => field(
            out,
            "graph",
            format_args!("{graph} ({nodes} nodes, {inits} initializers)"),
        )?,
        _ => field(out, "graph", graph)?,
    }

    if let Some(doc) = &meta.doc_string {
        field(out, "doc", doc)?;
    }
    for (key, value) in &meta.properties {
        field(out, "meta", format_args!("{key} = {value}"))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: &'a Path,
    metadata: &'a ModelMetadata,
    inputs: Vec<&'a ValueDescriptor>,
    outputs: &'a [ValueDescriptor],
}

pub fn render_json(
    out: &mut impl Write,
    model: &ModelInterface,
    skip_initializers: bool,
) -> io::Result<()> {
    let report = JsonReport {
        path: &model.path,
        metadata: &model.metadata,
        inputs: visible_inputs(model, skip_initializers),
        outputs: &model.outputs,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
