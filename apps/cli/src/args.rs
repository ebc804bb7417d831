use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Model path used when none is given on the command line or in the environment.
pub const DEFAULT_MODEL_PATH: &str = "./model/best.onnx";

/// Print the declared inputs and outputs of an ONNX model.
#[derive(Parser, Debug)]
#[command(name = "modelpeek", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the .onnx file
    #[arg(value_name = "MODEL", env = "MODELPEEK_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Loader used to open the model
    #[arg(short, long, value_enum, default_value_t = Backend::Onnx)]
    pub backend: Backend,

    /// Omit graph inputs that are backed by initializers
    #[arg(long, default_value_t = false)]
    pub skip_initializers: bool,

    /// Print model metadata after the load confirmation
    #[arg(short, long, default_value_t = false)]
    pub metadata: bool,

    /// Debug logging on stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Decode the protobuf directly
    #[default]
    Onnx,
    /// Open a session with ONNX Runtime (requires the `runtime` feature)
    Runtime,
}
