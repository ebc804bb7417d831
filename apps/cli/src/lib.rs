//! `modelpeek` command-line front end.
//!
//! Loads a model with the configured backend and prints its declared
//! inputs and outputs as text or JSON.

pub mod args;
pub mod config;
pub mod render;

use anyhow::{Context, Result};
use std::io::{self, Write};

use modelpeek_interface::InterfaceLoader;
use modelpeek_onnx::OnnxLoader;

pub use args::{Args, Backend, Format};
pub use config::Config;

/// Loader for the configured backend.
pub fn loader_for(backend: Backend) -> Result<Box<dyn InterfaceLoader>> {
    match backend {
        Backend::Onnx => Ok(Box::new(OnnxLoader::new())),
        #[cfg(feature = "runtime")]
        Backend::Runtime => Ok(Box::new(modelpeek_runtime::RuntimeLoader::new())),
        #[cfg(not(feature = "runtime"))]
        Backend::Runtime => {
            anyhow::bail!("the runtime backend is not available; rebuild with `--features runtime`")
        }
    }
}

/// Load the configured model and write its interface to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let loader = loader_for(config.backend)?;

    tracing::debug!(
        backend = loader.name(),
        path = %config.model_path.display(),
        "loading model"
    );
    let model = loader
        .load(&config.model_path)
        .with_context(|| format!("could not load '{}'", config.model_path.display()))?;
    tracing::info!(
        inputs = model.inputs.len(),
        outputs = model.outputs.len(),
        "model loaded"
    );

    let written = match config.format {
        Format::Text => render::render_text(
            out,
            &model,
            config.skip_initializers,
            config.show_metadata,
        ),
        Format::Json => {
            // Keep stdout a single JSON document.
            render::write_confirmation(&mut io::stderr(), &model)
                .and_then(|()| render::render_json(out, &model, config.skip_initializers))
        }
    };
    written.context("failed to write output")?;

    out.flush().context("failed to write output")
}
