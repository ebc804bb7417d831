use std::path::PathBuf;

use crate::args::{Args, Backend, Format, DEFAULT_MODEL_PATH};

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model_path: PathBuf,
    pub format: Format,
    pub backend: Backend,
    pub skip_initializers: bool,
    pub show_metadata: bool,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            format: Format::Text,
            backend: Backend::Onnx,
            skip_initializers: false,
            show_metadata: false,
            verbose: false,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            model_path: args.model,
            format: args.format,
            backend: args.backend,
            skip_initializers: args.skip_initializers,
            show_metadata: args.metadata,
            verbose: args.verbose,
        }
    }
}

impl Config {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "warn,modelpeek=debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["modelpeek", "-m", "-v", "a.onnx"]).unwrap();
        let config = Config::from(args);
        assert_eq!(config.model_path, PathBuf::from("a.onnx"));
        assert!(config.show_metadata);
        assert_eq!(config.default_log_filter(), "warn,modelpeek=debug");
    }

    #[test]
    fn test_default_model_path() {
        let config = Config::default();
        assert_eq!(config.model_path, PathBuf::from("./model/best.onnx"));
        assert_eq!(config.default_log_filter(), "warn");
    }
}
