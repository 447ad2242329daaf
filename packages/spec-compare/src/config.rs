use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_PATH: &str = "demo_results.json";

/// Run configuration, loaded from environment variables and passed explicitly
/// to the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub model: String,
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            input_dir: env::var("SPEC_INPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_INPUT_DIR.to_string())
                .into(),
            output_path: env::var("SPEC_OUTPUT_PATH")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string())
                .into(),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL").ok(),
        })
    }

    /// Configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            input_dir: DEFAULT_INPUT_DIR.into(),
            output_path: DEFAULT_OUTPUT_PATH.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
        }
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("key");
        assert_eq!(config.input_dir, PathBuf::from("data"));
        assert_eq!(config.output_path, PathBuf::from("demo_results.json"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_builders_override() {
        let config = Config::new("key")
            .with_input_dir("/sheets")
            .with_output_path("/tmp/out.json")
            .with_model("gemini-2.5-pro");

        assert_eq!(config.input_dir, PathBuf::from("/sheets"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.model, "gemini-2.5-pro");
    }
}
