//! Product spec sheet comparison with Gemini.
//!
//! Extracts a structured record from every PDF in a directory, renders a
//! side-by-side comparison with the cheapest product, saves the records as
//! JSON, and asks the model for a best-value verdict.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//! use spec_compare::{Config, GeminiInference, Pipeline};
//!
//! let config = Config::from_env()?;
//! let client = GeminiInference::new(GeminiClient::new(&config.api_key), &config.model);
//! let outcome = Pipeline::new(config, client).run(&mut std::io::stdout()).await?;
//! println!("{} products compared", outcome.records.len());
//! ```

pub mod analyst;
pub mod config;
pub mod error;
pub mod extractor;
pub mod inference;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod report;
pub mod testing;

pub use analyst::Analyst;
pub use config::Config;
pub use error::{AnalysisFailure, ExtractionFailure, ParseFailure, PipelineError};
pub use extractor::SpecExtractor;
pub use inference::{GeminiInference, InferenceClient, RemoteDocument};
pub use pipeline::{Pipeline, RunOutcome, SkippedDocument};
pub use record::{Attribute, Cheapest, ComparisonVerdict, ProductAssessment, SpecRecord};
pub use report::{pick_cheapest, render, render_report, render_verdict};
