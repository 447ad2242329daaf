//! Batch driver: extract every spec sheet, report, persist, analyze.
//!
//! Runs strictly one document at a time. Only directory enumeration and
//! local output errors end a run; every collaborator failure is reported and
//! skipped.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::analyst::Analyst;
use crate::config::Config;
use crate::error::{ExtractionFailure, PipelineError, Result};
use crate::extractor::SpecExtractor;
use crate::inference::InferenceClient;
use crate::record::{Cheapest, ComparisonVerdict, SpecRecord};
use crate::report::{pick_cheapest, render_report, render_verdict};

/// A document that produced no record.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: ExtractionFailure,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Successful records, in processing order
    pub records: Vec<SpecRecord>,
    pub skipped: Vec<SkippedDocument>,
    pub cheapest: Option<Cheapest>,
    /// `None` when there was nothing to compare or the comparison failed
    pub verdict: Option<ComparisonVerdict>,
    /// Where the records were written, if they were
    pub saved_to: Option<PathBuf>,
}

pub struct Pipeline<C: InferenceClient> {
    config: Config,
    client: C,
}

impl<C: InferenceClient> Pipeline<C> {
    pub fn new(config: Config, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole batch, writing the console report to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunOutcome> {
        let documents = list_documents(&self.config.input_dir)?;
        info!(
            input_dir = %self.config.input_dir.display(),
            documents = documents.len(),
            "Loading and analyzing spec sheets"
        );

        let mut outcome = RunOutcome::default();
        let extractor = SpecExtractor::new(&self.client);

        for path in documents {
            if !path.is_file() {
                debug!(path = %path.display(), "Skipping non-file entry");
                continue;
            }

            writeln!(out, "Analyzing: {}", path.display())?;
            match extractor.extract(&path).await {
                Ok(record) => {
                    writeln!(out, "Extracted: {}", record.product_name)?;
                    outcome.records.push(record);
                }
                Err(reason) => {
                    warn!(path = %path.display(), error = %reason, "Spec extraction failed");
                    writeln!(out, "Error: {}: {}", path.display(), reason)?;
                    outcome.skipped.push(SkippedDocument { path, reason });
                }
            }
        }

        if outcome.records.is_empty() {
            info!(skipped = outcome.skipped.len(), "No spec records extracted");
            writeln!(out, "No spec sheets could be analyzed.")?;
            return Ok(outcome);
        }

        writeln!(out)?;
        write!(out, "{}", render_report(&outcome.records))?;
        outcome.cheapest = pick_cheapest(&outcome.records);

        persist(&outcome.records, &self.config.output_path)?;
        writeln!(out)?;
        writeln!(out, "Results saved to {}", self.config.output_path.display())?;
        outcome.saved_to = Some(self.config.output_path.clone());

        writeln!(out)?;
        match Analyst::new(&self.client).analyze(&outcome.records).await {
            Ok(verdict) => {
                write!(out, "{}", render_verdict(&verdict))?;
                outcome.verdict = Some(verdict);
            }
            Err(e) => {
                warn!(error = %e, "AI comparison failed");
                writeln!(out, "AI comparison failed: {}", e)?;
            }
        }

        info!(
            extracted = outcome.records.len(),
            skipped = outcome.skipped.len(),
            "Spec comparison finished"
        );
        Ok(outcome)
    }
}

/// Entries of the input directory, sorted by path.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| PipelineError::ReadInputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        paths.push(entry.map_err(read_err)?.path());
    }
    paths.sort();
    Ok(paths)
}

/// Write records as pretty JSON, replacing any previous file.
pub fn persist(records: &[SpecRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let write_err = |source| PipelineError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, json).map_err(write_err)?;

    debug!(path = %path.display(), records = records.len(), "Results saved");
    Ok(())
}
