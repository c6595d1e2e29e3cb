use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::address::AddressNormalizer;
use crate::export::{self, ExportError, MergeError, Row, CONVERTER_HEADER, MERGED_HEADER};
use crate::extract::{ExtractError, ExtractionPolicy, PlacemarkExtractor};
use crate::places::PlaceLookup;

pub const MERGED_FILE_NAME: &str = "merged.csv";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to convert {}: {source}", input.display())]
    Extract {
        input: PathBuf,
        #[source]
        source: ExtractError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
    #[error("failed to merge converter output: {0}")]
    Merge(#[from] MergeError),
}

/// A KML file paired with the policy used to read it.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub policy: ExtractionPolicy,
    pub input: PathBuf,
}

impl ConversionJob {
    pub fn circular<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            policy: ExtractionPolicy::circular(),
            input: input.into(),
        }
    }

    pub fn reuse<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            policy: ExtractionPolicy::reuse(),
            input: input.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOutput {
    pub label: &'static str,
    pub input: PathBuf,
    pub path: PathBuf,
    pub rows: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output_dir: PathBuf,
    pub outputs: Vec<ConverterOutput>,
    pub merged_path: PathBuf,
    /// Data rows in the merged file, excluding the header.
    pub merged_rows: usize,
}

/// Name of the per-run directory, e.g. `Output_20240305_090701`.
pub fn run_directory_name(started_at: NaiveDateTime) -> String {
    format!("Output_{}", started_at.format("%Y%m%d_%H%M%S"))
}

/// Runs each job in order, writes one CSV per job, then the merged CSV.
#[derive(Debug)]
pub struct ConversionPipeline<'a> {
    lookup: &'a dyn PlaceLookup,
    normalizer: &'a AddressNormalizer,
    output_root: PathBuf,
}

impl<'a> ConversionPipeline<'a> {
    pub fn new<P: Into<PathBuf>>(
        lookup: &'a dyn PlaceLookup,
        normalizer: &'a AddressNormalizer,
        output_root: P,
    ) -> Self {
        Self {
            lookup,
            normalizer,
            output_root: output_root.into(),
        }
    }

    /// Converts into a fresh timestamped directory under the output root.
    pub fn run(&self, jobs: &[ConversionJob]) -> Result<ConversionSummary, PipelineError> {
        if jobs.is_empty() {
            return Err(MergeError::MissingInputs.into());
        }
        let output_dir = self
            .output_root
            .join(run_directory_name(Local::now().naive_local()));
        self.run_at(jobs, &output_dir)
    }

    pub fn run_at(
        &self,
        jobs: &[ConversionJob],
        output_dir: &Path,
    ) -> Result<ConversionSummary, PipelineError> {
        if jobs.is_empty() {
            return Err(MergeError::MissingInputs.into());
        }

        std::fs::create_dir_all(output_dir).map_err(|source| PipelineError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        info!(output_dir = %output_dir.display(), "created output directory");

        let converter_header = export::header_row(&CONVERTER_HEADER);
        let mut outputs = Vec::with_capacity(jobs.len());
        let mut sequences: Vec<Vec<Row>> = Vec::with_capacity(jobs.len());

        for job in jobs {
            let extractor = PlacemarkExtractor::new(job.policy.clone(), self.lookup, self.normalizer);
            let report = extractor
                .extract_path(&job.input)
                .map_err(|source| PipelineError::Extract {
                    input: job.input.clone(),
                    source,
                })?;

            let rows = report.rows();
            let path = output_dir.join(job.policy.output_file_name);
            write_with_context(&path, |path| {
                export::write_rows(path, &converter_header, &rows)
            })?;
            info!(
                converter = job.policy.label,
                path = %path.display(),
                rows = rows.len(),
                skipped = report.skipped.len(),
                "wrote converter output"
            );

            outputs.push(ConverterOutput {
                label: job.policy.label,
                input: job.input.clone(),
                path,
                rows: rows.len(),
                skipped: report.skipped.len(),
            });
            sequences.push(rows);
        }

        let merged = export::merge_rows(&sequences, &export::header_row(&MERGED_HEADER))?;
        let merged_path = output_dir.join(MERGED_FILE_NAME);
        write_with_context(&merged_path, |path| export::write_records(path, &merged))?;
        let merged_rows = merged.len().saturating_sub(1);
        info!(path = %merged_path.display(), rows = merged_rows, "wrote merged output");

        Ok(ConversionSummary {
            output_dir: output_dir.to_path_buf(),
            outputs,
            merged_path,
            merged_rows,
        })
    }
}

fn write_with_context<F>(path: &Path, write: F) -> Result<(), PipelineError>
where
    F: FnOnce(&Path) -> Result<(), ExportError>,
{
    write(path).map_err(|source| PipelineError::Export {
        path: path.to_path_buf(),
        source,
    })
}
