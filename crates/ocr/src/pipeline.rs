use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info};

use routesheet_core::{dates, RegistrationRecord};

use crate::parse;
use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{OcrBackend, OcrError};
use crate::snapshot;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of one extraction pass over one document.
#[derive(Debug)]
pub struct ProcessedReceipt {
    pub record: RegistrationRecord,
    /// Raw OCR text, kept for display and diagnostics.
    pub ocr_text: String,
    /// Diagnostics dump locations (raw OCR text, record JSON), when enabled.
    pub snapshots: Option<(PathBuf, PathBuf)>,
}

/// Orchestrates one document: load → normalize → OCR → parse → derive
/// dates → assemble. Fully synchronous; a caller batching documents catches
/// failures at this boundary so one bad receipt never sinks the rest.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
    /// Diagnostics snapshot directory; `None` disables dumps.
    data_dir: Option<PathBuf>,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer, data_dir: None }
    }

    /// Enable raw-OCR and record snapshots under `data_dir`.
    pub fn with_snapshots(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = Some(data_dir);
        self
    }

    /// Run the full extraction pass for a document on disk, dating the
    /// record from the current calendar day.
    pub fn process_file(&self, path: &Path) -> Result<ProcessedReceipt, PipelineError> {
        self.process_file_as_of(path, Local::now().date_naive())
    }

    /// Same as [`Self::process_file`] with an explicit extraction moment.
    pub fn process_file_as_of(
        &self,
        path: &Path,
        today: NaiveDate,
    ) -> Result<ProcessedReceipt, PipelineError> {
        info!("Processing receipt: {}", path.display());

        let image_bytes = preprocess::prepare_for_ocr(path)?;
        let ocr_text = self.recognizer.recognize(&image_bytes)?;
        debug!(chars = ocr_text.len(), "OCR pass complete");

        let parsed = parse::parse_fields(&ocr_text);
        let effective = dates::effective_date_for(today);
        let expiration = dates::expiration_date_for(effective);
        let record = RegistrationRecord::assemble(parsed, effective, expiration);

        let snapshots = match &self.data_dir {
            Some(dir) => {
                let source_bytes = std::fs::read(path)?;
                Some(snapshot::write_snapshots(dir, &source_bytes, &ocr_text, &record)?)
            }
            None => None,
        };

        Ok(ProcessedReceipt { record, ocr_text, snapshots })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
