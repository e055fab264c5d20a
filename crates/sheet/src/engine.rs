use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read template: {0}")]
    Read(String),
    #[error("Failed to write route sheet: {0}")]
    Write(String),
}

/// One value headed for a named cell of the template's active sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub cell: &'static str,
    pub value: CellValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Count(u32),
}

/// The document-template capability: open a fixed-layout template, apply
/// cell writes, persist the result at `output`. Substitutable so the mapper
/// can be tested without real spreadsheet I/O.
pub trait TemplateEngine {
    fn apply(
        &self,
        template: &Path,
        writes: &[CellWrite],
        output: &Path,
    ) -> Result<(), TemplateError>;
}

// ── XLSX engine ───────────────────────────────────────────────────────────────

/// XLSX implementation backed by umya-spreadsheet. The template is opened
/// fresh on every call and never mutated; only the output path is written,
/// replacing any earlier artifact there.
pub struct XlsxEngine;

impl TemplateEngine for XlsxEngine {
    fn apply(
        &self,
        template: &Path,
        writes: &[CellWrite],
        output: &Path,
    ) -> Result<(), TemplateError> {
        if !template.exists() {
            return Err(TemplateError::NotFound(template.to_path_buf()));
        }
        let mut book = umya_spreadsheet::reader::xlsx::read(template)
            .map_err(|e| TemplateError::Read(e.to_string()))?;
        let sheet = book.get_active_sheet_mut();
        for write in writes {
            let cell = sheet.get_cell_mut(write.cell);
            match &write.value {
                CellValue::Text(text) => {
                    cell.set_value(text.as_str());
                }
                CellValue::Count(count) => {
                    cell.set_value_number(*count);
                }
            }
        }
        umya_spreadsheet::writer::xlsx::write(&book, output)
            .map_err(|e| TemplateError::Write(e.to_string()))
    }
}

// ── Recording engine (test double) ────────────────────────────────────────────

/// Captures the writes it was asked to apply instead of touching a
/// spreadsheet. Lets mapper behavior be asserted without template files.
#[derive(Default)]
pub struct RecordingEngine {
    applied: Mutex<Vec<(PathBuf, Vec<CellWrite>)>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every (output path, writes) pair applied so far, in order.
    pub fn applied(&self) -> Vec<(PathBuf, Vec<CellWrite>)> {
        self.applied.lock().unwrap().clone()
    }
}

impl TemplateEngine for RecordingEngine {
    fn apply(
        &self,
        _template: &Path,
        writes: &[CellWrite],
        output: &Path,
    ) -> Result<(), TemplateError> {
        self.applied
            .lock()
            .unwrap()
            .push((output.to_path_buf(), writes.to_vec()));
        Ok(())
    }
}
