//! CLI command implementations: single-document processing and sequential
//! batch runs with per-document isolation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::warn;

use routesheet_core::{Config, RegistrationRecord};
use routesheet_ocr::{OcrBackend, ReceiptPipeline};
use routesheet_sheet::{RouteSheetMapper, TemplateEngine, XlsxEngine};

#[derive(Args)]
pub struct ProcessArgs {
    /// Receipt image or PDF
    pub file: PathBuf,

    /// Skip writing the route sheet; print the extracted record only
    #[arg(long)]
    pub no_sheet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Receipt images or PDFs
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn load_config(
    path: Option<&Path>,
    template_override: Option<PathBuf>,
    output_override: Option<PathBuf>,
) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(p) => Config::from_file(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => Config::default(),
    };
    if let Some(template) = template_override {
        config.template_path = template;
    }
    if let Some(output_dir) = output_override {
        config.output_dir = output_dir;
    }
    Ok(config)
}

#[cfg(feature = "tesseract")]
fn build_recognizer(config: &Config) -> anyhow::Result<Box<dyn OcrBackend>> {
    use routesheet_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    Ok(Box::new(TesseractRecognizer::new(None, &config.ocr_language)))
}

#[cfg(not(feature = "tesseract"))]
fn build_recognizer(_config: &Config) -> anyhow::Result<Box<dyn OcrBackend>> {
    anyhow::bail!("this build has no OCR backend; rebuild with `--features tesseract`")
}

pub fn process(args: ProcessArgs, config: &Config) -> anyhow::Result<()> {
    let recognizer = build_recognizer(config)?;
    let pipeline = ReceiptPipeline::new(recognizer).with_snapshots(config.data_dir.clone());

    let receipt = pipeline
        .process_file(&args.file)
        .with_context(|| format!("processing {}", args.file.display()))?;
    println!("{}", summarize_record(&args.file, &receipt.record));

    if !args.no_sheet {
        let mapper = RouteSheetMapper::new(
            XlsxEngine,
            config.template_path.clone(),
            config.output_dir.clone(),
        );
        let output = mapper.apply(&receipt.record)?;
        println!("Route sheet created: {}", output.display());
    }
    Ok(())
}

pub fn batch(args: BatchArgs, config: &Config) -> anyhow::Result<()> {
    let recognizer = build_recognizer(config)?;
    let pipeline = ReceiptPipeline::new(recognizer).with_snapshots(config.data_dir.clone());
    let mapper = RouteSheetMapper::new(
        XlsxEngine,
        config.template_path.clone(),
        config.output_dir.clone(),
    );

    let results = run_batch(&pipeline, &mapper, &args.files);
    for item in &results {
        match &item.outcome {
            Ok((record, output)) => {
                println!("{}", summarize_record(&item.path, record));
                println!("Route sheet created: {}", output.display());
            }
            Err(reason) => {
                println!("Error processing {}: {reason}", item.path.display());
            }
        }
        println!("{}", "-".repeat(80));
    }

    let failed = results.iter().filter(|item| item.outcome.is_err()).count();
    println!("{} succeeded, {} failed", results.len() - failed, failed);
    Ok(())
}

/// Outcome of one document in a batch run, tagged with its source path.
pub struct BatchItem {
    pub path: PathBuf,
    pub outcome: Result<(RegistrationRecord, PathBuf), String>,
}

/// Each document stands alone: a failure is reported against its path and
/// the run continues with the next file.
pub fn run_batch<R: OcrBackend, E: TemplateEngine>(
    pipeline: &ReceiptPipeline<R>,
    mapper: &RouteSheetMapper<E>,
    files: &[PathBuf],
) -> Vec<BatchItem> {
    files
        .iter()
        .map(|path| {
            let outcome = pipeline
                .process_file(path)
                .map_err(|e| e.to_string())
                .and_then(|receipt| {
                    mapper
                        .apply(&receipt.record)
                        .map(|output| (receipt.record, output))
                        .map_err(|e| e.to_string())
                });
            if let Err(reason) = &outcome {
                warn!("{}: {}", path.display(), reason);
            }
            BatchItem { path: path.clone(), outcome }
        })
        .collect()
}

/// Human-readable field summary for one processed receipt.
fn summarize_record(path: &Path, record: &RegistrationRecord) -> String {
    let file = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("<receipt>");
    let mut out = format!("File: {file}\n");
    match record.program {
        Some(program) => out.push_str(&format!("Program: {program}\n")),
        None => out.push_str("Program: Unknown\n"),
    }
    match record.district {
        Some(d) => out.push_str(&format!("District: {} ({})\n", d.name, d.number)),
        None => out.push_str("District: Unknown\n"),
    }
    out.push_str(&format!(
        "Unit number: {}\n",
        record.local_unit_number.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!("Council number: {}\n", record.council_number));
    out.push_str(&format!(
        "Effective: {}  Term: {}  Expires: {}\n",
        record.effective_date, record.term, record.expiration_date
    ));
    for (category, count) in record.prices.iter().filter(|(_, count)| *count > 0) {
        out.push_str(&format!("  {}: {}\n", category.label(), count));
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
