pub mod parse;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod snapshot;

pub use parse::parse_fields;
pub use pipeline::{PipelineError, ProcessedReceipt, ReceiptPipeline};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
