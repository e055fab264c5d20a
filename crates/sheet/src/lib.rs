pub mod engine;
pub mod mapper;

pub use engine::{CellValue, CellWrite, RecordingEngine, TemplateEngine, TemplateError, XlsxEngine};
pub use mapper::{artifact_name, cell_writes, unit_type_label, RouteSheetMapper};
