use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;

use routesheet_core::{PriceCategory, Program, RegistrationRecord};

use crate::engine::{CellValue, CellWrite, TemplateEngine, TemplateError};

// Header positions, row 4 of the template. Column F is not part of the
// contract surface.
const CELL_PROGRAM: &str = "B4";
const CELL_COUNCIL: &str = "C4";
const CELL_DISTRICT: &str = "D4";
const CELL_UNIT_TYPE: &str = "E4";
const CELL_UNIT_NUMBER: &str = "G4";
const CELL_EFFECTIVE: &str = "H4";
const CELL_TERM: &str = "I4";
const CELL_EXPIRATION: &str = "J4";

/// Price rows 8–18, column C, in template order.
const PRICE_CELLS: [(PriceCategory, &str); 11] = [
    (PriceCategory::UnitCharter, "C8"),
    (PriceCategory::YouthRegistration, "C9"),
    (PriceCategory::YouthSlSubscription, "C10"),
    (PriceCategory::YouthTransfer, "C11"),
    (PriceCategory::AdultRegistration, "C12"),
    (PriceCategory::MultiplePositionChange, "C13"),
    (PriceCategory::AdultTransfer, "C14"),
    (PriceCategory::AdultSlSubscription, "C15"),
    (PriceCategory::YouthExploring, "C16"),
    (PriceCategory::AdultExploring, "C17"),
    (PriceCategory::ProgramFee, "C18"),
];

/// Fills the route-sheet template from one record and saves the artifact
/// under a name derived from the record's fields. Same record ⇒ same path;
/// a repeat apply overwrites the earlier artifact.
pub struct RouteSheetMapper<E: TemplateEngine> {
    engine: E,
    template_path: PathBuf,
    output_dir: PathBuf,
}

impl<E: TemplateEngine> RouteSheetMapper<E> {
    pub fn new(engine: E, template_path: PathBuf, output_dir: PathBuf) -> Self {
        Self { engine, template_path, output_dir }
    }

    /// Write the record into the template and persist the artifact,
    /// returning its path.
    pub fn apply(&self, record: &RegistrationRecord) -> Result<PathBuf, TemplateError> {
        let writes = cell_writes(record);
        let output = self.output_dir.join(artifact_name(record));
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TemplateError::Write(e.to_string()))?;
        }
        self.engine.apply(&self.template_path, &writes, &output)?;
        info!("Route sheet written: {}", output.display());
        Ok(output)
    }
}

/// The full set of cell writes for one record. Absent optional fields leave
/// their cells at template default; the unit-type cell always gets a value.
/// Price categories are written only when present as keys — an explicit
/// zero is written, a missing key (Unit Charter) is not.
pub fn cell_writes(record: &RegistrationRecord) -> Vec<CellWrite> {
    let mut writes = Vec::new();
    if let Some(program) = record.program {
        writes.push(text(CELL_PROGRAM, program.name()));
    }
    writes.push(text(CELL_COUNCIL, record.council_number));
    if let Some(district) = record.district {
        writes.push(CellWrite { cell: CELL_DISTRICT, value: CellValue::Count(district.number) });
    }
    writes.push(text(CELL_UNIT_TYPE, unit_type_label(record.program)));
    if let Some(unit) = &record.local_unit_number {
        writes.push(text(CELL_UNIT_NUMBER, unit));
    }
    writes.push(text(CELL_EFFECTIVE, &format_cell_date(record.effective_date)));
    writes.push(text(CELL_TERM, record.term));
    writes.push(text(CELL_EXPIRATION, &format_cell_date(record.expiration_date)));

    for (category, cell) in PRICE_CELLS {
        if let Some(count) = record.prices.get(category) {
            writes.push(CellWrite { cell, value: CellValue::Count(count) });
        }
    }
    writes
}

/// Unit-type label written next to the program; "Unknown" when no program
/// was recognized.
pub fn unit_type_label(program: Option<Program>) -> &'static str {
    program.map(Program::unit_keyword).unwrap_or("Unknown")
}

/// `Route_Sheet_<district>_<unit>_<MM-DD-YYYY>.xlsx`, spaces in the district
/// name replaced with underscores and "Unknown" standing in for absent
/// fields.
pub fn artifact_name(record: &RegistrationRecord) -> String {
    let district = record
        .district
        .map(|d| d.name.replace(' ', "_"))
        .unwrap_or_else(|| "Unknown".to_string());
    let unit = record.local_unit_number.as_deref().unwrap_or("Unknown");
    let date = record.effective_date.format("%m-%d-%Y");
    format!("Route_Sheet_{district}_{unit}_{date}.xlsx")
}

/// Cells show dates month-first; internal storage is year-first.
fn format_cell_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn text(cell: &'static str, value: &str) -> CellWrite {
    CellWrite { cell, value: CellValue::Text(value.to_string()) }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
