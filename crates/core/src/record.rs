use chrono::NaiveDate;
use serde::Serialize;

use crate::district::District;
use crate::prices::Prices;
use crate::program::Program;

/// Council number printed on every route sheet this system produces.
pub const COUNCIL_NUMBER: &str = "456";

/// Registration term. Every receipt this system handles is a 12-month
/// recharter.
pub const TERM: &str = "12 months";

/// Fields recovered from OCR text. All optional: a receipt that names no
/// district or program still yields a usable partial record, and the mapper
/// decides what absence means.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedFields {
    pub district: Option<District>,
    pub local_unit_number: Option<String>,
    pub program: Option<Program>,
    pub prices: Prices,
}

/// Structured extraction result for one receipt document. Immutable once
/// assembled; the mapper only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationRecord {
    pub council_number: &'static str,
    pub district: Option<District>,
    pub local_unit_number: Option<String>,
    pub program: Option<Program>,
    pub effective_date: NaiveDate,
    pub term: &'static str,
    pub expiration_date: NaiveDate,
    pub prices: Prices,
}

impl RegistrationRecord {
    /// Merge parser output, derived dates, and fixed constants. The three
    /// sources contribute disjoint fields, so no precedence rules apply.
    pub fn assemble(
        parsed: ParsedFields,
        effective_date: NaiveDate,
        expiration_date: NaiveDate,
    ) -> Self {
        RegistrationRecord {
            council_number: COUNCIL_NUMBER,
            district: parsed.district,
            local_unit_number: parsed.local_unit_number,
            program: parsed.program,
            effective_date,
            term: TERM,
            expiration_date,
            prices: parsed.prices,
        }
    }
}
