use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use routesheet_core::{District, ParsedFields, PriceCategory, Program};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_digits, r"\d+");
re!(re_price_line,
    r"(?i)\b(\d+)\s+(youth bl|youth renewal|youth new|adult renewal|adult new|youth program fee|adult program fee)\b");
re!(re_counted_line, r"^\d+\s+\S");

// ── Public parsing API ───────────────────────────────────────────────────────

/// Scan raw OCR text line by line and accumulate whatever registration
/// fields it contains, as a fold over the lines. OCR line order is
/// unreliable, so a later match for a single-valued field overwrites an
/// earlier one; price lines accumulate. Unmatched lines are never an error —
/// an absent field is a valid outcome.
pub fn parse_fields(ocr_text: &str) -> ParsedFields {
    ocr_text
        .lines()
        .map(str::trim)
        .fold(ParsedFields::default(), scan_line)
}

/// One line can trigger several rules; each is evaluated independently.
fn scan_line(mut fields: ParsedFields, line: &str) -> ParsedFields {
    if let Some(district) = District::find_in_line(line) {
        fields.district = Some(district);
    }
    if let Some(unit) = find_unit_number(line) {
        fields.local_unit_number = Some(unit);
    }
    if let Some(program) = classify_program(line) {
        fields.program = Some(program);
    }
    if let Some((category, count)) = match_price_line(line) {
        fields.prices.add(category, count);
    }
    fields
}

/// First run of digits on a line that names a unit type. The keywords are
/// matched case-sensitively, as printed on the forms.
fn find_unit_number(line: &str) -> Option<String> {
    let names_a_unit = Program::ALL.iter().any(|p| line.contains(p.unit_keyword()));
    if !names_a_unit {
        return None;
    }
    re_digits().find(line).map(|m| m.as_str().to_string())
}

/// Fixed precedence chain: the first program whose formal name or unit-type
/// keyword appears on the line wins for that line.
fn classify_program(line: &str) -> Option<Program> {
    Program::ALL
        .into_iter()
        .find(|p| line.contains(p.name()) || line.contains(p.unit_keyword()))
}

/// `<count> <label>` with a label from the fixed price vocabulary. A count
/// followed by anything outside the vocabulary is skipped, not an error —
/// OCR noise routinely produces such lines.
fn match_price_line(line: &str) -> Option<(PriceCategory, u32)> {
    let Some(caps) = re_price_line().captures(line) else {
        if re_counted_line().is_match(line) {
            debug!(line, "count line with unrecognized price label");
        }
        return None;
    };
    let count: u32 = caps.get(1)?.as_str().parse().ok()?;
    let label = caps.get(2)?.as_str().to_lowercase();

    let category = match label.as_str() {
        "youth bl" => PriceCategory::YouthSlSubscription,
        "youth renewal" | "youth new" => PriceCategory::YouthRegistration,
        "adult renewal" | "adult new" => PriceCategory::AdultRegistration,
        "youth program fee" | "adult program fee" => PriceCategory::ProgramFee,
        _ => return None,
    };
    Some((category, count))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Districts ─────────────────────────────────────────────────────────────

    #[test]
    fn district_set_from_any_case() {
        let fields = parse_fields("recharter packet\nCALUMET district\n");
        let d = fields.district.unwrap();
        assert_eq!(d.name, "Calumet");
        assert_eq!(d.number, 1);
    }

    #[test]
    fn district_absent_when_no_name_appears() {
        let fields = parse_fields("Troop 123\n5 Youth Renewal");
        assert!(fields.district.is_none());
    }

    #[test]
    fn last_district_line_wins() {
        let fields = parse_fields("Calumet\nsome other text\nIron Horse");
        assert_eq!(fields.district.unwrap().name, "Iron Horse");
    }

    // ── Unit numbers ──────────────────────────────────────────────────────────

    #[test]
    fn unit_number_follows_unit_keyword() {
        let fields = parse_fields("Pack 4512 of Munster");
        assert_eq!(fields.local_unit_number.as_deref(), Some("4512"));
    }

    #[test]
    fn unit_keyword_is_case_sensitive() {
        let fields = parse_fields("troop 123");
        assert!(fields.local_unit_number.is_none());
    }

    #[test]
    fn digits_without_unit_keyword_are_ignored() {
        let fields = parse_fields("invoice 20250114");
        assert!(fields.local_unit_number.is_none());
    }

    #[test]
    fn first_digit_run_on_the_line_is_taken() {
        let fields = parse_fields("Crew 77 meets room 204");
        assert_eq!(fields.local_unit_number.as_deref(), Some("77"));
    }

    #[test]
    fn later_unit_line_overwrites() {
        let fields = parse_fields("Troop 1\nShip 9");
        assert_eq!(fields.local_unit_number.as_deref(), Some("9"));
    }

    // ── Program classification ────────────────────────────────────────────────

    #[test]
    fn program_from_formal_name() {
        assert_eq!(parse_fields("Venturing youth roster").program, Some(Program::Venturing));
    }

    #[test]
    fn program_from_unit_keyword() {
        assert_eq!(parse_fields("Ship 5912").program, Some(Program::SeaScouts));
        assert_eq!(parse_fields("Post 300").program, Some(Program::Exploring));
    }

    #[test]
    fn precedence_prefers_scouts_bsa_within_a_line() {
        // A line naming both a Troop and a Pack classifies by the first
        // branch of the chain.
        assert_eq!(parse_fields("Pack and Troop joint").program, Some(Program::ScoutsBsa));
    }

    #[test]
    fn later_program_line_overwrites_earlier() {
        let fields = parse_fields("Troop 123\nCub Scouts day camp");
        assert_eq!(fields.program, Some(Program::CubScouts));
    }

    #[test]
    fn sea_scouts_not_mistaken_for_scouts_bsa() {
        assert_eq!(parse_fields("Sea Scouts").program, Some(Program::SeaScouts));
    }

    // ── Price lines ───────────────────────────────────────────────────────────

    #[test]
    fn price_lines_map_to_categories() {
        let fields = parse_fields("5 Youth Renewal\n2 Adult New\n1 Youth BL");
        assert_eq!(fields.prices.get(PriceCategory::YouthRegistration), Some(5));
        assert_eq!(fields.prices.get(PriceCategory::AdultRegistration), Some(2));
        assert_eq!(fields.prices.get(PriceCategory::YouthSlSubscription), Some(1));
    }

    #[test]
    fn repeated_category_lines_sum() {
        let fields = parse_fields("3 Youth Renewal\n3 Youth Renewal");
        assert_eq!(fields.prices.get(PriceCategory::YouthRegistration), Some(6));
    }

    #[test]
    fn youth_new_counts_as_youth_registration() {
        let fields = parse_fields("4 Youth New");
        assert_eq!(fields.prices.get(PriceCategory::YouthRegistration), Some(4));
    }

    #[test]
    fn program_fee_variants_share_a_bucket() {
        let fields = parse_fields("2 Youth Program Fee\n1 Adult Program Fee");
        assert_eq!(fields.prices.get(PriceCategory::ProgramFee), Some(3));
    }

    #[test]
    fn price_label_match_is_case_insensitive() {
        let fields = parse_fields("7 YOUTH RENEWAL");
        assert_eq!(fields.prices.get(PriceCategory::YouthRegistration), Some(7));
    }

    #[test]
    fn unknown_price_label_is_skipped() {
        let fields = parse_fields("7 Unit Charter\n3 Widget Fee");
        assert!(fields.prices.iter().all(|(_, count)| count == 0));
        assert_eq!(fields.prices.get(PriceCategory::UnitCharter), None);
    }

    #[test]
    fn price_count_embedded_mid_line_is_found() {
        let fields = parse_fields("Subtotal: 5 Adult Renewal @ $45");
        assert_eq!(fields.prices.get(PriceCategory::AdultRegistration), Some(5));
    }

    // ── Whole-document behavior ───────────────────────────────────────────────

    #[test]
    fn one_line_can_trigger_several_rules() {
        let fields = parse_fields("Troop 123 Calumet");
        assert_eq!(fields.program, Some(Program::ScoutsBsa));
        assert_eq!(fields.local_unit_number.as_deref(), Some("123"));
        assert_eq!(fields.district.unwrap().name, "Calumet");
    }

    #[test]
    fn empty_text_yields_default_fields() {
        let fields = parse_fields("");
        assert!(fields.district.is_none());
        assert!(fields.local_unit_number.is_none());
        assert!(fields.program.is_none());
        assert!(fields.prices.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn garbage_input_does_not_panic() {
        let _ = parse_fields("!@#$%^&*()\n\u{0}\u{1}\u{2}");
    }

    #[test]
    fn full_receipt_scenario() {
        let fields = parse_fields("Troop 123\nCalumet\n5 Youth Renewal\n2 Adult New");
        assert_eq!(fields.program, Some(Program::ScoutsBsa));
        assert_eq!(fields.local_unit_number.as_deref(), Some("123"));
        let d = fields.district.unwrap();
        assert_eq!((d.name, d.number), ("Calumet", 1));
        assert_eq!(fields.prices.get(PriceCategory::YouthRegistration), Some(5));
        assert_eq!(fields.prices.get(PriceCategory::AdultRegistration), Some(2));
        let others = fields
            .prices
            .iter()
            .filter(|(c, _)| {
                *c != PriceCategory::YouthRegistration && *c != PriceCategory::AdultRegistration
            })
            .map(|(_, count)| count)
            .collect::<Vec<_>>();
        assert!(others.iter().all(|&count| count == 0));
    }
}
