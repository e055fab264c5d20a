use serde::Serialize;
use std::collections::BTreeMap;

/// Registration-fee bucket. The route sheet carries eleven fixed positions;
/// the receipt vocabulary only ever fills ten of them — "Unit Charter" has a
/// row on the sheet but no corresponding receipt line, so it stays at the
/// template default.
///
/// Declaration order is template row order (the derived `Ord` drives map
/// iteration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PriceCategory {
    #[serde(rename = "Unit Charter")]
    UnitCharter,
    #[serde(rename = "Youth Registration")]
    YouthRegistration,
    #[serde(rename = "Youth SL Subscription")]
    YouthSlSubscription,
    #[serde(rename = "Youth Transfer")]
    YouthTransfer,
    #[serde(rename = "Adult Registration")]
    AdultRegistration,
    #[serde(rename = "Multiple/Position Change")]
    MultiplePositionChange,
    #[serde(rename = "Adult Transfer")]
    AdultTransfer,
    #[serde(rename = "Adult SL Subscription")]
    AdultSlSubscription,
    #[serde(rename = "Youth Exploring")]
    YouthExploring,
    #[serde(rename = "Adult Exploring")]
    AdultExploring,
    #[serde(rename = "Program Fee")]
    ProgramFee,
}

impl PriceCategory {
    /// Label as printed on the route sheet.
    pub fn label(self) -> &'static str {
        match self {
            PriceCategory::UnitCharter => "Unit Charter",
            PriceCategory::YouthRegistration => "Youth Registration",
            PriceCategory::YouthSlSubscription => "Youth SL Subscription",
            PriceCategory::YouthTransfer => "Youth Transfer",
            PriceCategory::AdultRegistration => "Adult Registration",
            PriceCategory::MultiplePositionChange => "Multiple/Position Change",
            PriceCategory::AdultTransfer => "Adult Transfer",
            PriceCategory::AdultSlSubscription => "Adult SL Subscription",
            PriceCategory::YouthExploring => "Youth Exploring",
            PriceCategory::AdultExploring => "Adult Exploring",
            PriceCategory::ProgramFee => "Program Fee",
        }
    }

    /// The ten categories the parser seeds at zero. "Unit Charter" is
    /// deliberately absent.
    pub const PARSER_CATEGORIES: [PriceCategory; 10] = [
        PriceCategory::YouthRegistration,
        PriceCategory::YouthSlSubscription,
        PriceCategory::YouthTransfer,
        PriceCategory::AdultRegistration,
        PriceCategory::MultiplePositionChange,
        PriceCategory::AdultTransfer,
        PriceCategory::AdultSlSubscription,
        PriceCategory::YouthExploring,
        PriceCategory::AdultExploring,
        PriceCategory::ProgramFee,
    ];
}

/// Accumulated registration counts keyed by category. Every category the
/// parser can produce is always present, defaulting to zero; lookups for a
/// category that was never seeded return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prices(BTreeMap<PriceCategory, u32>);

impl Prices {
    pub fn new() -> Self {
        Prices(
            PriceCategory::PARSER_CATEGORIES
                .into_iter()
                .map(|category| (category, 0))
                .collect(),
        )
    }

    /// Add `count` into a bucket. Repeated receipt lines for one category
    /// accumulate rather than overwrite.
    pub fn add(&mut self, category: PriceCategory, count: u32) {
        *self.0.entry(category).or_insert(0) += count;
    }

    pub fn get(&self, category: PriceCategory) -> Option<u32> {
        self.0.get(&category).copied()
    }

    /// Iterate in template row order.
    pub fn iter(&self) -> impl Iterator<Item = (PriceCategory, u32)> + '_ {
        self.0.iter().map(|(category, count)| (*category, *count))
    }
}

impl Default for Prices {
    fn default() -> Self {
        Prices::new()
    }
}
