//! Canonical coverage tables for the supported plan letters.
//!
//! Coverage for a given letter is federally standardized, so these are fixed
//! templates attached by lookup during normalization, never derived from
//! quote data.

use super::domain::{CoverageItem, PlanType};

fn item(name: &str, percentage_covered: u8, note: Option<&str>) -> CoverageItem {
    CoverageItem {
        name: name.to_string(),
        percentage_covered,
        note: note.map(str::to_string),
    }
}

/// The canonical 7-row coverage summary for a plan letter.
pub fn summary_for(plan_type: PlanType) -> Vec<CoverageItem> {
    match plan_type {
        PlanType::G => vec![
            item("Part A deductible", 100, None),
            item("Part A coinsurance and hospital costs", 100, None),
            item("Part B deductible", 0, Some("Not covered")),
            item("Part B coinsurance or copayment", 100, None),
            item("Part B excess charges", 100, None),
            item("Skilled nursing facility coinsurance", 100, None),
            item("Foreign travel emergency", 80, Some("Up to plan limits")),
        ],
        PlanType::N => vec![
            item("Part A deductible", 100, None),
            item("Part A coinsurance and hospital costs", 100, None),
            item("Part B deductible", 0, Some("Not covered")),
            item(
                "Part B coinsurance or copayment",
                100,
                Some("With some copayments"),
            ),
            item("Part B excess charges", 0, Some("Not covered")),
            item("Skilled nursing facility coinsurance", 100, None),
            item("Foreign travel emergency", 80, Some("Up to plan limits")),
        ],
    }
}
