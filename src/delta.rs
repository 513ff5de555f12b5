//! Year-over-year change labels.
//!
//! Headline cards and table cells treat a zero baseline differently, so the
//! two policies are kept as separate functions.

use crate::types::{Delta, DeltaSign};

pub const GROWTH: &str = "Growth";
pub const PLACEHOLDER: &str = "...";
pub const NEW: &str = "New";
pub const EMPTY_CELL: &str = "-";

/// Change shown under a headline metric. `percentage_point` switches to an
/// absolute difference for metrics that are already percentages.
pub fn headline_delta(current: f64, previous: f64, percentage_point: bool) -> Delta {
    if previous == 0.0 {
        let text = if current > 0.0 { GROWTH } else { PLACEHOLDER };
        return Delta::new(text, DeltaSign::Neutral);
    }
    let (delta, unit) = if percentage_point {
        (current - previous, " pp")
    } else {
        ((current - previous) / previous * 100.0, "%")
    };
    if delta >= 0.0 {
        Delta::new(format!("+{:.1}{}", delta, unit), DeltaSign::Positive)
    } else {
        Delta::new(format!("{:.1}{}", delta, unit), DeltaSign::Negative)
    }
}

/// Percent change shown in a breakdown table cell.
pub fn table_delta(current: f64, previous: f64) -> Delta {
    if previous == 0.0 {
        if current > 0.0 {
            return Delta::new(NEW, DeltaSign::Positive);
        }
        return Delta::new(EMPTY_CELL, DeltaSign::Neutral);
    }
    if current == 0.0 && previous > 0.0 {
        return Delta::new("-100.0%", DeltaSign::Negative);
    }

    let delta = (current - previous) / previous * 100.0;
    let sign = if delta > 0.0 {
        DeltaSign::Positive
    } else if delta < 0.0 {
        DeltaSign::Negative
    } else {
        DeltaSign::Neutral
    };
    let prefix = if delta > 0.0 { "+" } else { "" };
    Delta::new(format!("{}{:.1}%", prefix, delta), sign)
}
