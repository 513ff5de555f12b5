//! Aggregation of two already-filtered periods into headline metrics and
//! per-salesperson / per-group breakdowns.

use crate::types::{Aggregate, HeadlineMetrics, NormalizedRecord, Period, PeriodMetrics, SummaryRow};
use std::collections::HashMap;

/// Rows keyed by string, kept in first-encounter order.
#[derive(Default)]
struct RowIndex {
    index: HashMap<String, usize>,
    rows: Vec<SummaryRow>,
}

impl RowIndex {
    fn entry(&mut self, key: &str) -> &mut SummaryRow {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.rows.push(SummaryRow::new(key));
                self.index.insert(key.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    fn into_rows(self) -> Vec<SummaryRow> {
        self.rows
    }
}

pub fn attainment_pct(quantity: f64, target: f64) -> f64 {
    if target > 0.0 {
        quantity / target * 100.0
    } else {
        0.0
    }
}

/// Pure function of its inputs: prior records are walked first, then current
/// ones. Output rows are unsorted.
pub fn aggregate(prior: &[NormalizedRecord], current: &[NormalizedRecord]) -> Aggregate {
    let tagged = prior
        .iter()
        .map(|r| (Period::Prior, r))
        .chain(current.iter().map(|r| (Period::Current, r)));

    let mut metrics = HeadlineMetrics::default();
    let mut vendors = RowIndex::default();
    let mut groups = RowIndex::default();

    for (period, r) in tagged {
        let m = metrics.period_mut(period);
        m.total_revenue += r.revenue;
        m.total_quantity += r.quantity;
        m.total_target += r.target;

        vendors.entry(&r.salesperson_name).add(period, r.revenue, r.quantity);
        groups.entry(&r.group).add(period, r.revenue, r.quantity);
    }

    for m in [&mut metrics.prior, &mut metrics.current] {
        let PeriodMetrics {
            total_quantity,
            total_target,
            ..
        } = *m;
        m.attainment_pct = attainment_pct(total_quantity, total_target);
    }

    Aggregate {
        metrics,
        vendor_rows: vendors.into_rows(),
        group_rows: groups.into_rows(),
    }
}
