use crate::delta::{headline_delta, table_delta};
use crate::filter::FilterSelection;
use crate::types::{Aggregate, BreakdownTableRow, DashboardSummary, HeadlineMetrics, KpiCard, SummaryRow};
use crate::util::{format_currency, format_number, format_percent};
use std::cmp::Ordering;

/// Current-period revenue, highest first. Equal revenue falls back to the key
/// so output is stable across runs.
pub fn sort_by_current_revenue(rows: &mut [SummaryRow]) {
    rows.sort_by(|a, b| {
        b.current_revenue
            .partial_cmp(&a.current_revenue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
}

pub fn sorted(rows: &[SummaryRow]) -> Vec<SummaryRow> {
    let mut rows = rows.to_vec();
    sort_by_current_revenue(&mut rows);
    rows
}

pub fn kpi_cards(metrics: &HeadlineMetrics) -> Vec<KpiCard> {
    let (prior, current) = (&metrics.prior, &metrics.current);
    vec![
        KpiCard {
            label: "Revenue".to_string(),
            current: format_currency(current.total_revenue),
            previous: format!("{} (Previous)", format_currency(prior.total_revenue)),
            change: headline_delta(current.total_revenue, prior.total_revenue, false).text,
        },
        KpiCard {
            label: "Quantity".to_string(),
            current: format_number(current.total_quantity, 0),
            previous: format!("{} (Previous)", format_number(prior.total_quantity, 0)),
            change: headline_delta(current.total_quantity, prior.total_quantity, false).text,
        },
        KpiCard {
            label: "Target Attainment".to_string(),
            current: format_percent(current.attainment_pct),
            previous: format!("{} (Previous)", format_percent(prior.attainment_pct)),
            change: headline_delta(current.attainment_pct, prior.attainment_pct, true).text,
        },
    ]
}

/// Sorted, display-ready rows for one breakdown table.
pub fn breakdown_table(rows: &[SummaryRow]) -> Vec<BreakdownTableRow> {
    sorted(rows)
        .into_iter()
        .map(|r| BreakdownTableRow {
            quantity_prior: format_number(r.prior_quantity, 0),
            quantity_current: format_number(r.current_quantity, 0),
            quantity_change: table_delta(r.current_quantity, r.prior_quantity).text,
            revenue_prior: format_currency(r.prior_revenue),
            revenue_current: format_currency(r.current_revenue),
            revenue_change: table_delta(r.current_revenue, r.prior_revenue).text,
            name: r.key,
        })
        .collect()
}

pub fn generate_summary(aggregate: &Aggregate, filter: &FilterSelection) -> DashboardSummary {
    DashboardSummary {
        generated_at: chrono::Local::now(),
        salesperson_filter: filter.salesperson.to_string(),
        group_filter: filter.group.to_string(),
        metrics: aggregate.metrics,
        vendor_rows: sorted(&aggregate.vendor_rows),
        group_rows: sorted(&aggregate.group_rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PeriodMetrics;
    use pretty_assertions::assert_eq;

    fn row(key: &str, prior: f64, current: f64) -> SummaryRow {
        SummaryRow {
            key: key.to_string(),
            prior_revenue: prior,
            current_revenue: current,
            prior_quantity: prior / 10.0,
            current_quantity: current / 10.0,
        }
    }

    #[test]
    fn sorts_descending_with_key_tiebreak() {
        let mut rows = vec![row("b", 0.0, 10.0), row("c", 0.0, 30.0), row("a", 0.0, 10.0)];
        sort_by_current_revenue(&mut rows);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn breakdown_rows_are_formatted() {
        let table = breakdown_table(&[row("Ana", 1000.0, 1500.0), row("Bruno", 0.0, 2000.0)]);
        assert_eq!(
            table[0],
            BreakdownTableRow {
                name: "Bruno".into(),
                quantity_prior: "0".into(),
                quantity_current: "200".into(),
                quantity_change: "New".into(),
                revenue_prior: "R$ 0,00".into(),
                revenue_current: "R$ 2.000,00".into(),
                revenue_change: "New".into(),
            }
        );
        assert_eq!(table[1].revenue_change, "+50.0%");
        assert_eq!(table[1].quantity_change, "+50.0%");
    }

    #[test]
    fn kpi_cards_use_headline_policy() {
        let metrics = HeadlineMetrics {
            prior: PeriodMetrics {
                total_revenue: 0.0,
                total_quantity: 100.0,
                total_target: 200.0,
                attainment_pct: 50.0,
            },
            current: PeriodMetrics {
                total_revenue: 500.0,
                total_quantity: 90.0,
                total_target: 100.0,
                attainment_pct: 90.0,
            },
        };
        let cards = kpi_cards(&metrics);
        assert_eq!(cards[0].change, "Growth");
        assert_eq!(cards[0].previous, "R$ 0,00 (Previous)");
        assert_eq!(cards[1].change, "-10.0%");
        assert_eq!(cards[2].current, "90,0%");
        assert_eq!(cards[2].change, "+40.0 pp");
    }

    #[test]
    fn summary_rows_are_sorted() {
        let agg = Aggregate {
            metrics: HeadlineMetrics::default(),
            vendor_rows: vec![row("a", 0.0, 1.0), row("b", 0.0, 2.0)],
            group_rows: vec![row("g", 0.0, 5.0)],
        };
        let summary = generate_summary(&agg, &FilterSelection::default());
        assert_eq!(summary.vendor_rows[0].key, "b");
        assert_eq!(summary.salesperson_filter, "all");
        assert_eq!(summary.group_rows.len(), 1);
    }
}
