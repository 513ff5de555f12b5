use crate::error::{DashboardError, Result};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let csv_err = |source: csv::Error| DashboardError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for r in rows {
        wtr.serialize(r).map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| DashboardError::io(path, e))?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(|source| DashboardError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, s).map_err(|e| DashboardError::io(path, e))?;
    Ok(())
}

/// Markdown rendering of at most `max_rows` rows.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", render_table(rows, max_rows));
    if rows.len() > max_rows {
        println!("({} more rows not shown)", rows.len() - max_rows);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KpiCard;

    fn card(label: &str) -> KpiCard {
        KpiCard {
            label: label.to_string(),
            current: "1".into(),
            previous: "0 (Previous)".into(),
            change: "Growth".into(),
        }
    }

    #[test]
    fn render_limits_rows() {
        let rendered = render_table(&[card("Revenue"), card("Quantity")], 1);
        assert!(rendered.contains("Revenue"));
        assert!(!rendered.contains("Quantity"));
        assert!(rendered.contains("| Metric"));
        assert_eq!(render_table::<KpiCard>(&[], 5), "(no rows)");
    }

    #[test]
    fn writes_csv_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("kpis.csv");
        write_csv(&csv_path, &[card("Revenue")]).unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("Metric,Current,Previous,Change"));
        assert!(text.contains("Revenue,1,0 (Previous),Growth"));

        let json_path = dir.path().join("kpis.json");
        write_json(&json_path, &card("Quantity")).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["Metric"], "Quantity");
    }

    #[test]
    fn write_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        assert!(write_csv(&path, &[card("Revenue")]).is_err());
    }
}
