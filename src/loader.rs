use crate::error::{DashboardError, Result};
use crate::types::{CsvRow, JsonRow, RawRecord};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_records: usize,
    pub missing_salesperson: usize,
    pub missing_group: usize,
    /// Numeric fields present but unusable; these are counted as zero
    pub invalid_numbers: usize,
}

impl LoadReport {
    fn record(&mut self, r: &RawRecord) {
        self.total_records += 1;
        if r.salesperson.as_deref().map_or(true, |s| s.trim().is_empty()) {
            self.missing_salesperson += 1;
        }
        if r.group.as_deref().map_or(true, |s| s.trim().is_empty()) {
            self.missing_group += 1;
        }
        self.invalid_numbers += r
            .numbers()
            .iter()
            .filter(|n| n.resolve().is_none())
            .count();
    }
}

/// Both periods' raw records, read in order: prior first, then current.
#[derive(Debug, Clone)]
pub struct LoadedPair {
    pub prior: Vec<RawRecord>,
    pub prior_report: LoadReport,
    pub current: Vec<RawRecord>,
    pub current_report: LoadReport,
}

enum Format {
    Json,
    Csv,
}

fn detect_format(path: &Path) -> Result<Format> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => Ok(Format::Json),
        Some("csv") => Ok(Format::Csv),
        _ => Err(DashboardError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub fn load_records(path: impl AsRef<Path>) -> Result<(Vec<RawRecord>, LoadReport)> {
    let path = path.as_ref();
    let records = match detect_format(path)? {
        Format::Json => {
            let text = std::fs::read_to_string(path).map_err(|e| DashboardError::io(path, e))?;
            parse_json(path, &text)?
        }
        Format::Csv => read_csv(path)?,
    };

    let mut report = LoadReport::default();
    for r in &records {
        report.record(r);
    }
    if report.invalid_numbers > 0 {
        warn!(
            path = %path.display(),
            invalid = report.invalid_numbers,
            "non-numeric values counted as zero"
        );
    }
    info!(path = %path.display(), records = report.total_records, "loaded records");
    Ok((records, report))
}

/// Expects a top-level array of objects.
pub fn parse_json(path: &Path, text: &str) -> Result<Vec<RawRecord>> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|source| DashboardError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let serde_json::Value::Array(items) = value else {
        return Err(DashboardError::malformed(path, "expected a JSON array of records"));
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(DashboardError::malformed(
                path,
                format!("record {} is not an object", idx + 1),
            ));
        }
        let row: JsonRow = serde_json::from_value(item).map_err(|source| DashboardError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(RawRecord::from(row));
    }
    debug!(path = %path.display(), count = records.len(), "parsed JSON records");
    Ok(records)
}

fn read_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let csv_err = |source: csv::Error| DashboardError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;

    let mut records = Vec::new();
    for result in rdr.deserialize::<CsvRow>() {
        let row = result.map_err(csv_err)?;
        records.push(RawRecord::from(row));
    }
    debug!(path = %path.display(), count = records.len(), "parsed CSV records");
    Ok(records)
}

/// Read the prior file, then the current file. Nothing is returned unless
/// both are read successfully.
pub fn load_pair(prior: Option<&Path>, current: Option<&Path>) -> Result<LoadedPair> {
    let (Some(prior_path), Some(current_path)) = (prior, current) else {
        return Err(DashboardError::MissingInput(
            "please select both the prior-year and current-year files".to_string(),
        ));
    };
    let (prior, prior_report) = load_records(prior_path)?;
    let (current, current_report) = load_records(current_path)?;
    Ok(LoadedPair {
        prior,
        prior_report,
        current,
        current_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawNumber;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_json_array() {
        let f = temp_file(
            ".json",
            r#"[
                {"VENDEDOR": "1001 - Jane Doe", "GRUPO GERENCIAL": "Tintas", "FAT": 100.5, "QTDE": 3, "META": 4, "EXTRA": true},
                {"VENDEDOR": 2002, "FAT": "12", "QTDE": null, "META": "n/a"}
            ]"#,
        );
        let (records, report) = load_records(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].revenue, RawNumber::Number(100.5));
        assert_eq!(records[1].salesperson.as_deref(), Some("2002"));
        assert!(records[1].quantity.is_missing());
        assert_eq!(
            report,
            LoadReport {
                total_records: 2,
                missing_salesperson: 0,
                missing_group: 1,
                invalid_numbers: 1,
            }
        );
    }

    #[test]
    fn loads_csv_with_missing_columns() {
        let f = temp_file(".csv", "VENDEDOR,FAT,QTDE\n10 - Ana,50,2\n,7.5,\n");
        let (records, report) = load_records(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].revenue.value_or_zero(), 50.0);
        assert_eq!(records[1].salesperson, None);
        assert!(records[1].target.is_missing());
        assert_eq!(report.missing_salesperson, 1);
        assert_eq!(report.missing_group, 2);
        assert_eq!(report.invalid_numbers, 0);
    }

    #[test]
    fn rejects_non_array_json() {
        let f = temp_file(".json", r#"{"VENDEDOR": "Ana"}"#);
        let err = load_records(f.path()).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput { .. }));

        let f = temp_file(".json", "[1, 2]");
        assert!(matches!(
            load_records(f.path()).unwrap_err(),
            DashboardError::MalformedInput { .. }
        ));
    }

    #[test]
    fn rejects_invalid_json_and_unknown_extension() {
        let f = temp_file(".json", "[{");
        assert!(matches!(load_records(f.path()).unwrap_err(), DashboardError::Json { .. }));

        let f = temp_file(".txt", "[]");
        assert!(matches!(
            load_records(f.path()).unwrap_err(),
            DashboardError::UnsupportedFormat { .. }
        ));
    }

    #[test]
    fn pair_requires_both_files() {
        let f = temp_file(".json", "[]");
        let err = load_pair(Some(f.path()), None).unwrap_err();
        assert!(matches!(err, DashboardError::MissingInput(_)));

        let pair = load_pair(Some(f.path()), Some(f.path())).unwrap();
        assert!(pair.prior.is_empty() && pair.current.is_empty());
    }

    #[test]
    fn pair_fails_when_current_is_unreadable() {
        let prior = temp_file(".json", "[]");
        let missing = prior.path().with_file_name("does-not-exist.json");
        let err = load_pair(Some(prior.path()), Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }
}
