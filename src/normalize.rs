//! Record normalization: derive the salesperson and group keys used for
//! grouping and filtering, and resolve numeric fields.

use crate::types::{NormalizedRecord, RawRecord};
use std::collections::BTreeSet;

/// Placeholder for absent or blank grouping keys.
pub const NOT_AVAILABLE: &str = "N/A";

const CODE_SEPARATOR: &str = " - ";

/// Salesperson identifiers usually look like `"1001 - Jane Doe"`; keep the
/// name part. Identifiers without a code are kept whole.
pub fn clean_salesperson_name(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    let name = match raw.split(CODE_SEPARATOR).nth(1) {
        Some(name) => name.trim(),
        None => raw.trim(),
    };
    non_empty(name)
}

pub fn clean_group(raw: Option<&str>) -> String {
    non_empty(raw.unwrap_or("").trim())
}

fn non_empty(s: &str) -> String {
    if s.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        s.to_string()
    }
}

/// Total, deterministic transform. Invalid numbers become zero; the loader
/// counts them separately.
pub fn normalize(raw: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        salesperson_id: raw.salesperson.clone(),
        salesperson_name: clean_salesperson_name(raw.salesperson.as_deref()),
        group: clean_group(raw.group.as_deref()),
        revenue: raw.revenue.value_or_zero(),
        quantity: raw.quantity.value_or_zero(),
        target: raw.target.value_or_zero(),
    }
}

/// Distinct salesperson names and groups seen across a whole load, used to
/// offer filter choices. Sorted for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistinctValues {
    salespeople: BTreeSet<String>,
    groups: BTreeSet<String>,
}

impl DistinctValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &NormalizedRecord) {
        if !self.salespeople.contains(&record.salesperson_name) {
            self.salespeople.insert(record.salesperson_name.clone());
        }
        if !self.groups.contains(&record.group) {
            self.groups.insert(record.group.clone());
        }
    }

    pub fn clear(&mut self) {
        self.salespeople.clear();
        self.groups.clear();
    }

    pub fn salespeople(&self) -> Vec<String> {
        self.salespeople.iter().cloned().collect()
    }

    pub fn groups(&self) -> Vec<String> {
        self.groups.iter().cloned().collect()
    }
}

/// Normalize a batch and fold its keys into `distinct`.
pub fn normalize_all(raw: &[RawRecord], distinct: &mut DistinctValues) -> Vec<NormalizedRecord> {
    raw.iter()
        .map(|r| {
            let record = normalize(r);
            distinct.observe(&record);
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawNumber;

    fn raw(salesperson: Option<&str>, group: Option<&str>) -> RawRecord {
        RawRecord {
            salesperson: salesperson.map(str::to_string),
            group: group.map(str::to_string),
            revenue: RawNumber::Number(10.0),
            quantity: RawNumber::Missing,
            target: RawNumber::Text("oops".into()),
        }
    }

    #[test]
    fn splits_code_from_name() {
        assert_eq!(clean_salesperson_name(Some("1001 - Jane Doe")), "Jane Doe");
        assert_eq!(clean_salesperson_name(Some("Jane Doe")), "Jane Doe");
        assert_eq!(clean_salesperson_name(Some("  Jane Doe  ")), "Jane Doe");
        assert_eq!(clean_salesperson_name(None), "N/A");
        assert_eq!(clean_salesperson_name(Some("")), "N/A");
    }

    #[test]
    fn takes_segment_after_first_separator() {
        assert_eq!(clean_salesperson_name(Some("7 - Ana - Filial Sul")), "Ana");
        assert_eq!(clean_salesperson_name(Some("7 -  ")), "N/A");
        assert_eq!(clean_salesperson_name(Some("7-Ana")), "7-Ana");
    }

    #[test]
    fn blank_group_defaults() {
        assert_eq!(clean_group(Some("  Tintas ")), "Tintas");
        assert_eq!(clean_group(Some("   ")), "N/A");
        assert_eq!(clean_group(None), "N/A");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize(&raw(Some(" 1001 - Jane Doe "), Some(" Tintas ")));
        let again = normalize(&raw(Some(&once.salesperson_name), Some(&once.group)));
        assert_eq!(again.salesperson_name, once.salesperson_name);
        assert_eq!(again.group, once.group);
    }

    #[test]
    fn numbers_resolve_with_zero_policy() {
        let n = normalize(&raw(None, None));
        assert_eq!(n.revenue, 10.0);
        assert_eq!(n.quantity, 0.0);
        assert_eq!(n.target, 0.0);
        assert_eq!(n.salesperson_name, "N/A");
        assert_eq!(n.group, "N/A");
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let mut distinct = DistinctValues::new();
        let batch = vec![
            raw(Some("2 - Bruno"), Some("Tintas")),
            raw(Some("1 - Ana"), Some("Cimento")),
            raw(Some("Bruno"), Some("Tintas")),
        ];
        let records = normalize_all(&batch, &mut distinct);
        assert_eq!(records.len(), 3);
        assert_eq!(distinct.salespeople(), vec!["Ana", "Bruno"]);
        assert_eq!(distinct.groups(), vec!["Cimento", "Tintas"]);

        distinct.clear();
        assert!(distinct.salespeople().is_empty());
    }
}
