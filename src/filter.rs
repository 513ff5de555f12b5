//! Salesperson/group narrowing applied identically to both periods.

use crate::types::NormalizedRecord;
use std::fmt;

/// Sentinel accepted from users and configuration to mean "no narrowing".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `"all"` (case-sensitive) selects everything; any other string is an
    /// exact match against a normalized key.
    pub fn parse(s: &str) -> Self {
        if s == ALL {
            Selection::All
        } else {
            Selection::Only(s.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub salesperson: Selection,
    pub group: Selection,
}

impl FilterSelection {
    pub fn new(salesperson: Selection, group: Selection) -> Self {
        FilterSelection { salesperson, group }
    }

    pub fn is_all(&self) -> bool {
        self.salesperson == Selection::All && self.group == Selection::All
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.salesperson.matches(&record.salesperson_name) && self.group.matches(&record.group)
    }

    pub fn apply(&self, records: &[NormalizedRecord]) -> Vec<NormalizedRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
