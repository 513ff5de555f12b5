use crate::util::parse_f64_safe;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One sale line as it appears in a JSON export. String fields are taken as
/// `Value` because some exports write numeric salesperson codes.
#[derive(Debug, Deserialize)]
pub struct JsonRow {
    #[serde(rename = "VENDEDOR")]
    pub vendedor: Option<serde_json::Value>,
    #[serde(rename = "GRUPO GERENCIAL")]
    pub grupo_gerencial: Option<serde_json::Value>,
    #[serde(rename = "FAT")]
    pub fat: Option<serde_json::Value>,
    #[serde(rename = "QTDE")]
    pub qtde: Option<serde_json::Value>,
    #[serde(rename = "META")]
    pub meta: Option<serde_json::Value>,
}

/// One sale line as it appears in a CSV export.
#[derive(Debug, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "VENDEDOR")]
    pub vendedor: Option<String>,
    #[serde(rename = "GRUPO GERENCIAL")]
    pub grupo_gerencial: Option<String>,
    #[serde(rename = "FAT")]
    pub fat: Option<String>,
    #[serde(rename = "QTDE")]
    pub qtde: Option<String>,
    #[serde(rename = "META")]
    pub meta: Option<String>,
}

/// A numeric field before it has been resolved to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNumber {
    Missing,
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects
    Unsupported,
}

impl RawNumber {
    /// Resolve to a finite value. Missing fields count as zero; `None` means
    /// the field was present but not a usable number.
    pub fn resolve(&self) -> Option<f64> {
        match self {
            RawNumber::Missing => Some(0.0),
            RawNumber::Number(n) if n.is_finite() => Some(*n),
            RawNumber::Number(_) => None,
            RawNumber::Text(s) if s.trim().is_empty() => Some(0.0),
            RawNumber::Text(s) => parse_f64_safe(Some(s)).filter(|n| n.is_finite()),
            RawNumber::Unsupported => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawNumber::Missing)
    }

    /// Resolve with the zero-coercion policy applied to invalid values.
    pub fn value_or_zero(&self) -> f64 {
        self.resolve().unwrap_or(0.0)
    }
}

impl From<Option<serde_json::Value>> for RawNumber {
    fn from(v: Option<serde_json::Value>) -> Self {
        match v {
            None | Some(serde_json::Value::Null) => RawNumber::Missing,
            Some(serde_json::Value::Number(n)) => n.as_f64().map_or(RawNumber::Unsupported, RawNumber::Number),
            Some(serde_json::Value::String(s)) => RawNumber::Text(s),
            Some(_) => RawNumber::Unsupported,
        }
    }
}

impl From<Option<String>> for RawNumber {
    fn from(v: Option<String>) -> Self {
        match v {
            None => RawNumber::Missing,
            Some(s) => RawNumber::Text(s),
        }
    }
}

/// Format-independent sale line handed to the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub salesperson: Option<String>,
    pub group: Option<String>,
    pub revenue: RawNumber,
    pub quantity: RawNumber,
    pub target: RawNumber,
}

impl RawRecord {
    pub fn numbers(&self) -> [&RawNumber; 3] {
        [&self.revenue, &self.quantity, &self.target]
    }
}

fn json_text(v: Option<serde_json::Value>) -> Option<String> {
    match v? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl From<JsonRow> for RawRecord {
    fn from(row: JsonRow) -> Self {
        RawRecord {
            salesperson: json_text(row.vendedor),
            group: json_text(row.grupo_gerencial),
            revenue: row.fat.into(),
            quantity: row.qtde.into(),
            target: row.meta.into(),
        }
    }
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        RawRecord {
            salesperson: row.vendedor,
            group: row.grupo_gerencial,
            revenue: row.fat.into(),
            quantity: row.qtde.into(),
            target: row.meta.into(),
        }
    }
}

/// A sale line with its grouping keys derived and its numbers resolved.
///
/// `salesperson_name` and `group` are never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub salesperson_id: Option<String>,
    pub salesperson_name: String,
    pub group: String,
    pub revenue: f64,
    pub quantity: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Prior,
    Current,
}

/// Running totals for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodMetrics {
    pub total_revenue: f64,
    pub total_quantity: f64,
    pub total_target: f64,
    /// `total_quantity / total_target * 100`, or 0 without a positive target
    pub attainment_pct: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub prior: PeriodMetrics,
    pub current: PeriodMetrics,
}

impl HeadlineMetrics {
    pub fn period_mut(&mut self, period: Period) -> &mut PeriodMetrics {
        match period {
            Period::Prior => &mut self.prior,
            Period::Current => &mut self.current,
        }
    }
}

/// One line of a breakdown table, keyed by salesperson name or group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: String,
    pub prior_revenue: f64,
    pub current_revenue: f64,
    pub prior_quantity: f64,
    pub current_quantity: f64,
}

impl SummaryRow {
    pub fn new(key: impl Into<String>) -> Self {
        SummaryRow {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn add(&mut self, period: Period, revenue: f64, quantity: f64) {
        match period {
            Period::Prior => {
                self.prior_revenue += revenue;
                self.prior_quantity += quantity;
            }
            Period::Current => {
                self.current_revenue += revenue;
                self.current_quantity += quantity;
            }
        }
    }
}

/// Everything one render needs. Rows are in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub metrics: HeadlineMetrics,
    pub vendor_rows: Vec<SummaryRow>,
    pub group_rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaSign {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub text: String,
    pub sign: DeltaSign,
}

impl Delta {
    pub fn new(text: impl Into<String>, sign: DeltaSign) -> Self {
        Delta {
            text: text.into(),
            sign,
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct KpiCard {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub label: String,
    #[serde(rename = "Current")]
    #[tabled(rename = "Current")]
    pub current: String,
    #[serde(rename = "Previous")]
    #[tabled(rename = "Previous")]
    pub previous: String,
    #[serde(rename = "Change")]
    #[tabled(rename = "Change")]
    pub change: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct BreakdownTableRow {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "QtyPrevious")]
    #[tabled(rename = "Qty Prev")]
    pub quantity_prior: String,
    #[serde(rename = "QtyCurrent")]
    #[tabled(rename = "Qty Curr")]
    pub quantity_current: String,
    #[serde(rename = "QtyChange")]
    #[tabled(rename = "Qty % Var")]
    pub quantity_change: String,
    #[serde(rename = "RevenuePrevious")]
    #[tabled(rename = "Revenue Prev")]
    pub revenue_prior: String,
    #[serde(rename = "RevenueCurrent")]
    #[tabled(rename = "Revenue Curr")]
    pub revenue_current: String,
    #[serde(rename = "RevenueChange")]
    #[tabled(rename = "Revenue % Var")]
    pub revenue_change: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub generated_at: chrono::DateTime<chrono::Local>,
    pub salesperson_filter: String,
    pub group_filter: String,
    pub metrics: HeadlineMetrics,
    pub vendor_rows: Vec<SummaryRow>,
    pub group_rows: Vec<SummaryRow>,
}
