//! Command-line arguments and the resolved run configuration.

use crate::filter::{FilterSelection, Selection, ALL};
use clap::Parser;
use std::path::PathBuf;

pub const VENDOR_CSV: &str = "vendor_summary.csv";
pub const GROUP_CSV: &str = "group_summary.csv";
pub const SUMMARY_JSON: &str = "dashboard_summary.json";

/// Year-over-year sales dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "sales_dashboard")]
#[command(about = "Compare prior-year and current-year sales by salesperson and product group")]
#[command(version)]
pub struct Args {
    /// Prior-year records (.json or .csv)
    #[arg(long, env = "DASHBOARD_PRIOR")]
    pub prior: Option<PathBuf>,

    /// Current-year records (.json or .csv)
    #[arg(long, env = "DASHBOARD_CURRENT")]
    pub current: Option<PathBuf>,

    /// Initial salesperson filter ("all" for every salesperson)
    #[arg(long, default_value = ALL, env = "DASHBOARD_SALESPERSON")]
    pub salesperson: String,

    /// Initial product group filter ("all" for every group)
    #[arg(long, default_value = ALL, env = "DASHBOARD_GROUP")]
    pub group: String,

    /// Directory for CSV and JSON exports
    #[arg(long, default_value = ".", env = "DASHBOARD_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Rows shown per console table
    #[arg(long, default_value_t = 10, env = "DASHBOARD_PREVIEW_ROWS")]
    pub preview_rows: usize,

    /// Load, render once, export and exit instead of showing the menu
    #[arg(long)]
    pub batch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub prior: Option<PathBuf>,
    pub current: Option<PathBuf>,
    pub initial_filter: FilterSelection,
    pub output_dir: PathBuf,
    pub preview_rows: usize,
    pub batch: bool,
}

impl DashboardConfig {
    pub fn vendor_csv(&self) -> PathBuf {
        self.output_dir.join(VENDOR_CSV)
    }

    pub fn group_csv(&self) -> PathBuf {
        self.output_dir.join(GROUP_CSV)
    }

    pub fn summary_json(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_JSON)
    }
}

impl From<Args> for DashboardConfig {
    fn from(args: Args) -> Self {
        DashboardConfig {
            prior: args.prior,
            current: args.current,
            initial_filter: FilterSelection::new(
                Selection::parse(&args.salesperson),
                Selection::parse(&args.group),
            ),
            output_dir: args.output_dir,
            preview_rows: args.preview_rows,
            batch: args.batch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_everything() {
        let args = Args::try_parse_from(["sales_dashboard", "--prior", "a.json", "--current", "b.json"]).unwrap();
        let config = DashboardConfig::from(args);
        assert!(config.initial_filter.is_all());
        assert_eq!(config.preview_rows, 10);
        assert!(!config.batch);
        assert_eq!(config.vendor_csv(), PathBuf::from(".").join(VENDOR_CSV));
    }

    #[test]
    fn filters_and_output_dir_from_flags() {
        let args = Args::try_parse_from([
            "sales_dashboard",
            "--salesperson",
            "Jane Doe",
            "--group",
            "Tintas",
            "--output-dir",
            "out",
            "--batch",
        ])
        .unwrap();
        let config = DashboardConfig::from(args);
        assert_eq!(config.initial_filter.salesperson, Selection::Only("Jane Doe".into()));
        assert_eq!(config.initial_filter.group, Selection::Only("Tintas".into()));
        assert_eq!(config.summary_json(), PathBuf::from("out").join(SUMMARY_JSON));
        assert!(config.batch);
    }
}
