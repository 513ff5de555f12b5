//! Year-over-year sales dashboard.
//!
//! Two snapshots of sale lines (prior year and current year) are normalized,
//! narrowed by salesperson and product group, and aggregated into headline
//! metrics plus per-salesperson and per-group breakdowns.

pub mod aggregate;
pub mod config;
pub mod delta;
pub mod error;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod reports;
pub mod session;
pub mod types;
pub mod util;

pub use aggregate::aggregate;
pub use error::{DashboardError, Result};
pub use filter::{FilterSelection, Selection};
pub use session::Session;
