//! Session state: the normalized master lists for both periods, the distinct
//! filter choices, and the active filter selection.
//!
//! A load replaces everything wholesale. Every dashboard request re-filters the
//! master lists and aggregates from scratch, so the same lists and selection
//! always yield the same result.

use crate::aggregate::aggregate;
use crate::error::{DashboardError, Result};
use crate::filter::{FilterSelection, Selection};
use crate::loader::LoadedPair;
use crate::normalize::{normalize_all, DistinctValues};
use crate::types::{Aggregate, NormalizedRecord, RawRecord};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
struct MasterLists {
    prior: Vec<NormalizedRecord>,
    current: Vec<NormalizedRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    data: Option<MasterLists>,
    distinct: DistinctValues,
    filter: FilterSelection,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize both periods and make them the master lists. Filter choices
    /// are rebuilt over the full data and the selection is reset.
    pub fn load(&mut self, prior: &[RawRecord], current: &[RawRecord]) {
        self.distinct.clear();
        let prior = normalize_all(prior, &mut self.distinct);
        let current = normalize_all(current, &mut self.distinct);
        info!(
            prior = prior.len(),
            current = current.len(),
            salespeople = self.distinct.salespeople().len(),
            groups = self.distinct.groups().len(),
            "session loaded"
        );
        self.data = Some(MasterLists { prior, current });
        self.filter = FilterSelection::default();
    }

    pub fn load_pair(&mut self, pair: &LoadedPair) {
        self.load(&pair.prior, &pair.current);
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSelection) {
        debug!(salesperson = %filter.salesperson, group = %filter.group, "filter changed");
        self.filter = filter;
    }

    pub fn set_salesperson(&mut self, selection: Selection) {
        let group = self.filter.group.clone();
        self.set_filter(FilterSelection::new(selection, group));
    }

    pub fn set_group(&mut self, selection: Selection) {
        let salesperson = self.filter.salesperson.clone();
        self.set_filter(FilterSelection::new(salesperson, selection));
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterSelection::default());
    }

    pub fn salesperson_options(&self) -> Vec<String> {
        self.distinct.salespeople()
    }

    pub fn group_options(&self) -> Vec<String> {
        self.distinct.groups()
    }

    /// Filter both periods with the active selection and aggregate.
    pub fn dashboard(&self) -> Result<Aggregate> {
        let data = self.data.as_ref().ok_or(DashboardError::NoData)?;
        let prior = self.filter.apply(&data.prior);
        let current = self.filter.apply(&data.current);
        debug!(prior = prior.len(), current = current.len(), "records after filter");
        Ok(aggregate(&prior, &current))
    }
}
