use serde::Serialize;
use trendboard_core::Record;

use crate::filter::distinct_in_order;

/// Values offered by the location, category and year filters. These always
/// come from the full dataset; platform options depend on the other filters
/// and come from [`crate::Pipeline::platform_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// First-appearance order.
    pub locations: Vec<String>,
    /// First-appearance order.
    pub categories: Vec<String>,
    /// Newest first.
    pub years: Vec<i32>,
}

#[must_use]
pub fn filter_options(records: &[Record]) -> FilterOptions {
    let locations = distinct_in_order(records.iter().filter_map(|r| r.location.as_deref()));
    let categories = distinct_in_order(records.iter().filter_map(|r| r.category.as_deref()));

    let mut years: Vec<i32> = records.iter().map(Record::year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();

    FilterOptions {
        locations,
        categories,
        years,
    }
}
