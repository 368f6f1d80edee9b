//! Scoping and platform filters (stages 1 and 2 of a rendering pass).
//!
//! Each stage borrows the previous stage's output and returns a new subset;
//! the loaded dataset is never touched.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use trendboard_core::{Choice, FilterSelection, Record, WindowAnchor};

/// Inclusive date range used when no year is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecencyWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RecencyWindow {
    /// The window of `days` days back from `end`; the lower bound is
    /// `end - days` and is itself included.
    #[must_use]
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Output of stage 1: records matching location, category and year (or the
/// recency window), plus the window when one was applied.
#[derive(Debug, Clone)]
pub struct Scoped<'a> {
    pub records: Vec<&'a Record>,
    pub window: Option<RecencyWindow>,
}

/// Stage 1. Location, then category, then year by equality; with no year
/// selected, the recency window ending at the anchor date instead.
#[must_use]
pub fn scope<'a>(
    records: &'a [Record],
    selection: &FilterSelection,
    window_days: u32,
    anchor: WindowAnchor,
) -> Scoped<'a> {
    let located: Vec<&'a Record> = records
        .iter()
        .filter(|r| selection.location.admits(r.location.as_deref()))
        .filter(|r| selection.category.admits(r.category.as_deref()))
        .collect();

    match &selection.year {
        Choice::Only(year) => {
            let scoped: Vec<&'a Record> = located
                .into_iter()
                .filter(|r| r.year() == *year)
                .collect();
            tracing::debug!(kept = scoped.len(), year, "applied year filter");
            Scoped {
                records: scoped,
                window: None,
            }
        }
        Choice::All => {
            let anchor_date = match anchor {
                WindowAnchor::Filtered => located.iter().map(|r| r.launch_date).max(),
                WindowAnchor::Global => records.iter().map(|r| r.launch_date).max(),
            };
            let Some(end) = anchor_date else {
                tracing::debug!("no launch dates in scope; recency window is empty");
                return Scoped {
                    records: Vec::new(),
                    window: None,
                };
            };
            let window = RecencyWindow::ending_at(end, window_days);
            let scoped: Vec<&'a Record> = located
                .into_iter()
                .filter(|r| window.contains(r.launch_date))
                .collect();
            tracing::debug!(
                kept = scoped.len(),
                start = %window.start,
                end = %window.end,
                %anchor,
                "applied recency window"
            );
            Scoped {
                records: scoped,
                window: Some(window),
            }
        }
    }
}

/// Distinct platforms among `records`, in first-appearance order.
#[must_use]
pub fn available_platforms(records: &[&Record]) -> Vec<String> {
    distinct_in_order(records.iter().filter_map(|r| r.platform.as_deref()))
}

/// Stage 2: exact platform match unless `All`.
#[must_use]
pub fn by_platform<'a>(records: &[&'a Record], platform: &Choice<String>) -> Vec<&'a Record> {
    records
        .iter()
        .copied()
        .filter(|r| platform.admits(r.platform.as_deref()))
        .collect()
}

pub(crate) fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
