//! The filter-cascade-and-aggregation pass.
//!
//! `compute` is a pure function of the record set and the selection: scope,
//! filter by platform, stop on an empty set, then derive every table from the
//! remaining records. Nothing is retained between passes.

use trendboard_core::{AppConfig, FilterSelection, Record, WindowAnchor};

use crate::derive::derive_tables;
use crate::filter::{available_platforms, by_platform, scope};
use crate::tables::{Computation, Outcome};

const DEFAULT_RECENT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Length of the default window used when no year is selected.
    pub recent_window_days: u32,
    pub window_anchor: WindowAnchor,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            window_anchor: WindowAnchor::Filtered,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            recent_window_days: config.recent_window_days,
            window_anchor: config.window_anchor,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Run one full pass over `records` for `selection`.
    #[must_use]
    pub fn compute(&self, records: &[Record], selection: &FilterSelection) -> Computation {
        let scoped = scope(
            records,
            selection,
            self.config.recent_window_days,
            self.config.window_anchor,
        );
        let platform_options = available_platforms(&scoped.records);
        let filtered = by_platform(&scoped.records, &selection.platform);

        if filtered.is_empty() {
            tracing::info!(%selection, "no records match filter combination");
            return Computation {
                selection: selection.clone(),
                platform_options,
                window: scoped.window,
                record_count: 0,
                outcome: Outcome::EmptyResult,
            };
        }

        let tables = derive_tables(&filtered, selection, scoped.window);
        tracing::debug!(%selection, records = filtered.len(), "derived dashboard tables");

        Computation {
            selection: selection.clone(),
            platform_options,
            window: scoped.window,
            record_count: filtered.len(),
            outcome: Outcome::Tables(Box::new(tables)),
        }
    }

    /// Records left after every filter, in load order.
    #[must_use]
    pub fn filtered<'a>(&self, records: &'a [Record], selection: &FilterSelection) -> Vec<&'a Record> {
        let scoped = scope(
            records,
            selection,
            self.config.recent_window_days,
            self.config.window_anchor,
        );
        by_platform(&scoped.records, &selection.platform)
    }

    /// Platforms selectable once location, category and year are applied.
    /// The selection's own platform choice is ignored.
    #[must_use]
    pub fn platform_options(&self, records: &[Record], selection: &FilterSelection) -> Vec<String> {
        let scoped = scope(
            records,
            selection,
            self.config.recent_window_days,
            self.config.window_anchor,
        );
        available_platforms(&scoped.records)
    }
}

/// [`Pipeline::compute`] with the default configuration.
#[must_use]
pub fn compute(records: &[Record], selection: &FilterSelection) -> Computation {
    Pipeline::default().compute(records, selection)
}
