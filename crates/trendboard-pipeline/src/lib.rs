//! Filter and aggregation pipeline for the trendboard dashboard.
//!
//! Loads the fashion-trend CSV once per path, then turns a
//! [`trendboard_core::FilterSelection`] into the scalars and tables the
//! dashboard renders. A filter combination that matches nothing yields
//! [`Outcome::EmptyResult`] instead of tables.

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod options;
pub mod pipeline;
pub mod tables;

mod aggregate;
mod derive;

pub use cache::DatasetCache;
pub use error::LoadError;
pub use filter::RecencyWindow;
pub use loader::{load_records, load_records_file};
pub use options::{filter_options, FilterOptions};
pub use pipeline::{compute, Pipeline, PipelineConfig};
pub use tables::{
    BrandSummary, Computation, DerivedTables, GroupCount, HashtagCount, InfluencerSummary,
    MaterialScore, Outcome, ProductDetail, TopPlatform, TopProduct, TrendGranularity, TrendPoint,
    TrendSeries,
};
