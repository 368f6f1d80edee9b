//! Output of a rendering pass: the scalars and tables a dashboard charts.
//!
//! Field order is the serialization order, so renderers can rely on it.

use serde::Serialize;
use trendboard_core::{FilterSelection, Record};

use crate::filter::RecencyWindow;

/// Result of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    pub selection: FilterSelection,
    /// Platforms offered by the platform filter: those present after the
    /// location/category/year scoping, before the platform filter itself.
    pub platform_options: Vec<String>,
    pub window: Option<RecencyWindow>,
    /// Size of the fully filtered record set.
    pub record_count: usize,
    pub outcome: Outcome,
}

impl Computation {
    /// The derived tables, or `None` for an empty result.
    #[must_use]
    pub fn tables(&self) -> Option<&DerivedTables> {
        match &self.outcome {
            Outcome::EmptyResult => None,
            Outcome::Tables(tables) => Some(tables),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.outcome, Outcome::EmptyResult)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "tables", rename_all = "snake_case")]
pub enum Outcome {
    /// No record matched the filter combination. Nothing was derived.
    EmptyResult,
    Tables(Box<DerivedTables>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTables {
    pub top_product: Option<TopProduct>,
    pub top_brand: Option<String>,
    pub top_platform: Option<TopPlatform>,
    pub trend_series: TrendSeries,
    pub gender_distribution: Vec<GroupCount>,
    pub age_group_distribution: Vec<GroupCount>,
    pub brand_top5: Vec<BrandSummary>,
    /// Best sellers by purchase frequency, one row per distinct frequency.
    pub top_sales: Vec<Record>,
    pub material_sustainability: Vec<MaterialScore>,
    pub top_influencers_by_volume: Vec<GroupCount>,
    /// Every record posted by one of `top_influencers_by_volume`.
    pub influencer_purchase_frequencies: Vec<Record>,
    pub top_influencers_by_engagement: Vec<InfluencerSummary>,
    pub top_engagement_products: Vec<Record>,
    pub ranked_product_details: Vec<ProductDetail>,
    /// Lowest overall trend scores, for the longevity scatter.
    pub longevity_sample: Vec<Record>,
    pub hashtag_text: String,
    pub top_hashtags: Vec<HashtagCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub overall_trend_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPlatform {
    pub platform: String,
    pub mean_engagement: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendGranularity {
    /// One point per launch day inside the recency window.
    Daily,
    /// One point per `YYYY-MM` month.
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub granularity: TrendGranularity,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub mean_trend_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSummary {
    pub brand: String,
    pub mean_overall_trend_score: Option<f64>,
    pub emerging_trend_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialScore {
    pub material: String,
    pub mean_sustainability_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluencerSummary {
    pub influencer_id: String,
    pub mean_influencer_score: Option<f64>,
    pub mean_engagement_count: Option<f64>,
}

/// Row of the product detail table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub trend_longevity: Option<f64>,
    pub overall_trend_score: Option<f64>,
}

impl From<&Record> for ProductDetail {
    fn from(record: &Record) -> Self {
        Self {
            product_name: record.product_name.clone(),
            category: record.category.clone(),
            brand: record.brand.clone(),
            material: record.material.clone(),
            trend_longevity: record.trend_longevity,
            overall_trend_score: record.overall_trend_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashtagCount {
    pub hashtag: String,
    pub count: usize,
}
