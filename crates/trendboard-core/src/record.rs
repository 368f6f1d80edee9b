use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of the fashion-trend dataset: a product or post observation with
/// its trend metrics.
///
/// Every column except the launch date may be missing in the source file, so
/// the remaining fields are optional. `year` and `month` are derived from
/// `launch_date` on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub launch_date: NaiveDate,
    pub location: Option<String>,
    /// Social platform the post appeared on, e.g. `"TikTok"`.
    pub platform: Option<String>,
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub material: Option<String>,
    pub trend_score: Option<f64>,
    pub overall_trend_score: Option<f64>,
    pub engagement_count: Option<f64>,
    /// Used as the sales proxy throughout the dashboard.
    pub purchase_frequency: Option<f64>,
    pub sustainability_score: Option<f64>,
    /// Days the trend stayed active.
    pub trend_longevity: Option<f64>,
    pub influencer_score: Option<f64>,
    pub emerging_trend_flag: Option<bool>,
    pub influencer_id: Option<String>,
    /// Canonical whitespace-joined hashtag text; empty when the row had none.
    pub hashtags: String,
}

impl Record {
    /// Calendar year of the launch date.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.launch_date.year()
    }

    /// Year-month key of the launch date, e.g. `"2024-03"`.
    #[must_use]
    pub fn month(&self) -> String {
        self.launch_date.format("%Y-%m").to_string()
    }

    /// `1` when the record is flagged as an emerging trend, `0` otherwise.
    #[must_use]
    pub fn emerging_trend_count(&self) -> u32 {
        u32::from(self.emerging_trend_flag.unwrap_or(false))
    }
}

/// Raw hashtag cell as it appears in the source file: either free text
/// (`"#a #b"`) or a serialized list (`["#a", "#b"]` or `['#a', '#b']`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hashtags {
    Text(String),
    List(Vec<String>),
}

impl Hashtags {
    /// Classify a raw cell. Bracketed cells are read as lists; anything else
    /// is plain text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
            return Hashtags::Text(trimmed.to_string());
        }

        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return Hashtags::List(items);
        }

        // List literal with single quotes, e.g. ['#ootd', '#streetwear']
        let inner = &trimmed[1..trimmed.len() - 1];
        let items = inner
            .split(',')
            .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        Hashtags::List(items)
    }

    /// Canonical text form: tokens joined by single spaces.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Hashtags::Text(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
            Hashtags::List(items) => items
                .iter()
                .flat_map(|item| item.split_whitespace())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
