//! CSV dataset loader.
//!
//! Parses the fashion-trend CSV into immutable [`Record`]s. Only
//! `Launch_Date` is required; every other column may be absent or empty and
//! is then carried as `None`. Hashtag cells are normalized here, once, into
//! their canonical text form.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use trendboard_core::{Hashtags, Record};

use crate::error::LoadError;

const DATE_COLUMN: &str = "Launch_Date";

/// One CSV row exactly as it appears in the file, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Product_Name")]
    product_name: Option<String>,
    #[serde(rename = "Brand")]
    brand: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Launch_Date")]
    launch_date: Option<String>,
    #[serde(rename = "Location")]
    location: Option<String>,
    #[serde(rename = "Platform")]
    platform: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Age_Group")]
    age_group: Option<String>,
    #[serde(rename = "Material")]
    material: Option<String>,
    #[serde(rename = "Trend_Score")]
    trend_score: Option<f64>,
    #[serde(rename = "Overall_Trend_Score")]
    overall_trend_score: Option<f64>,
    #[serde(rename = "Engagement_Count")]
    engagement_count: Option<f64>,
    #[serde(rename = "Purchase_Frequency")]
    purchase_frequency: Option<f64>,
    #[serde(rename = "Sustainability_Score")]
    sustainability_score: Option<f64>,
    #[serde(rename = "Trend_Longevity")]
    trend_longevity: Option<f64>,
    #[serde(rename = "Influencer_Score")]
    influencer_score: Option<f64>,
    #[serde(rename = "Emerging_Trend_Flag")]
    emerging_trend_flag: Option<String>,
    #[serde(rename = "Influencer_ID")]
    influencer_id: Option<String>,
    #[serde(rename = "Hashtags")]
    hashtags: Option<String>,
}

impl RawRecord {
    fn into_record(self, line: u64) -> Result<Record, LoadError> {
        let raw_date = non_empty(self.launch_date).ok_or(LoadError::MissingDate { line })?;
        let launch_date =
            parse_launch_date(&raw_date).ok_or(LoadError::InvalidDate {
                line,
                value: raw_date.clone(),
            })?;

        let emerging_trend_flag = match non_empty(self.emerging_trend_flag) {
            None => None,
            Some(raw) => Some(
                parse_flag(&raw).ok_or(LoadError::InvalidFlag { line, value: raw.clone() })?,
            ),
        };

        let hashtags = non_empty(self.hashtags)
            .map(|raw| Hashtags::parse(&raw).into_text())
            .unwrap_or_default();

        Ok(Record {
            product_name: non_empty(self.product_name),
            brand: non_empty(self.brand),
            category: non_empty(self.category),
            launch_date,
            location: non_empty(self.location),
            platform: non_empty(self.platform),
            gender: non_empty(self.gender),
            age_group: non_empty(self.age_group),
            material: non_empty(self.material),
            trend_score: finite(self.trend_score),
            overall_trend_score: finite(self.overall_trend_score),
            engagement_count: finite(self.engagement_count),
            purchase_frequency: finite(self.purchase_frequency),
            sustainability_score: finite(self.sustainability_score),
            trend_longevity: finite(self.trend_longevity),
            influencer_score: finite(self.influencer_score),
            emerging_trend_flag,
            influencer_id: non_empty(self.influencer_id),
            hashtags,
        })
    }
}

/// Load records from a CSV reader with a header row.
///
/// # Errors
///
/// Returns `LoadError` if the header has no `Launch_Date` column, a row
/// cannot be parsed, or a row has a missing or invalid launch date or
/// emerging-trend flag.
pub fn load_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Record>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| LoadError::Csv { line: 1, source })?
        .clone();
    if !headers.iter().any(|h| h == DATE_COLUMN) {
        return Err(LoadError::MissingColumn(DATE_COLUMN));
    }

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    // Quoted cells may span lines, so report the line each record starts on.
    while csv_reader
        .read_record(&mut row)
        .map_err(|source| LoadError::Csv {
            line: csv_reader.position().line(),
            source,
        })?
    {
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawRecord = row
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Csv { line, source })?;
        records.push(raw.into_record(line)?);
    }

    tracing::debug!(rows = records.len(), "parsed dataset rows");
    Ok(records)
}

/// Load records from a CSV file path.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be opened, otherwise the same
/// errors as [`load_records`].
pub fn load_records_file(path: &Path, delimiter: u8) -> Result<Vec<Record>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records = load_records(file, delimiter)?;
    tracing::info!(path = %path.display(), rows = records.len(), "loaded dataset");
    Ok(records)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `NaN` and infinities count as missing values.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Accepts ISO dates, ISO date-times and US-style `MM/DD/YYYY`.
fn parse_launch_date(raw: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
