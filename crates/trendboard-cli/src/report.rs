//! One-shot report: a single pipeline pass printed as text tables or JSON.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use trendboard_core::{FilterSelection, OutputFormat, Record};
use trendboard_pipeline::{Computation, DatasetCache, DerivedTables, GroupCount, Pipeline};

/// Compute the dashboard tables for `selection` and write them to `out`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the output cannot be
/// written. A selection that matches nothing is not an error.
pub(crate) fn run_report<W: Write>(
    cache: &mut DatasetCache,
    pipeline: &Pipeline,
    dataset: &Path,
    selection: &FilterSelection,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let records = cache
        .get_or_load(dataset)
        .with_context(|| format!("failed to load dataset {}", dataset.display()))?;
    let computation = pipeline.compute(&records, selection);

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &computation)?;
            writeln!(out)?;
        }
        OutputFormat::Text => render_text(&computation, out)?,
    }
    Ok(())
}

pub(crate) fn render_text<W: Write>(computation: &Computation, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "# Fashion Intelligence Board")?;
    writeln!(out)?;
    writeln!(out, "**Filter**: {}", computation.selection)?;
    if let Some(window) = computation.window {
        writeln!(out, "**Window**: {} to {}", window.start, window.end)?;
    }
    writeln!(out, "**Platforms**: {}", join_or_dash(&computation.platform_options))?;
    writeln!(out, "**Records**: {}", computation.record_count)?;
    writeln!(out)?;

    let Some(tables) = computation.tables() else {
        writeln!(out, "no data for this combination of filters")?;
        return Ok(());
    };

    render_summary(tables, out)?;
    render_tables(tables, out)
}

/// The four headline scalars.
pub(crate) fn render_summary<W: Write>(tables: &DerivedTables, out: &mut W) -> std::io::Result<()> {
    match &tables.top_product {
        Some(top) => writeln!(
            out,
            "Top product:    {} (brand: {})",
            text(top.product_name.as_deref()),
            text(top.brand.as_deref())
        )?,
        None => writeln!(out, "Top product:    -")?,
    }
    writeln!(out, "Top brand:      {}", text(tables.top_brand.as_deref()))?;
    match &tables.top_platform {
        Some(top) => {
            writeln!(out, "Top platform:   {}", top.platform)?;
            writeln!(out, "Top engagement: {}", number(top.mean_engagement))?;
        }
        None => {
            writeln!(out, "Top platform:   -")?;
            writeln!(out, "Top engagement: -")?;
        }
    }
    Ok(())
}

fn render_tables<W: Write>(tables: &DerivedTables, out: &mut W) -> std::io::Result<()> {
    heading(out, "Sales Trend (purchase frequency)")?;
    products(out, &tables.top_sales, "PURCHASES", |r| r.purchase_frequency)?;

    heading(out, "Trend Score by Period")?;
    writeln!(out, "{:<14}{}", "PERIOD", "MEAN_TREND_SCORE")?;
    for point in &tables.trend_series.points {
        writeln!(out, "{:<14}{}", point.period, number(point.mean_trend_score))?;
    }

    heading(out, "Top Engaged Products")?;
    products(out, &tables.top_engagement_products, "ENGAGEMENT", |r| {
        r.engagement_count
    })?;

    heading(out, "Trend Longevity vs Trend Score")?;
    writeln!(
        out,
        "{:<30}{:<12}{:<12}{}",
        "PRODUCT", "LONGEVITY", "TREND", "ENGAGEMENT"
    )?;
    for r in &tables.longevity_sample {
        writeln!(
            out,
            "{:<30}{:<12}{:<12}{}",
            text(r.product_name.as_deref()),
            number(r.trend_longevity),
            number(r.trend_score),
            number(r.engagement_count)
        )?;
    }

    heading(out, "Age Group Distribution")?;
    counts(out, "AGE_GROUP", &tables.age_group_distribution)?;

    heading(out, "Gender Distribution")?;
    counts(out, "GENDER", &tables.gender_distribution)?;

    heading(out, "Sustainability Score by Material")?;
    writeln!(out, "{:<20}{}", "MATERIAL", "MEAN_SUSTAINABILITY")?;
    for m in &tables.material_sustainability {
        writeln!(out, "{:<20}{}", m.material, number(m.mean_sustainability_score))?;
    }

    heading(out, "Top Influencers by Volume")?;
    counts(out, "INFLUENCER", &tables.top_influencers_by_volume)?;
    writeln!(
        out,
        "({} posts from these influencers)",
        tables.influencer_purchase_frequencies.len()
    )?;

    heading(out, "Top Influencers by Engagement")?;
    writeln!(out, "{:<16}{:<18}{}", "INFLUENCER", "MEAN_SCORE", "MEAN_ENGAGEMENT")?;
    for i in &tables.top_influencers_by_engagement {
        writeln!(
            out,
            "{:<16}{:<18}{}",
            i.influencer_id,
            number(i.mean_influencer_score),
            number(i.mean_engagement_count)
        )?;
    }

    heading(out, "Top 5 Brands by Overall Trend Score")?;
    writeln!(out, "{:<20}{:<16}{}", "BRAND", "MEAN_OVERALL", "EMERGING")?;
    for b in &tables.brand_top5 {
        writeln!(
            out,
            "{:<20}{:<16}{}",
            b.brand,
            number(b.mean_overall_trend_score),
            b.emerging_trend_count
        )?;
    }

    heading(out, "Top Hashtags")?;
    writeln!(out, "{:<24}{}", "HASHTAG", "COUNT")?;
    for h in &tables.top_hashtags {
        writeln!(out, "{:<24}{}", h.hashtag, h.count)?;
    }

    heading(out, "Product Trend Details")?;
    writeln!(out, "| Product | Category | Brand | Material | Longevity | Overall |")?;
    writeln!(out, "|---------|----------|-------|----------|-----------|---------|")?;
    for d in &tables.ranked_product_details {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            text(d.product_name.as_deref()),
            text(d.category.as_deref()),
            text(d.brand.as_deref()),
            text(d.material.as_deref()),
            number(d.trend_longevity),
            number(d.overall_trend_score)
        )?;
    }
    Ok(())
}

fn heading<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "## {title}")?;
    Ok(())
}

fn products<W: Write>(
    out: &mut W,
    rows: &[Record],
    metric: &str,
    value: fn(&Record) -> Option<f64>,
) -> std::io::Result<()> {
    writeln!(out, "{:<30}{:<20}{}", "PRODUCT", "BRAND", metric)?;
    for r in rows {
        writeln!(
            out,
            "{:<30}{:<20}{}",
            text(r.product_name.as_deref()),
            text(r.brand.as_deref()),
            number(value(r))
        )?;
    }
    Ok(())
}

fn counts<W: Write>(out: &mut W, label: &str, rows: &[GroupCount]) -> std::io::Result<()> {
    writeln!(out, "{label:<16}COUNT")?;
    for row in rows {
        writeln!(out, "{:<16}{}", row.key, row.count)?;
    }
    Ok(())
}

pub(crate) fn text(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub(crate) fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

pub(crate) fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
