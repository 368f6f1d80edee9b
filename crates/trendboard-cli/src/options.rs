use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use trendboard_core::{FilterSelection, OutputFormat};
use trendboard_pipeline::{filter_options, DatasetCache, FilterOptions, Pipeline};

use crate::report::join_or_dash;

#[derive(Debug, Serialize)]
pub(crate) struct OptionsView {
    #[serde(flatten)]
    pub(crate) options: FilterOptions,
    pub(crate) platforms: Vec<String>,
}

pub(crate) fn collect_options(
    cache: &mut DatasetCache,
    pipeline: &Pipeline,
    dataset: &Path,
    selection: &FilterSelection,
) -> anyhow::Result<OptionsView> {
    let records = cache
        .get_or_load(dataset)
        .with_context(|| format!("failed to load dataset {}", dataset.display()))?;
    Ok(OptionsView {
        options: filter_options(&records),
        platforms: pipeline.platform_options(&records, selection),
    })
}

/// Print the values every filter can take. Platforms are narrowed by the
/// location, category and year in `selection`.
pub(crate) fn run_options<W: Write>(
    cache: &mut DatasetCache,
    pipeline: &Pipeline,
    dataset: &Path,
    selection: &FilterSelection,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let view = collect_options(cache, pipeline, dataset, selection)?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        }
        OutputFormat::Text => render_options(&view, out)?,
    }
    Ok(())
}

pub(crate) fn render_options<W: Write>(view: &OptionsView, out: &mut W) -> std::io::Result<()> {
    let years: Vec<String> = view.options.years.iter().map(ToString::to_string).collect();
    writeln!(out, "{:<12}All, {}", "location", join_or_dash(&view.options.locations))?;
    writeln!(out, "{:<12}All, {}", "category", join_or_dash(&view.options.categories))?;
    writeln!(out, "{:<12}All, {}", "year", join_or_dash(&years))?;
    writeln!(out, "{:<12}All, {}", "platform", join_or_dash(&view.platforms))?;
    Ok(())
}
