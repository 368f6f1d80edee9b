//! Interactive session: each input line adjusts the current filter selection
//! and triggers a fresh pipeline pass.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use trendboard_core::FilterSelection;
use trendboard_pipeline::{DatasetCache, Pipeline};

use crate::report::{join_or_dash, render_summary};

const PROMPT: &str = "trendboard> ";

/// Split a line into `key=value` pairs. Values may be wrapped in double
/// quotes to carry spaces, e.g. `category="Knit Tops"`.
pub(crate) fn parse_assignments(line: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            key.push(c);
            chars.next();
        }
        if chars.next() != Some('=') {
            return Err(format!("expected key=value, got '{key}'"));
        }
        if key.is_empty() {
            return Err("missing key before '='".to_string());
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                value.push(c);
            }
            if !closed {
                return Err(format!("unterminated quote in value for '{key}'"));
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
        }
        pairs.push((key, value));
    }

    Ok(pairs)
}

/// Apply every pair to a copy of `selection`. The original is left untouched
/// when any pair is rejected.
pub(crate) fn apply_line(selection: &FilterSelection, line: &str) -> anyhow::Result<FilterSelection> {
    let pairs = parse_assignments(line).map_err(anyhow::Error::msg)?;
    let mut next = selection.clone();
    for (key, value) in pairs {
        next.set(&key, &value)?;
    }
    Ok(next)
}

/// Read selections from `input` until EOF or `quit`, printing a summary of
/// each pass to `out`. `reset` returns every filter to `All`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or reading and writing
/// fails. Malformed lines are reported and the session continues.
pub(crate) fn run_explore<R: BufRead, W: Write>(
    cache: &mut DatasetCache,
    pipeline: &Pipeline,
    dataset: &Path,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let records = cache
        .get_or_load(dataset)
        .with_context(|| format!("failed to load dataset {}", dataset.display()))?;
    tracing::info!(path = %dataset.display(), records = records.len(), "explore session started");

    let mut selection = FilterSelection::default();
    writeln!(out, "enter filters as key=value (location, category, year, platform); 'reset' or 'quit'")?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        match trimmed {
            "" => {}
            "quit" | "exit" => break,
            "reset" => {
                selection = FilterSelection::default();
                summarize(pipeline, &records, &selection, out)?;
            }
            _ => match apply_line(&selection, trimmed) {
                Ok(next) => {
                    selection = next;
                    summarize(pipeline, &records, &selection, out)?;
                }
                Err(e) => writeln!(out, "error: {e}")?,
            },
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

fn summarize<W: Write>(
    pipeline: &Pipeline,
    records: &[trendboard_core::Record],
    selection: &FilterSelection,
    out: &mut W,
) -> std::io::Result<()> {
    let computation = pipeline.compute(records, selection);
    writeln!(out, "filter: {selection}")?;
    writeln!(out, "platforms: {}", join_or_dash(&computation.platform_options))?;
    match computation.tables() {
        Some(tables) => {
            writeln!(out, "records: {}", computation.record_count)?;
            render_summary(tables, out)
        }
        None => writeln!(out, "no data for this combination of filters"),
    }
}
