//! Group-by and ranking primitives shared by the derived tables.
//!
//! Groups are always yielded in first-appearance order, and every sort here
//! is stable, so ties resolve to whichever record came first in load order.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use trendboard_core::Record;

/// Partition `records` by `key`, keeping groups in first-appearance order.
/// Records with no key are left out.
pub(crate) fn group_by<'a, F>(records: &[&'a Record], key: F) -> Vec<(&'a str, Vec<&'a Record>)>
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a Record>)> = Vec::new();

    for &record in records {
        let Some(k) = key(record) else { continue };
        match index.get(k) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(k, groups.len());
                groups.push((k, vec![record]));
            }
        }
    }
    groups
}

/// Occurrence count per key, highest first; equal counts keep first-appearance order.
pub(crate) fn value_counts<'a, F>(records: &[&'a Record], key: F) -> Vec<(&'a str, usize)>
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    let mut counts: Vec<(&'a str, usize)> = group_by(records, key)
        .into_iter()
        .map(|(k, members)| (k, members.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Arithmetic mean of the present values; `None` when there are none.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0_f64, 0_u32), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / f64::from(n))
}

/// Descending order on optional scores. Missing scores sort after every
/// present one.
pub(crate) fn desc_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Index of the first item holding the maximum present score.
pub(crate) fn argmax<T, F>(items: &[T], score: F) -> Option<usize>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, item) in items.iter().enumerate() {
        let Some(s) = score(item) else { continue };
        if best.is_none_or(|(_, top)| s > top) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}

/// Records sorted descending by `score`, keeping only the first record per
/// distinct score value, truncated to `limit`. Records without a score are
/// not eligible.
pub(crate) fn top_distinct_by<'a, F>(records: &[&'a Record], score: F, limit: usize) -> Vec<&'a Record>
where
    F: Fn(&Record) -> Option<f64>,
{
    let mut ranked: Vec<&'a Record> = records
        .iter()
        .copied()
        .filter(|r| score(r).is_some())
        .collect();
    ranked.sort_by(|a, b| desc_missing_last(score(a), score(b)));

    let mut seen: HashSet<u64> = HashSet::new();
    ranked
        .into_iter()
        .filter(|r| score(r).is_some_and(|v| seen.insert(value_key(v))))
        .take(limit)
        .collect()
}

/// Hash key for float dedup; `-0.0` and `0.0` collapse to the same key.
fn value_key(v: f64) -> u64 {
    if v == 0.0 {
        0.0_f64.to_bits()
    } else {
        v.to_bits()
    }
}
