//! Stage 4 derivations. Each function reads the filtered record set and
//! builds one table; none reads another's output.

use std::collections::{BTreeMap, HashMap, HashSet};

use trendboard_core::{Choice, FilterSelection, Record};

use crate::aggregate::{argmax, desc_missing_last, group_by, mean, top_distinct_by, value_counts};
use crate::filter::RecencyWindow;
use crate::tables::{
    BrandSummary, DerivedTables, GroupCount, HashtagCount, InfluencerSummary, MaterialScore,
    ProductDetail, TopPlatform, TopProduct, TrendGranularity, TrendPoint, TrendSeries,
};

const TOP_BRANDS: usize = 5;
const TOP_SALES: usize = 5;
const TOP_INFLUENCERS_BY_VOLUME: usize = 10;
const TOP_INFLUENCERS_BY_ENGAGEMENT: usize = 5;
const TOP_ENGAGEMENT_PRODUCTS: usize = 5;
const LONGEVITY_SAMPLE: usize = 15;
const TOP_HASHTAGS: usize = 20;

pub(crate) fn derive_tables(
    records: &[&Record],
    selection: &FilterSelection,
    window: Option<RecencyWindow>,
) -> DerivedTables {
    DerivedTables {
        top_product: top_product(records),
        top_brand: top_brand(records),
        top_platform: top_platform(records, &selection.platform),
        trend_series: trend_series(records, window),
        gender_distribution: counts(records, |r| r.gender.as_deref()),
        age_group_distribution: counts(records, |r| r.age_group.as_deref()),
        brand_top5: brand_top5(records),
        top_sales: owned(top_distinct_by(records, |r| r.purchase_frequency, TOP_SALES)),
        material_sustainability: material_sustainability(records),
        top_influencers_by_volume: top_influencers_by_volume(records),
        influencer_purchase_frequencies: influencer_purchase_frequencies(records),
        top_influencers_by_engagement: top_influencers_by_engagement(records),
        top_engagement_products: owned(top_distinct_by(
            records,
            |r| r.engagement_count,
            TOP_ENGAGEMENT_PRODUCTS,
        )),
        ranked_product_details: ranked_product_details(records),
        longevity_sample: longevity_sample(records),
        hashtag_text: hashtag_text(records),
        top_hashtags: top_hashtags(records),
    }
}

fn owned(records: Vec<&Record>) -> Vec<Record> {
    records.into_iter().cloned().collect()
}

fn counts<'a, F>(records: &[&'a Record], key: F) -> Vec<GroupCount>
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    value_counts(records, key)
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
        })
        .collect()
}

pub(crate) fn top_product(records: &[&Record]) -> Option<TopProduct> {
    let idx = argmax(records, |r| r.overall_trend_score)?;
    let record = records[idx];
    Some(TopProduct {
        product_name: record.product_name.clone(),
        brand: record.brand.clone(),
        overall_trend_score: record.overall_trend_score?,
    })
}

pub(crate) fn top_brand(records: &[&Record]) -> Option<String> {
    let brands: Vec<(&str, Option<f64>)> = group_by(records, |r| r.brand.as_deref())
        .into_iter()
        .map(|(brand, members)| (brand, mean(members.iter().map(|r| r.overall_trend_score))))
        .collect();
    let idx = argmax(&brands, |(_, score)| *score)?;
    Some(brands[idx].0.to_string())
}

/// With a platform selected, that platform and the mean engagement over
/// every record; otherwise the platform with the highest mean engagement.
pub(crate) fn top_platform(records: &[&Record], selected: &Choice<String>) -> Option<TopPlatform> {
    if let Choice::Only(platform) = selected {
        return Some(TopPlatform {
            platform: platform.clone(),
            mean_engagement: mean(records.iter().map(|r| r.engagement_count)),
        });
    }

    let platforms: Vec<(&str, Option<f64>)> = group_by(records, |r| r.platform.as_deref())
        .into_iter()
        .map(|(platform, members)| (platform, mean(members.iter().map(|r| r.engagement_count))))
        .collect();
    let idx = argmax(&platforms, |(_, engagement)| *engagement)?;
    let (platform, mean_engagement) = platforms[idx];
    Some(TopPlatform {
        platform: platform.to_string(),
        mean_engagement,
    })
}

/// Daily means inside the recency window when no year is selected,
/// monthly means otherwise. Periods ascend.
pub(crate) fn trend_series(records: &[&Record], window: Option<RecencyWindow>) -> TrendSeries {
    match window {
        Some(window) => {
            let mut days: BTreeMap<chrono::NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
            for record in records.iter().filter(|r| window.contains(r.launch_date)) {
                days.entry(record.launch_date)
                    .or_default()
                    .push(record.trend_score);
            }
            TrendSeries {
                granularity: TrendGranularity::Daily,
                points: days
                    .into_iter()
                    .map(|(day, scores)| TrendPoint {
                        period: day.format("%Y-%m-%d").to_string(),
                        mean_trend_score: mean(scores),
                    })
                    .collect(),
            }
        }
        None => {
            let mut months: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
            for record in records {
                months
                    .entry(record.month())
                    .or_default()
                    .push(record.trend_score);
            }
            TrendSeries {
                granularity: TrendGranularity::Monthly,
                points: months
                    .into_iter()
                    .map(|(month, scores)| TrendPoint {
                        period: month,
                        mean_trend_score: mean(scores),
                    })
                    .collect(),
            }
        }
    }
}

pub(crate) fn brand_top5(records: &[&Record]) -> Vec<BrandSummary> {
    let mut brands: Vec<BrandSummary> = group_by(records, |r| r.brand.as_deref())
        .into_iter()
        .map(|(brand, members)| BrandSummary {
            brand: brand.to_string(),
            mean_overall_trend_score: mean(members.iter().map(|r| r.overall_trend_score)),
            emerging_trend_count: members.iter().map(|r| r.emerging_trend_count()).sum(),
        })
        .collect();
    brands.sort_by(|a, b| desc_missing_last(a.mean_overall_trend_score, b.mean_overall_trend_score));
    brands.truncate(TOP_BRANDS);
    brands
}

/// Mean sustainability per material, ordered by material name.
pub(crate) fn material_sustainability(records: &[&Record]) -> Vec<MaterialScore> {
    let mut materials: Vec<MaterialScore> = group_by(records, |r| r.material.as_deref())
        .into_iter()
        .map(|(material, members)| MaterialScore {
            material: material.to_string(),
            mean_sustainability_score: mean(members.iter().map(|r| r.sustainability_score)),
        })
        .collect();
    materials.sort_by(|a, b| a.material.cmp(&b.material));
    materials
}

pub(crate) fn top_influencers_by_volume(records: &[&Record]) -> Vec<GroupCount> {
    let mut top = counts(records, |r| r.influencer_id.as_deref());
    top.truncate(TOP_INFLUENCERS_BY_VOLUME);
    top
}

pub(crate) fn influencer_purchase_frequencies(records: &[&Record]) -> Vec<Record> {
    let top: HashSet<&str> = value_counts(records, |r| r.influencer_id.as_deref())
        .into_iter()
        .take(TOP_INFLUENCERS_BY_VOLUME)
        .map(|(id, _)| id)
        .collect();
    records
        .iter()
        .filter(|r| r.influencer_id.as_deref().is_some_and(|id| top.contains(id)))
        .map(|&r| r.clone())
        .collect()
}

pub(crate) fn top_influencers_by_engagement(records: &[&Record]) -> Vec<InfluencerSummary> {
    let mut influencers: Vec<InfluencerSummary> = group_by(records, |r| r.influencer_id.as_deref())
        .into_iter()
        .map(|(id, members)| InfluencerSummary {
            influencer_id: id.to_string(),
            mean_influencer_score: mean(members.iter().map(|r| r.influencer_score)),
            mean_engagement_count: mean(members.iter().map(|r| r.engagement_count)),
        })
        .collect();
    influencers.sort_by(|a, b| desc_missing_last(a.mean_engagement_count, b.mean_engagement_count));
    influencers.truncate(TOP_INFLUENCERS_BY_ENGAGEMENT);
    influencers
}

/// Every record, highest overall trend score first; unscored records last.
pub(crate) fn ranked_product_details(records: &[&Record]) -> Vec<ProductDetail> {
    let mut ranked: Vec<&Record> = records.to_vec();
    ranked.sort_by(|a, b| desc_missing_last(a.overall_trend_score, b.overall_trend_score));
    ranked.into_iter().map(ProductDetail::from).collect()
}

/// The lowest-scoring records, ascending.
pub(crate) fn longevity_sample(records: &[&Record]) -> Vec<Record> {
    let mut scored: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|r| r.overall_trend_score.is_some())
        .collect();
    scored.sort_by(|a, b| desc_missing_last(b.overall_trend_score, a.overall_trend_score));
    scored.truncate(LONGEVITY_SAMPLE);
    owned(scored)
}

pub(crate) fn hashtag_text(records: &[&Record]) -> String {
    records
        .iter()
        .map(|r| r.hashtags.as_str())
        .filter(|h| !h.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Frequencies of the whitespace-separated tokens of the hashtag text,
/// case-folded and otherwise counted as written. Counts tie-break on first
/// appearance.
pub(crate) fn top_hashtags(records: &[&Record]) -> Vec<HashtagCount> {
    let mut order: Vec<String> = Vec::new();
    let mut tally: HashMap<String, usize> = HashMap::new();

    for record in records {
        for token in record.hashtags.split_whitespace() {
            let tag = token.to_lowercase();
            let count = tally.entry(tag.clone()).or_insert(0);
            if *count == 0 {
                order.push(tag);
            }
            *count += 1;
        }
    }

    let mut ranked: Vec<HashtagCount> = order
        .into_iter()
        .map(|hashtag| {
            let count = tally.get(&hashtag).copied().unwrap_or_default();
            HashtagCount { hashtag, count }
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_HASHTAGS);
    ranked
}

#[cfg(test)]
#[path = "derive_test.rs"]
mod tests;
