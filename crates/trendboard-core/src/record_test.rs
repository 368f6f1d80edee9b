use super::*;

fn make_record(date: &str) -> Record {
    Record {
        product_name: Some("Pleated Maxi Skirt".to_string()),
        brand: Some("Zara".to_string()),
        category: Some("Skirts".to_string()),
        launch_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
        location: Some("NY".to_string()),
        platform: Some("TikTok".to_string()),
        gender: Some("Female".to_string()),
        age_group: Some("18-24".to_string()),
        material: Some("Linen".to_string()),
        trend_score: Some(71.5),
        overall_trend_score: Some(80.0),
        engagement_count: Some(1200.0),
        purchase_frequency: Some(14.0),
        sustainability_score: Some(6.2),
        trend_longevity: Some(45.0),
        influencer_score: Some(8.1),
        emerging_trend_flag: Some(true),
        influencer_id: Some("INF-001".to_string()),
        hashtags: "#linen #summer".to_string(),
    }
}

#[test]
fn year_and_month_follow_launch_date() {
    let record = make_record("2024-03-09");
    assert_eq!(record.year(), 2024);
    assert_eq!(record.month(), "2024-03");
}

#[test]
fn month_is_zero_padded() {
    let record = make_record("2023-01-31");
    assert_eq!(record.month(), "2023-01");
}

#[test]
fn emerging_trend_count_treats_missing_flag_as_zero() {
    let mut record = make_record("2024-03-09");
    assert_eq!(record.emerging_trend_count(), 1);
    record.emerging_trend_flag = Some(false);
    assert_eq!(record.emerging_trend_count(), 0);
    record.emerging_trend_flag = None;
    assert_eq!(record.emerging_trend_count(), 0);
}

#[test]
fn hashtags_plain_text_is_text_variant() {
    assert_eq!(
        Hashtags::parse("  #ootd   #streetwear "),
        Hashtags::Text("#ootd   #streetwear".to_string())
    );
}

#[test]
fn hashtags_json_array_is_list_variant() {
    assert_eq!(
        Hashtags::parse(r##"["#ootd", "#y2k"]"##),
        Hashtags::List(vec!["#ootd".to_string(), "#y2k".to_string()])
    );
}

#[test]
fn hashtags_single_quoted_list_is_list_variant() {
    assert_eq!(
        Hashtags::parse("['#ootd', '#y2k']"),
        Hashtags::List(vec!["#ootd".to_string(), "#y2k".to_string()])
    );
}

#[test]
fn hashtags_empty_list_normalizes_to_empty_text() {
    assert_eq!(Hashtags::parse("[]").into_text(), "");
}

#[test]
fn hashtags_text_and_list_normalize_to_same_canonical_form() {
    let from_text = Hashtags::parse("#ootd\t#y2k").into_text();
    let from_list = Hashtags::parse("['#ootd', '#y2k']").into_text();
    assert_eq!(from_text, "#ootd #y2k");
    assert_eq!(from_text, from_list);
}

#[test]
fn serde_roundtrip_record() {
    let record = make_record("2024-06-30");
    let json = serde_json::to_string(&record).expect("serialization failed");
    let decoded: Record = serde_json::from_str(&json).expect("deserialization failed");
    assert_eq!(decoded, record);
}
