use super::*;

const DATASET: &str = "\
Product_Name,Brand,Category,Launch_Date,Location,Platform,Gender,Age_Group,Material,Trend_Score,Overall_Trend_Score,Engagement_Count,Purchase_Frequency,Sustainability_Score,Trend_Longevity,Influencer_Score,Emerging_Trend_Flag,Influencer_ID,Hashtags
Cargo Pants,Uniqlo,Bottoms,2024-06-30,NY,TikTok,Male,18-24,Cotton,71,80,1200,14,6.2,45,8.1,1,INF-001,#cargo #y2k
Slip Dress,Zara,Dresses,2024-06-12,NY,Instagram,Female,25-34,Silk,65,77,900,9,4.8,30,7.4,0,INF-002,#silk
Wool Coat,Zara,Outerwear,2023-11-15,Paris,Instagram,Female,25-34,Wool,77,88,2100,18,3.1,90,9.0,1,INF-004,#wool
";

fn write_dataset(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "trendboard-cli-{tag}-{}.csv",
        std::process::id()
    ));
    std::fs::write(&path, DATASET).expect("temp dataset should be writable");
    path
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("output is utf-8")
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["trendboard"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.dataset.is_none());
    assert!(cli.format.is_none());
}

#[test]
fn report_defaults_every_filter_to_all() {
    let cli = Cli::try_parse_from(["trendboard", "report"]).expect("expected valid cli args");
    let Some(Commands::Report { scope, platform }) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(scope.selection(platform), FilterSelection::default());
}

#[test]
fn report_parses_filters_and_global_flags() {
    let cli = Cli::try_parse_from([
        "trendboard",
        "report",
        "--location",
        "NY",
        "--year",
        "2023",
        "--platform",
        "Instagram",
        "--format",
        "json",
        "--dataset",
        "data/trends.csv",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.format, Some(OutputFormat::Json));
    assert_eq!(cli.dataset, Some(PathBuf::from("data/trends.csv")));
    let Some(Commands::Report { scope, platform }) = cli.command else {
        panic!("expected report command");
    };
    let selection = scope.selection(platform);
    assert_eq!(selection.location, Choice::Only("NY".to_string()));
    assert_eq!(selection.category, Choice::All);
    assert_eq!(selection.year, Choice::Only(2023));
    assert_eq!(selection.platform, Choice::Only("Instagram".to_string()));
}

#[test]
fn non_numeric_year_is_rejected() {
    let result = Cli::try_parse_from(["trendboard", "report", "--year", "recent"]);
    assert!(result.is_err());
}

#[test]
fn options_has_no_platform_flag() {
    let result = Cli::try_parse_from(["trendboard", "options", "--platform", "TikTok"]);
    assert!(result.is_err());
}

#[test]
fn parses_explore_command() {
    let cli = Cli::try_parse_from(["trendboard", "explore"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Explore)));
}

#[test]
fn assignments_split_on_whitespace_and_honor_quotes() {
    let pairs = explore::parse_assignments(r#"location=NY category="Knit Tops"  year=2024"#)
        .expect("valid assignments");
    assert_eq!(
        pairs,
        vec![
            ("location".to_string(), "NY".to_string()),
            ("category".to_string(), "Knit Tops".to_string()),
            ("year".to_string(), "2024".to_string()),
        ]
    );
}

#[test]
fn assignment_without_equals_is_rejected() {
    let err = explore::parse_assignments("location").unwrap_err();
    assert!(err.contains("key=value"), "unexpected error: {err}");
}

#[test]
fn unterminated_quote_is_rejected() {
    let err = explore::parse_assignments(r#"category="Knit"#).unwrap_err();
    assert!(err.contains("unterminated"), "unexpected error: {err}");
}

#[test]
fn rejected_line_leaves_selection_unchanged() {
    let selection = FilterSelection::default().with_location("NY");
    assert!(explore::apply_line(&selection, "year=2024 season=summer").is_err());
    assert_eq!(selection, FilterSelection::default().with_location("NY"));

    let next = explore::apply_line(&selection, "year=2024 location=All").unwrap();
    assert_eq!(next, FilterSelection::default().with_year(2024));
}

#[test]
fn number_and_text_render_missing_as_dash() {
    assert_eq!(report::number(None), "-");
    assert_eq!(report::number(Some(1350.0)), "1350.00");
    assert_eq!(report::text(None), "-");
    assert_eq!(report::join_or_dash(&[]), "-");
}

#[test]
fn text_report_prints_headline_and_tables() {
    let path = write_dataset("report");
    let mut cache = DatasetCache::default();
    let mut buf = Vec::new();
    report::run_report(
        &mut cache,
        &Pipeline::default(),
        &path,
        &FilterSelection::default().with_location("NY").with_year(2024),
        OutputFormat::Text,
        &mut buf,
    )
    .expect("report should render");
    std::fs::remove_file(&path).ok();

    let text = output(buf);
    assert!(text.contains("Top product:    Cargo Pants (brand: Uniqlo)"), "{text}");
    assert!(text.contains("## Top Hashtags"));
    assert!(text.contains("#cargo"));
}

#[test]
fn text_report_of_empty_selection_says_so() {
    let path = write_dataset("empty");
    let mut cache = DatasetCache::default();
    let mut buf = Vec::new();
    report::run_report(
        &mut cache,
        &Pipeline::default(),
        &path,
        &FilterSelection::default().with_location("Tokyo"),
        OutputFormat::Text,
        &mut buf,
    )
    .expect("empty selection is not an error");
    std::fs::remove_file(&path).ok();

    let text = output(buf);
    assert!(text.contains("no data for this combination of filters"));
    assert!(!text.contains("Top product"));
}

#[test]
fn json_report_carries_outcome_status() {
    let path = write_dataset("json");
    let mut cache = DatasetCache::default();
    let mut buf = Vec::new();
    report::run_report(
        &mut cache,
        &Pipeline::default(),
        &path,
        &FilterSelection::default().with_year(2023),
        OutputFormat::Json,
        &mut buf,
    )
    .expect("report should render");
    std::fs::remove_file(&path).ok();

    let value: serde_json::Value = serde_json::from_str(&output(buf)).expect("valid json");
    assert_eq!(value["record_count"], 1);
    assert_eq!(value["outcome"]["status"], "tables");
}

#[test]
fn missing_dataset_is_an_error() {
    let mut cache = DatasetCache::default();
    let mut buf = Vec::new();
    let err = report::run_report(
        &mut cache,
        &Pipeline::default(),
        &std::env::temp_dir().join("trendboard-cli-missing.csv"),
        &FilterSelection::default(),
        OutputFormat::Text,
        &mut buf,
    )
    .unwrap_err();
    assert!(err.to_string().contains("failed to load dataset"));
}

#[test]
fn options_list_full_dataset_values_and_scoped_platforms() {
    let path = write_dataset("options");
    let mut cache = DatasetCache::default();
    let view = options::collect_options(
        &mut cache,
        &Pipeline::default(),
        &path,
        &FilterSelection::default().with_location("Paris").with_year(2023),
    )
    .expect("options should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(view.options.locations, vec!["NY", "Paris"]);
    assert_eq!(view.options.years, vec![2024, 2023]);
    assert_eq!(view.platforms, vec!["Instagram"]);

    let mut buf = Vec::new();
    options::render_options(&view, &mut buf).unwrap();
    assert!(output(buf).contains("All, NY, Paris"));
}

#[test]
fn explore_recomputes_after_each_line() {
    let path = write_dataset("explore");
    let mut cache = DatasetCache::default();
    let input = "location=Paris year=2023\n\nbogus\nlocation=Tokyo\nquit\nyear=2024\n";
    let mut buf = Vec::new();
    explore::run_explore(
        &mut cache,
        &Pipeline::default(),
        &path,
        input.as_bytes(),
        &mut buf,
    )
    .expect("session should end cleanly");
    std::fs::remove_file(&path).ok();

    let text = output(buf);
    assert!(text.contains("filter: location=Paris category=All year=2023 platform=All"));
    assert!(text.contains("Top product:    Wool Coat (brand: Zara)"));
    assert!(text.contains("error: expected key=value"));
    assert!(text.contains("no data for this combination of filters"));
    // Lines after quit are never read.
    assert!(!text.contains("year=2024"));
}

fn config_for(dataset: PathBuf) -> AppConfig {
    AppConfig {
        dataset_path: dataset,
        log_level: "info".to_string(),
        csv_delimiter: b',',
        recent_window_days: 30,
        window_anchor: trendboard_core::WindowAnchor::Filtered,
        output_format: OutputFormat::Text,
    }
}

#[test]
fn help_is_handled_by_argument_parsing() {
    let err = Cli::try_parse_from(["trendboard", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn run_uses_config_dataset_and_format_unless_overridden() {
    let path = write_dataset("run");
    let cli = Cli::try_parse_from(["trendboard", "--format", "json", "report", "--year", "2023"])
        .expect("expected valid cli args");
    let mut buf = Vec::new();
    run(cli, &config_for(path.clone()), std::io::empty(), &mut buf).expect("report should run");
    std::fs::remove_file(&path).ok();

    let value: serde_json::Value = serde_json::from_str(&output(buf)).expect("valid json");
    assert_eq!(value["record_count"], 1);
}

#[test]
fn run_without_command_prints_help() {
    let cli = Cli::try_parse_from(["trendboard"]).expect("expected valid cli args");
    let mut buf = Vec::new();
    run(
        cli,
        &config_for(PathBuf::from("unused.csv")),
        std::io::empty(),
        &mut buf,
    )
    .expect("help should render");
    let text = output(buf);
    assert!(text.contains("report"), "{text}");
    assert!(text.contains("explore"));
}
