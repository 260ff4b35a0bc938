use super::*;

#[test]
fn parses_analyze_with_file() {
    let cli = Cli::try_parse_from(["aivis", "analyze", "--brand", "HelloFresh", "--file", "a.txt"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Analyze {
            ref brand,
            file: Some(ref f),
        } if brand == "HelloFresh" && f.as_path() == std::path::Path::new("a.txt")
    ));
}

#[test]
fn analyze_without_file_reads_stdin() {
    let cli = Cli::try_parse_from(["aivis", "analyze", "--brand", "HelloFresh"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Analyze { file: None, .. }));
}

#[test]
fn analyze_requires_brand() {
    assert!(Cli::try_parse_from(["aivis", "analyze"]).is_err());
}

#[test]
fn score_breakdown_flags_default_off() {
    let cli = Cli::try_parse_from(["aivis", "score", "--brand", "B", "--input", "answers.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Score {
            by_model: false,
            by_category: false,
            ..
        }
    ));
}

#[test]
fn score_with_breakdowns() {
    let cli = Cli::try_parse_from([
        "aivis",
        "score",
        "--brand",
        "B",
        "--input",
        "answers.json",
        "--by-model",
        "--by-category",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Score {
            by_model: true,
            by_category: true,
            ..
        }
    ));
}

#[test]
fn report_industry_is_optional() {
    let cli = Cli::try_parse_from(["aivis", "report", "--brand", "B", "--input", "a.json"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Report { industry: None, .. }));

    let cli = Cli::try_parse_from([
        "aivis",
        "report",
        "--brand",
        "B",
        "--industry",
        "Meal Kit",
        "--input",
        "a.json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Report { industry: Some(ref i), .. } if i == "Meal Kit"
    ));
}

#[test]
fn simulate_requires_changes() {
    assert!(Cli::try_parse_from(["aivis", "simulate", "--brand", "B", "--input", "a.json"]).is_err());

    let cli = Cli::try_parse_from([
        "aivis",
        "simulate",
        "--brand",
        "B",
        "--input",
        "a.json",
        "--changes",
        "c.json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Simulate { .. }));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["aivis"]).is_err());
}

#[test]
fn answers_parse_with_legacy_category_field() {
    let answers = input::parse_answers(
        r#"[{"query": "best meal kits", "model": "ChatGPT", "response": "HelloFresh", "intent_category": "Discovery"}]"#,
    )
    .expect("valid answers");
    assert_eq!(answers[0].category.as_deref(), Some("Discovery"));
}

#[test]
fn answers_must_be_an_array() {
    assert!(input::parse_answers(r#"{"query": "q"}"#).is_err());
}

#[test]
fn unknown_brand_gets_ad_hoc_profile() {
    let mut config = aivis_core::load_app_config_from_env().expect("default config");
    config.brands_path = PathBuf::from("does/not/exist.yaml");

    let profile = brand::resolve_profile(&config, " Acme ", Some("Pet Food"));
    assert_eq!(profile.name, "Acme");
    assert_eq!(profile.industry, "Pet Food");
    assert!(profile.known_competitors.is_empty());
}
