use super::*;
use crate::provider::testing::StaticProvider;
use crate::provider::UnavailableProvider;

fn answer(query: &str, response: &str, mentioned: bool, competitors: &[&str]) -> AnswerSignal {
    let mut s = AnswerSignal::not_mentioned(response);
    s.query = query.to_string();
    s.mentioned = mentioned;
    s.competitors = competitors.iter().map(|c| (*c).to_string()).collect();
    s
}

fn context() -> BrandContext {
    BrandContext::new("TestBrand", "Meal Kit")
}

#[test]
fn themes_sorted_by_frequency_then_table_order() {
    let a = answer(
        "best affordable meal kits",
        "HelloFresh has great pricing and wide variety.",
        false,
        &["HelloFresh"],
    );
    let b = answer(
        "eco meal delivery",
        "Green Chef leads on variety and organic sourcing.",
        false,
        &["Green Chef"],
    );
    let gaps = theme_gaps(&[&a, &b]);
    let names: Vec<&str> = gaps.iter().map(|g| g.theme.as_str()).collect();
    assert_eq!(names, vec!["variety", "pricing", "organic"]);
    assert_eq!(gaps[0].frequency, 2);
    assert!((gaps[0].percentage - 100.0).abs() < 1e-9);
    assert_eq!(gaps[0].examples.len(), 2);
    assert_eq!(gaps[0].examples[1].competitors, vec!["Green Chef"]);
}

#[test]
fn impact_thresholds() {
    let gap = |frequency| ThemeGap {
        theme: "pricing".to_string(),
        frequency,
        percentage: 0.0,
        examples: Vec::new(),
    };
    let top = top_missing_themes(&[gap(6), gap(3), gap(2)], 5);
    let impacts: Vec<Priority> = top.iter().map(|t| t.impact).collect();
    assert_eq!(impacts, vec![Priority::High, Priority::Medium, Priority::Low]);
}

#[test]
fn queries_group_by_first_matching_intent() {
    let cheap = answer("cheap and fast meal kits", "", false, &[]);
    let green = answer("organic dinners", "", false, &[]);
    let other = answer("meal kits for two", "", false, &[]);
    let groups = group_queries(&[&cheap, &green, &other]);
    let names: Vec<&str> = groups.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["Price/Budget", "Sustainability", "General"]);
}

#[tokio::test]
async fn all_mentioned_batch_has_empty_report() {
    let batch = vec![answer("q", "TestBrand rocks", true, &[])];
    let report = analyze_gaps(&batch, &context(), &UnavailableProvider, &AnalyticsSettings::default()).await;
    assert_eq!(report.total_non_mentions, 0);
    assert!(report.reasons.is_empty());
    assert_eq!(report.summary, "TestBrand was mentioned in all queries!");
}

#[tokio::test]
async fn provider_failure_uses_template_reason() {
    let batch = vec![
        answer("cheap meal kits", "EveryPlate has the lowest pricing.", false, &["EveryPlate"]),
        answer("q2", "TestBrand", true, &[]),
    ];
    let report = analyze_gaps(&batch, &context(), &UnavailableProvider, &AnalyticsSettings::default()).await;
    assert_eq!(report.total_non_mentions, 1);
    assert!((report.non_mention_rate - 50.0).abs() < 1e-9);
    assert_eq!(report.reasons.len(), 1);
    assert_eq!(
        report.reasons[0].reason,
        "Competitors dominated this query category. TestBrand may lack visibility or relevant positioning."
    );
    assert_eq!(report.reasons[0].query_category, "Price/Budget");
    assert!(report.summary.contains("The primary gap is 'pricing'"));
}

#[tokio::test]
async fn reasons_are_capped_and_use_provider_text() {
    let batch = vec![
        answer("cheap kits", "", false, &[]),
        answer("best kits", "", false, &[]),
        answer("fast kits", "", false, &[]),
    ];
    let provider = StaticProvider::new("They lead on price.");
    let settings = AnalyticsSettings {
        max_gap_reasons: 2,
        ..AnalyticsSettings::default()
    };
    let report = analyze_gaps(&batch, &context(), &provider, &settings).await;
    assert_eq!(report.reasons.len(), 2);
    assert_eq!(provider.call_count(), 2);
    assert!(report.reasons.iter().all(|r| r.reason == "They lead on price."));
    assert_eq!(
        report.summary,
        "TestBrand appears to have strong visibility. No major gaps detected."
    );
}
