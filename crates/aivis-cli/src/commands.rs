//! Command handlers. Each returns the JSON document `main` prints.

use std::collections::BTreeMap;
use std::path::Path;

use aivis_analytics::{
    run_analytics, simulate_improvement, AnalyticsBundle, AnalyticsSettings, BrandContext,
};
use aivis_core::{AnswerSignal, AppConfig, ScoreBreakdown};
use aivis_scoring::{interpret_score, CompetitorCount};
use serde::Serialize;
use serde_json::Value;

use crate::brand::{analyzer_for, resolve_profile};
use crate::input::{read_answer_text, read_answers, read_changes};
use crate::provider::CliProvider;

const TOP_COMPETITORS: usize = 10;

#[derive(Debug, Serialize)]
struct Interpretation {
    level: &'static str,
    description: &'static str,
}

impl Interpretation {
    fn of(score: &ScoreBreakdown) -> Self {
        let level = interpret_score(score.overall_score);
        Self {
            level: level.label(),
            description: level.description(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
    brand: String,
    score: ScoreBreakdown,
    interpretation: Interpretation,
    top_competitors: Vec<CompetitorCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_model: Option<BTreeMap<String, ScoreBreakdown>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_category: Option<BTreeMap<String, ScoreBreakdown>>,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    brand: String,
    industry: String,
    score: ScoreBreakdown,
    interpretation: Interpretation,
    signals: Vec<AnswerSignal>,
    analytics: AnalyticsBundle,
}

pub(crate) fn run_analyze(
    config: &AppConfig,
    brand: &str,
    file: Option<&Path>,
) -> anyhow::Result<Value> {
    let profile = resolve_profile(config, brand, None);
    let analyzer = analyzer_for(&profile)?;
    let text = read_answer_text(file)?;
    Ok(serde_json::to_value(analyzer.analyze(&text))?)
}

/// Extract signals for every answer in `input` and score the batch.
fn extract_batch(
    config: &AppConfig,
    brand: &str,
    industry: Option<&str>,
    input: &Path,
) -> anyhow::Result<(BrandContext, Vec<AnswerSignal>, ScoreBreakdown)> {
    let profile = resolve_profile(config, brand, industry);
    let analyzer = analyzer_for(&profile)?;
    let answers = read_answers(input)?;
    let signals = analyzer.analyze_batch(&answers);
    let score = aivis_scoring::score(&signals);
    tracing::info!(
        brand = %profile.name,
        answers = signals.len(),
        overall_score = score.overall_score,
        "batch extracted and scored"
    );
    Ok((BrandContext::from_profile(&profile), signals, score))
}

pub(crate) fn run_score(
    config: &AppConfig,
    brand: &str,
    input: &Path,
    by_model: bool,
    by_category: bool,
) -> anyhow::Result<Value> {
    let (context, signals, score) = extract_batch(config, brand, None, input)?;
    let output = ScoreOutput {
        brand: context.brand,
        interpretation: Interpretation::of(&score),
        top_competitors: aivis_scoring::top_competitors(&signals, TOP_COMPETITORS),
        by_model: by_model.then(|| aivis_scoring::model_breakdown(&signals)),
        by_category: by_category.then(|| aivis_scoring::category_breakdown(&signals)),
        score,
    };
    Ok(serde_json::to_value(output)?)
}

pub(crate) async fn run_report(
    config: &AppConfig,
    brand: &str,
    industry: Option<&str>,
    input: &Path,
) -> anyhow::Result<Value> {
    let (context, signals, score) = extract_batch(config, brand, industry, input)?;
    let provider = CliProvider::from_config(config)?;
    let settings = AnalyticsSettings::from_config(config);

    let analytics = run_analytics(&signals, &score, &context, &provider, &settings).await;

    let output = ReportOutput {
        brand: context.brand,
        industry: context.industry,
        interpretation: Interpretation::of(&score),
        score,
        signals,
        analytics,
    };
    Ok(serde_json::to_value(output)?)
}

pub(crate) async fn run_simulate(
    config: &AppConfig,
    brand: &str,
    industry: Option<&str>,
    input: &Path,
    changes: &Path,
) -> anyhow::Result<Value> {
    let changes = read_changes(changes)?;
    let (context, signals, score) = extract_batch(config, brand, industry, input)?;
    let provider = CliProvider::from_config(config)?;
    let settings = AnalyticsSettings::from_config(config);

    let result = simulate_improvement(
        &signals,
        score.overall_score,
        &changes,
        &context,
        &provider,
        &settings,
    )
    .await;
    Ok(serde_json::to_value(result)?)
}
