//! Reading answer batches and change sets from disk.

use std::io::Read;
use std::path::Path;

use aivis_analytics::BrandChanges;
use aivis_core::RawAnswer;
use anyhow::Context;

/// Answer text from `file`, or all of stdin when no file is given.
pub(crate) fn read_answer_text(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answer text from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read answer text from stdin")?;
            Ok(text)
        }
    }
}

pub(crate) fn parse_answers(json: &str) -> anyhow::Result<Vec<RawAnswer>> {
    serde_json::from_str(json).context("answers must be a JSON array of answer objects")
}

pub(crate) fn read_answers(path: &Path) -> anyhow::Result<Vec<RawAnswer>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers from {}", path.display()))?;
    let answers = parse_answers(&json)?;
    let failed = answers.iter().filter(|a| a.error.is_some()).count();
    if failed > 0 {
        tracing::warn!(failed, total = answers.len(), "batch contains failed answers");
    }
    Ok(answers)
}

pub(crate) fn read_changes(path: &Path) -> anyhow::Result<BrandChanges> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read changes from {}", path.display()))?;
    serde_json::from_str(&json).context("changes must be a JSON object")
}
