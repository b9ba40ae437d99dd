//! Result export.
//!
//! Serializes an [`AnalysisResult`] to pretty JSON on disk and renders a
//! plain-text report for terminal output. Full presentation (charts,
//! markdown) belongs to downstream consumers; this is the minimal
//! "hand me a fully-formed result" surface.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::AnalysisResult;

/// Write the result as pretty-printed JSON.
pub fn write_result_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write result to {}", path.display()))?;
    Ok(())
}

/// Render a human-readable text report.
pub fn render_text_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", result.metadata.title));
    out.push_str(&format!(
        "{} · {} words · confidence {:.2} · {} ms\n\n",
        result.metadata.file_type.as_str(),
        result.total_word_count,
        result.overall_confidence,
        result.processing_ms,
    ));

    for section in &result.sections {
        out.push_str(&format!("## {}\n{}\n", section.title, section.content));
        if !section.key_points.is_empty() {
            out.push_str("Key points:\n");
            for point in &section.key_points {
                out.push_str(&format!("  - {}\n", point));
            }
        }
        out.push('\n');
    }

    if let Some(sentiment) = &result.sentiment {
        out.push_str(&format!(
            "Sentiment: {} (pos {:.2} / neg {:.2} / neutral {:.2})\n",
            sentiment.label.as_str(),
            sentiment.positive,
            sentiment.negative,
            sentiment.neutral,
        ));
    }
    if let Some(score) = result.readability {
        out.push_str(&format!("Readability: {:.1}\n", score));
    }
    if !result.topics.is_empty() {
        let words: Vec<String> = result
            .topics
            .iter()
            .map(|t| format!("{} ({})", t.word, t.frequency))
            .collect();
        out.push_str(&format!("Topics: {}\n", words.join(", ")));
    }
    if !result.entities.is_empty() {
        out.push_str(&format!("Entities: {}\n", result.entities.len()));
        for e in &result.entities {
            out.push_str(&format!("  {} [{}]\n", e.text, e.kind.as_str()));
        }
    }

    out
}
