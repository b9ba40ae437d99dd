//! Analysis orchestration.
//!
//! Sequences the full pipeline — sanitize → metadata → structure →
//! per-field AI calls → signal extractors → visualization → assembly —
//! emitting a progress event at each checkpoint. Stages run strictly
//! sequentially; the only suspending operations are the provider calls.
//!
//! Failure at any stage is rewrapped once as `Analysis failed: <cause>`
//! and no partial result escapes. On success the caller receives one
//! fully populated [`AnalysisResult`] with both timestamps set to the
//! completion instant.

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::extract_entities;
use crate::models::{
    AnalysisConfig, AnalysisResult, DocumentMetadata, FileType, Section,
};
use crate::normalize::normalize;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::prompt::build_prompts;
use crate::provider::ProviderClient;
use crate::readability::readability_score;
use crate::sanitize::{sanitize, sanitize_title};
use crate::sentiment::analyze_sentiment;
use crate::templates::TemplateRegistry;
use crate::topics::extract_topics;
use crate::viz::build_visualizations;

/// Words per page used for the page estimate.
const WORDS_PER_PAGE: usize = 300;

/// Pipeline stage, in execution order. `Error` is terminal and reachable
/// from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Init,
    Preprocessing,
    Metadata,
    Structure,
    AiAnalysis,
    Entities,
    Sentiment,
    Visualizations,
    Compilation,
    Complete,
    Error,
}

impl AnalysisStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStage::Init => "init",
            AnalysisStage::Preprocessing => "preprocessing",
            AnalysisStage::Metadata => "metadata",
            AnalysisStage::Structure => "structure",
            AnalysisStage::AiAnalysis => "ai_analysis",
            AnalysisStage::Entities => "entities",
            AnalysisStage::Sentiment => "sentiment",
            AnalysisStage::Visualizations => "visualizations",
            AnalysisStage::Compilation => "compilation",
            AnalysisStage::Complete => "complete",
            AnalysisStage::Error => "error",
        }
    }
}

/// Extracted document handed to the orchestrator: title, type, raw size,
/// and the plain text produced by [`crate::extract`].
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub title: String,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub text: String,
}

/// Stopwords used by the naive language detector.
const EN_STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "in", "is", "was", "for", "with", "that", "this", "are", "on",
];

fn detect_language(text: &str) -> Option<String> {
    let tokens: Vec<String> = text
        .split_whitespace()
        .take(500)
        .map(|t| t.to_lowercase())
        .collect();
    if tokens.is_empty() {
        return None;
    }
    let hits = tokens
        .iter()
        .filter(|t| EN_STOPWORDS.contains(&t.as_str()))
        .count();
    if hits as f64 / tokens.len() as f64 > 0.05 {
        Some("en".to_string())
    } else {
        Some("unknown".to_string())
    }
}

/// Run one complete analysis. See the module docs for stage order and
/// failure semantics.
pub async fn run_analysis(
    registry: &TemplateRegistry,
    config: &AnalysisConfig,
    document: &DocumentInput,
    client: &dyn ProviderClient,
    reporter: &dyn ProgressReporter,
) -> Result<AnalysisResult> {
    match run_stages(registry, config, document, client, reporter).await {
        Ok(result) => Ok(result),
        Err(e) => {
            reporter.report(ProgressEvent {
                progress: 100,
                message: e.to_string(),
                stage: AnalysisStage::Error,
            });
            Err(anyhow!("Analysis failed: {}", e))
        }
    }
}

async fn run_stages(
    registry: &TemplateRegistry,
    config: &AnalysisConfig,
    document: &DocumentInput,
    client: &dyn ProviderClient,
    reporter: &dyn ProgressReporter,
) -> Result<AnalysisResult> {
    let started = std::time::Instant::now();

    let report = |progress: u8, message: &str, stage: AnalysisStage| {
        reporter.report(ProgressEvent {
            progress,
            message: message.to_string(),
            stage,
        });
    };

    report(0, "Starting analysis", AnalysisStage::Init);

    // Missing template is recoverable: fall back to the catalog's first.
    let template = registry
        .get(&config.template_id)
        .unwrap_or_else(|| registry.first());

    // preprocessing — sanitize; an empty document fails here, before any
    // network call.
    report(5, "Sanitizing document text", AnalysisStage::Preprocessing);
    let clean = sanitize(&document.text);
    if clean.is_empty() {
        bail!("document contains no analyzable text after sanitization");
    }
    report(10, "Document text sanitized", AnalysisStage::Preprocessing);

    // metadata
    report(20, "Deriving document metadata", AnalysisStage::Metadata);
    let word_count = clean.split_whitespace().count();
    let mut hasher = Sha256::new();
    hasher.update(clean.as_bytes());
    let content_hash = format!("{:x}", hasher.finalize());
    let metadata = DocumentMetadata {
        title: sanitize_title(&document.title),
        file_type: document.file_type,
        size_bytes: document.size_bytes,
        word_count,
        page_estimate: Some(word_count.div_ceil(WORDS_PER_PAGE)),
        language: detect_language(&clean),
        encoding: "utf-8".to_string(),
        content_hash,
        uploaded_at: Utc::now(),
    };

    // structure — coarse shape used only for reporting.
    let sentence_count = clean.split(['.', '!', '?']).filter(|s| !s.trim().is_empty()).count();
    report(
        30,
        &format!("{} words in {} sentences", word_count, sentence_count),
        AnalysisStage::Structure,
    );

    // ai_analysis — one provider call per template field, progress
    // partitioned proportionally across fields within 30–70.
    let prompts = build_prompts(template, config, &clean);
    let mut sections: Vec<Section> = Vec::with_capacity(prompts.len());
    let total_fields = prompts.len();
    for (i, pair) in prompts.iter().enumerate() {
        report(
            30 + (40 * i / total_fields) as u8,
            &format!("Generating {}", pair.field_title),
            AnalysisStage::AiAnalysis,
        );
        let raw = client.complete(&pair.system, &pair.user).await?;
        sections.push(normalize(&raw, &pair.field_key, &pair.field_title));
    }
    report(70, "AI analysis complete", AnalysisStage::AiAnalysis);

    // signal extractors over the same sanitized text
    report(75, "Extracting entities", AnalysisStage::Entities);
    let entities = extract_entities(&clean);
    let topics = extract_topics(&clean);

    report(80, "Scoring sentiment", AnalysisStage::Sentiment);
    let sentiment = analyze_sentiment(&clean);
    let readability = readability_score(&clean);

    report(85, "Building visualizations", AnalysisStage::Visualizations);
    let visualizations = if config.include_visualization {
        build_visualizations(&topics, &entities, Some(&sentiment))
    } else {
        Vec::new()
    };

    // compilation
    report(95, "Assembling result", AnalysisStage::Compilation);
    let overall_confidence = if sections.is_empty() {
        0.0
    } else {
        sections.iter().map(|s| s.confidence).sum::<f64>() / sections.len() as f64
    };
    let now = Utc::now();
    let result = AnalysisResult {
        id: Uuid::new_v4().to_string(),
        document_id: Uuid::new_v4().to_string(),
        metadata,
        config: config.clone(),
        sections,
        overall_confidence,
        processing_ms: started.elapsed().as_millis() as u64,
        total_word_count: word_count,
        readability: Some(readability),
        sentiment: Some(sentiment),
        entities,
        topics,
        visualizations,
        created_at: now,
        updated_at: now,
    };

    report(100, "Analysis complete", AnalysisStage::Complete);
    Ok(result)
}
