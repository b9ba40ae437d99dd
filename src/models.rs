//! Core data models used throughout doclens.
//!
//! These types represent the documents, report sections, and extracted
//! signals that flow through the analysis pipeline, plus the final
//! [`AnalysisResult`] record handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported document file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Txt,
    Md,
    Docx,
    Csv,
    Json,
}

impl FileType {
    /// Map a file extension (without dot, case-insensitive) to a file type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "txt" => Some(FileType::Txt),
            "md" | "markdown" => Some(FileType::Md),
            "docx" => Some(FileType::Docx),
            "csv" => Some(FileType::Csv),
            "json" => Some(FileType::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Txt => "txt",
            FileType::Md => "md",
            FileType::Docx => "docx",
            FileType::Csv => "csv",
            FileType::Json => "json",
        }
    }
}

/// Analysis depth requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Quick,
    Standard,
    Comprehensive,
    Expert,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Quick => "quick",
            Depth::Standard => "standard",
            Depth::Comprehensive => "comprehensive",
            Depth::Expert => "expert",
        }
    }

    /// Parse a depth name. Unknown values fall back to `Standard`.
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "quick" => Depth::Quick,
            "comprehensive" => Depth::Comprehensive,
            "expert" => Depth::Expert,
            _ => Depth::Standard,
        }
    }
}

/// Per-request tuning parameters layered on top of a template.
///
/// `compare_with_previous` is accepted and echoed back but consumed by no
/// pipeline stage (reserved field).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub template_id: String,
    pub depth: Depth,
    pub focus: Vec<String>,
    #[serde(default)]
    pub exclude_topics: Vec<String>,
    pub output_language: String,
    pub include_visualization: bool,
    #[serde(default)]
    pub compare_with_previous: bool,
}

impl AnalysisConfig {
    pub fn new(template_id: &str) -> Self {
        Self {
            template_id: template_id.to_string(),
            depth: Depth::Standard,
            focus: Vec::new(),
            exclude_topics: Vec::new(),
            output_language: "en".to_string(),
            include_visualization: false,
            compare_with_previous: false,
        }
    }
}

/// Metadata derived at upload time and enriched after sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub word_count: usize,
    pub page_estimate: Option<usize>,
    pub language: Option<String>,
    /// Always `"utf-8"` after sanitization.
    pub encoding: String,
    /// SHA-256 of the sanitized body, hex-encoded.
    pub content_hash: String,
    pub uploaded_at: DateTime<Utc>,
}

/// One titled, scored portion of the final report, one per template
/// prompt field. Immutable once created by the response normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub content: String,
    /// In [0, 1], fixed at normalization time by the parse path taken.
    pub confidence: f64,
    pub word_count: usize,
    pub key_points: Vec<String>,
    #[serde(default)]
    pub citations: Vec<String>,
}

/// Overall sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Mixed => "mixed",
        }
    }
}

/// Lexicon-based sentiment scoring output. The three distribution
/// fractions always sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub emotional_tones: Vec<String>,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Kind of span recognized by the entity extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Date,
    Percentage,
    Money,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Date => "date",
            EntityKind::Percentage => "percentage",
            EntityKind::Money => "money",
        }
    }
}

/// A recognized text span with a ±50-character context window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityResult {
    pub text: String,
    pub kind: EntityKind,
    pub confidence: f64,
    pub context: String,
}

/// A frequency-ranked topic word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicResult {
    pub word: String,
    /// frequency ÷ total token count of the document.
    pub relevance: f64,
    pub keywords: Vec<String>,
    pub frequency: usize,
}

/// Kind of visualization payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationKind {
    Chart,
    Graph,
    Wordcloud,
    Timeline,
    Network,
}

/// Chart-ready data derived from topics, entities, or sentiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationData {
    pub kind: VisualizationKind,
    pub title: String,
    pub payload: serde_json::Value,
    pub description: String,
}

/// Final record produced by one analysis run. Never mutated after
/// assembly; the presentation layer or an external store consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub document_id: String,
    pub metadata: DocumentMetadata,
    pub config: AnalysisConfig,
    pub sections: Vec<Section>,
    /// Mean of section confidences, in [0, 1].
    pub overall_confidence: f64,
    pub processing_ms: u64,
    pub total_word_count: usize,
    pub readability: Option<f64>,
    pub sentiment: Option<SentimentResult>,
    pub entities: Vec<EntityResult>,
    pub topics: Vec<TopicResult>,
    #[serde(default)]
    pub visualizations: Vec<VisualizationData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_extension("PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("markdown"), Some(FileType::Md));
        assert_eq!(FileType::from_extension("exe"), None);
    }

    #[test]
    fn depth_parse_fallback() {
        assert_eq!(Depth::parse_or_default("expert"), Depth::Expert);
        assert_eq!(Depth::parse_or_default("whatever"), Depth::Standard);
    }
}
