//! Visualization payload derivation.
//!
//! Builds chart-ready [`VisualizationData`] records from the extracted
//! signals when the caller asked for visualization. Payloads are plain
//! JSON shaped for the chart kind; actual rendering belongs to the
//! presentation layer. An entry is emitted only when its underlying
//! signal list is non-empty.

use crate::models::{
    EntityKind, EntityResult, SentimentResult, TopicResult, VisualizationData, VisualizationKind,
};

/// Derive all applicable visualizations from one run's signals.
pub fn build_visualizations(
    topics: &[TopicResult],
    entities: &[EntityResult],
    sentiment: Option<&SentimentResult>,
) -> Vec<VisualizationData> {
    let mut out = Vec::new();

    if !topics.is_empty() {
        out.push(topic_bar_chart(topics));
        out.push(topic_wordcloud(topics));
    }
    if let Some(s) = sentiment {
        out.push(sentiment_pie(s));
    }
    let dates: Vec<&EntityResult> = entities
        .iter()
        .filter(|e| e.kind == EntityKind::Date)
        .collect();
    if !dates.is_empty() {
        out.push(date_timeline(&dates));
    }

    out
}

fn topic_bar_chart(topics: &[TopicResult]) -> VisualizationData {
    VisualizationData {
        kind: VisualizationKind::Chart,
        title: "Topic Frequency".to_string(),
        payload: serde_json::json!({
            "labels": topics.iter().map(|t| t.word.clone()).collect::<Vec<_>>(),
            "values": topics.iter().map(|t| t.frequency).collect::<Vec<_>>(),
        }),
        description: "Top topics ranked by how often they appear in the document.".to_string(),
    }
}

fn topic_wordcloud(topics: &[TopicResult]) -> VisualizationData {
    VisualizationData {
        kind: VisualizationKind::Wordcloud,
        title: "Topic Cloud".to_string(),
        payload: serde_json::json!({
            "words": topics
                .iter()
                .map(|t| serde_json::json!({"text": t.word, "weight": t.relevance}))
                .collect::<Vec<_>>(),
        }),
        description: "Topics weighted by relevance.".to_string(),
    }
}

fn sentiment_pie(sentiment: &SentimentResult) -> VisualizationData {
    VisualizationData {
        kind: VisualizationKind::Chart,
        title: "Sentiment Distribution".to_string(),
        payload: serde_json::json!({
            "labels": ["positive", "negative", "neutral"],
            "values": [sentiment.positive, sentiment.negative, sentiment.neutral],
        }),
        description: format!("Overall sentiment: {}.", sentiment.label.as_str()),
    }
}

fn date_timeline(dates: &[&EntityResult]) -> VisualizationData {
    VisualizationData {
        kind: VisualizationKind::Timeline,
        title: "Dates Mentioned".to_string(),
        payload: serde_json::json!({
            "events": dates
                .iter()
                .map(|e| serde_json::json!({"date": e.text, "context": e.context}))
                .collect::<Vec<_>>(),
        }),
        description: "Dates found in the document, in order of appearance.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::extract_entities;
    use crate::sentiment::analyze_sentiment;
    use crate::topics::extract_topics;

    #[test]
    fn all_signals_produce_all_chart_kinds() {
        let text = "Growth growth growth matters. Revenue rose 10% on 01/02/2024. Great outcome.";
        let topics = extract_topics(text);
        let entities = extract_entities(text);
        let sentiment = analyze_sentiment(text);
        let viz = build_visualizations(&topics, &entities, Some(&sentiment));

        assert!(viz.iter().any(|v| v.kind == VisualizationKind::Chart));
        assert!(viz.iter().any(|v| v.kind == VisualizationKind::Wordcloud));
        assert!(viz.iter().any(|v| v.kind == VisualizationKind::Timeline));
    }

    #[test]
    fn empty_signals_produce_nothing() {
        let viz = build_visualizations(&[], &[], None);
        assert!(viz.is_empty());
    }

    #[test]
    fn timeline_only_from_date_entities() {
        let entities = extract_entities("just 15% and $3.00 here");
        let viz = build_visualizations(&[], &entities, None);
        assert!(!viz.iter().any(|v| v.kind == VisualizationKind::Timeline));
    }
}
