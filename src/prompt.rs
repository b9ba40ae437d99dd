//! Prompt construction.
//!
//! Combines a template's prompt fields, the caller's [`AnalysisConfig`],
//! and the sanitized document body into one `(system, user)` pair per
//! field. Pairs come back as an ordered `Vec` matching the template's
//! declared field order — section ordering in the final report depends on
//! this, so it is never routed through a map.

use crate::models::AnalysisConfig;
use crate::templates::Template;

/// One system+user prompt pair for a single template field.
#[derive(Debug, Clone)]
pub struct PromptPair {
    pub field_key: String,
    pub field_title: String,
    pub system: String,
    pub user: String,
}

/// Build the system prompt shared by every field of one analysis run.
///
/// Deterministic from the configuration: category, depth, focus list,
/// output format, language, and exclusions (when present) in a fixed
/// clause order.
pub fn build_system_prompt(template: &Template, config: &AnalysisConfig) -> String {
    let mut prompt = format!(
        "You are an expert {} document analyst. Perform a {} analysis of the provided document.",
        template.category.as_str(),
        config.depth.as_str(),
    );

    if !config.focus.is_empty() {
        prompt.push_str(&format!(" Focus on: {}.", config.focus.join(", ")));
    }

    prompt.push_str(&format!(
        " Respond in {} as {}.",
        config.output_language, template.output_format,
    ));

    if !config.exclude_topics.is_empty() {
        prompt.push_str(&format!(
            " Do not cover the following topics: {}.",
            config.exclude_topics.join(", ")
        ));
    }

    prompt
}

/// Build one prompt pair per template field, in template field order.
pub fn build_prompts(
    template: &Template,
    config: &AnalysisConfig,
    document: &str,
) -> Vec<PromptPair> {
    let system = build_system_prompt(template, config);

    template
        .fields
        .iter()
        .map(|f| PromptPair {
            field_key: f.key.to_string(),
            field_title: f.title.to_string(),
            system: system.clone(),
            user: format!("{}\n\nDOCUMENT:\n{}", f.instruction, document),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Depth;
    use crate::templates::TemplateRegistry;

    fn config() -> AnalysisConfig {
        let mut c = AnalysisConfig::new("business-report");
        c.depth = Depth::Comprehensive;
        c.focus = vec!["revenue".to_string(), "growth".to_string()];
        c.output_language = "en".to_string();
        c
    }

    #[test]
    fn system_prompt_is_deterministic() {
        let reg = TemplateRegistry::builtin();
        let t = reg.get("business-report").unwrap();
        let cfg = config();
        let a = build_system_prompt(t, &cfg);
        let b = build_system_prompt(t, &cfg);
        assert_eq!(a, b);
        assert!(a.contains("business"));
        assert!(a.contains("comprehensive"));
        assert!(a.contains("revenue, growth"));
    }

    #[test]
    fn exclusions_appear_only_when_present() {
        let reg = TemplateRegistry::builtin();
        let t = reg.get("business-report").unwrap();
        let mut cfg = config();
        let without = build_system_prompt(t, &cfg);
        assert!(!without.contains("Do not cover"));

        cfg.exclude_topics = vec!["politics".to_string(), "hr".to_string()];
        let with = build_system_prompt(t, &cfg);
        assert!(with.contains("Do not cover the following topics: politics, hr."));
    }

    #[test]
    fn pairs_follow_template_field_order() {
        let reg = TemplateRegistry::builtin();
        let t = reg.get("financial-statement").unwrap();
        let pairs = build_prompts(t, &config(), "body text");
        let keys: Vec<&str> = pairs.iter().map(|p| p.field_key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["summary", "insights", "recommendations", "technical", "outlook"]
        );
    }

    #[test]
    fn user_prompt_carries_instruction_and_body() {
        let reg = TemplateRegistry::builtin();
        let t = reg.get("general-summary").unwrap();
        let pairs = build_prompts(t, &config(), "the document body");
        assert!(pairs[0].user.contains("Summarize this document"));
        assert!(pairs[0].user.contains("DOCUMENT:\nthe document body"));
    }
}
