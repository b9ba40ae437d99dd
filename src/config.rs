use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub analysis: AnalysisDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// `"deepseek"` or `"gemini"`.
    #[serde(default = "default_provider")]
    pub name: String,
    /// Override the provider's default model.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after the first on 429/5xx/network errors.
    /// 0 = single attempt (fail fast).
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Environment variable holding the API key. Defaults to
    /// `DEEPSEEK_API_KEY` / `GEMINI_API_KEY` per provider.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "deepseek".to_string(),
            model: None,
            timeout_secs: 60,
            max_retries: 0,
            max_output_tokens: 2000,
            api_key_env: None,
        }
    }
}

fn default_provider() -> String {
    "deepseek".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_max_output_tokens() -> u32 {
    2000
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisDefaults {
    #[serde(default = "default_template")]
    pub default_template: String,
    #[serde(default = "default_depth")]
    pub default_depth: String,
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            default_depth: default_depth(),
            default_language: default_language(),
        }
    }
}

fn default_template() -> String {
    "general-summary".to_string()
}
fn default_depth() -> String {
    "standard".to_string()
}
fn default_language() -> String {
    "en".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

/// Load the config file if it exists; otherwise use defaults. Used by the
/// CLI so `doclens` runs without a config file present.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

fn validate(config: &Config) -> Result<()> {
    match config.provider.name.as_str() {
        "deepseek" | "gemini" => {}
        other => anyhow::bail!(
            "Unknown provider: '{}'. Must be deepseek or gemini.",
            other
        ),
    }

    if config.provider.timeout_secs == 0 {
        anyhow::bail!("provider.timeout_secs must be > 0");
    }

    if config.provider.max_output_tokens == 0 {
        anyhow::bail!("provider.max_output_tokens must be > 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
        assert_eq!(config.provider.name, "deepseek");
        assert_eq!(config.provider.max_retries, 0);
    }

    #[test]
    fn unknown_provider_rejected() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            name = "openai"
            "#,
        )
        .unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            timeout_secs = 0
            "#,
        )
        .unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [analysis]
            default_template = "legal-document"
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.default_template, "legal-document");
        assert_eq!(config.provider.timeout_secs, 60);
    }
}
