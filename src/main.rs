//! # doclens CLI
//!
//! Commands for listing templates, inspecting local signals, and running
//! full analyses against a hosted AI provider.
//!
//! ```bash
//! doclens --config ./doclens.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `doclens templates` | List the built-in analysis templates |
//! | `doclens inspect <file>` | Run the local signal extractors only (no network) |
//! | `doclens analyze <file>` | Run the full document-to-report pipeline |
//!
//! `analyze` needs an API key in `DEEPSEEK_API_KEY` or `GEMINI_API_KEY`
//! depending on the provider.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use doclens::analyze::{run_analysis, DocumentInput};
use doclens::config::load_config_or_default;
use doclens::export::{render_text_report, write_result_json};
use doclens::extract::{extract_text, file_type_for_path};
use doclens::models::{AnalysisConfig, Depth};
use doclens::progress::ProgressMode;
use doclens::provider::{create_client, Provider};
use doclens::sanitize::sanitize;
use doclens::templates::{TemplateCategory, TemplateRegistry};

/// doclens — a document-to-report analysis pipeline over hosted LLM
/// providers.
#[derive(Parser)]
#[command(
    name = "doclens",
    about = "Analyze documents into structured reports via hosted AI providers",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Optional; defaults apply when
    /// the file does not exist.
    #[arg(long, global = true, default_value = "./doclens.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in analysis templates.
    Templates {
        /// Filter by category (business, academic, legal, technical,
        /// financial, general).
        #[arg(long)]
        category: Option<String>,
    },

    /// Run the local signal extractors over a document. No network calls.
    Inspect {
        /// Document path (pdf, txt, md, docx, csv, json).
        file: PathBuf,

        /// Emit JSON instead of the text summary.
        #[arg(long)]
        json: bool,
    },

    /// Run the full analysis pipeline over a document.
    Analyze {
        /// Document path (pdf, txt, md, docx, csv, json).
        file: PathBuf,

        /// Template id (see `doclens templates`). Unknown ids fall back
        /// to the catalog's first template.
        #[arg(long)]
        template: Option<String>,

        /// Analysis depth: quick, standard, comprehensive, expert.
        #[arg(long)]
        depth: Option<String>,

        /// Focus area; repeat for several.
        #[arg(long = "focus")]
        focus: Vec<String>,

        /// Topic to exclude; repeat for several.
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Output language code (e.g. "en").
        #[arg(long)]
        language: Option<String>,

        /// Provider backend: deepseek or gemini.
        #[arg(long)]
        provider: Option<String>,

        /// Derive chart payloads from the extracted signals.
        #[arg(long)]
        visualize: bool,

        /// Write the full result JSON here instead of printing a report.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Progress output: off, human, json. Defaults to human on a TTY.
        #[arg(long)]
        progress: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config_or_default(&cli.config)?;
    let registry = TemplateRegistry::builtin();

    match cli.command {
        Commands::Templates { category } => {
            let templates: Vec<&doclens::templates::Template> = match category.as_deref() {
                Some(name) => match TemplateCategory::parse(name) {
                    Some(cat) => registry.by_category(cat),
                    None => bail!("Unknown category: '{}'", name),
                },
                None => registry.all().iter().collect(),
            };
            for t in templates {
                println!(
                    "{:<22} {:<28} {:<10} ~{}s",
                    t.id,
                    t.name,
                    t.category.as_str(),
                    t.estimated_secs
                );
            }
        }
        Commands::Inspect { file, json } => {
            let document = load_document(&file)?;
            let clean = sanitize(&document.text);
            if clean.is_empty() {
                bail!("document contains no analyzable text after sanitization");
            }

            let entities = doclens::entities::extract_entities(&clean);
            let topics = doclens::topics::extract_topics(&clean);
            let sentiment = doclens::sentiment::analyze_sentiment(&clean);
            let readability = doclens::readability::readability_score(&clean);

            if json {
                let obj = serde_json::json!({
                    "title": document.title,
                    "word_count": clean.split_whitespace().count(),
                    "entities": entities,
                    "topics": topics,
                    "sentiment": sentiment,
                    "readability": readability,
                });
                println!("{}", serde_json::to_string_pretty(&obj)?);
            } else {
                println!("inspect {}", document.title);
                println!("  words: {}", clean.split_whitespace().count());
                println!(
                    "  sentiment: {} (pos {:.2} / neg {:.2})",
                    sentiment.label.as_str(),
                    sentiment.positive,
                    sentiment.negative
                );
                println!("  readability: {:.1}", readability);
                let words: Vec<String> = topics
                    .iter()
                    .map(|t| format!("{} ({})", t.word, t.frequency))
                    .collect();
                println!("  topics: {}", words.join(", "));
                for e in &entities {
                    println!("  entity: {} [{}]", e.text, e.kind.as_str());
                }
            }
        }
        Commands::Analyze {
            file,
            template,
            depth,
            focus,
            exclude,
            language,
            provider,
            visualize,
            output,
            progress,
        } => {
            let document = load_document(&file)?;

            let template_id =
                template.unwrap_or_else(|| cfg.analysis.default_template.clone());
            let mut analysis = AnalysisConfig::new(&template_id);
            analysis.depth = Depth::parse_or_default(
                depth.as_deref().unwrap_or(&cfg.analysis.default_depth),
            );
            analysis.focus = focus;
            analysis.exclude_topics = exclude;
            analysis.output_language =
                language.unwrap_or_else(|| cfg.analysis.default_language.clone());
            analysis.include_visualization = visualize;

            let provider_name = provider.unwrap_or_else(|| cfg.provider.name.clone());
            let provider = match Provider::parse(&provider_name) {
                Some(p) => p,
                None => bail!(
                    "Unknown provider: '{}'. Must be deepseek or gemini.",
                    provider_name
                ),
            };
            let client = create_client(provider, &cfg.provider)?;

            let mode = match progress.as_deref() {
                Some(name) => match ProgressMode::parse(name) {
                    Some(m) => m,
                    None => bail!("Unknown progress mode: '{}'", name),
                },
                None => ProgressMode::default_for_tty(),
            };
            let reporter = mode.reporter();

            let result = run_analysis(
                &registry,
                &analysis,
                &document,
                client.as_ref(),
                reporter.as_ref(),
            )
            .await?;

            match output {
                Some(path) => {
                    write_result_json(&result, &path)?;
                    println!("wrote {}", path.display());
                }
                None => print!("{}", render_text_report(&result)),
            }
        }
    }

    Ok(())
}

/// Read a document file, extract its text per file type, and build the
/// orchestrator input.
fn load_document(path: &PathBuf) -> Result<DocumentInput> {
    let file_type = file_type_for_path(path)?;
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    let text = extract_text(&bytes, file_type)?;
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled Document")
        .to_string();
    Ok(DocumentInput {
        title,
        file_type,
        size_bytes: bytes.len() as u64,
        text,
    })
}
