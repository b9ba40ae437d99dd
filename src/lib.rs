//! # doclens
//!
//! A document-to-report analysis pipeline over hosted LLM providers.
//!
//! doclens takes a document (pdf, txt, md, docx, csv, json), sanitizes
//! its text, builds template-driven prompts, dispatches them to a hosted
//! AI provider (DeepSeek or Gemini), normalizes the responses into titled
//! report sections, and enriches the result with locally extracted
//! signals: entities, topics, sentiment, and readability.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌───────────┐
//! │ extract  │──▶│ sanitize │──▶│  prompt    │──▶│ provider  │
//! │ pdf/docx │   │          │   │  builder   │   │ dispatch  │
//! └──────────┘   └────┬─────┘   └───────────┘   └─────┬─────┘
//!                     │                               │
//!                     ▼                               ▼
//!               ┌───────────┐                  ┌───────────┐
//!               │  signal    │                  │ normalize  │
//!               │ extractors │                  │ responses  │
//!               └─────┬─────┘                  └─────┬─────┘
//!                     └──────────┬────────────────────┘
//!                                ▼
//!                        ┌──────────────┐
//!                        │ AnalysisResult│
//!                        └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! doclens templates                       # list analysis templates
//! doclens inspect report.md               # local signals only, no network
//! doclens analyze report.pdf --template business-report --provider deepseek
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`extract`] | Multi-format text extraction |
//! | [`sanitize`] | Control-character stripping and whitespace cleanup |
//! | [`templates`] | Built-in analysis template catalog |
//! | [`prompt`] | System/user prompt construction |
//! | [`provider`] | DeepSeek / Gemini HTTP backends |
//! | [`normalize`] | Provider response → report sections |
//! | [`entities`] | Regex entity extraction |
//! | [`topics`] | Frequency-based topic ranking |
//! | [`sentiment`] | Lexicon sentiment scoring |
//! | [`readability`] | Flesch Reading Ease estimate |
//! | [`progress`] | Stage progress reporting to stderr |
//! | [`viz`] | Chart payload derivation |
//! | [`analyze`] | Pipeline orchestration |
//! | [`export`] | Result JSON/text output |

pub mod analyze;
pub mod config;
pub mod entities;
pub mod export;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod prompt;
pub mod provider;
pub mod readability;
pub mod sanitize;
pub mod sentiment;
pub mod templates;
pub mod topics;
pub mod viz;
