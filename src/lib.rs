//! # brokersum
//!
//! Summarize brokerage statements into per-topic plain-text digests using
//! a remote language model.
//!
//! ## Why this crate?
//!
//! A brokerage statement is a dense, table-heavy PDF. Reading one means
//! hunting across pages for dividends, trades, positions, and fees. This
//! crate segments the statement's text into a small fixed set of topics,
//! asks an inference service for a short digest of each, and cleans the
//! responses into consistent display text — with each topic isolated so
//! one failed call never costs you the rest of the statement.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract   per-page text/tables (blocking, spawn_blocking)
//!  ├─ 2. Normalize idempotent cleanup of extraction artifacts
//!  ├─ 3. Classify  sticky running-topic line FSM + table headers
//!  ├─ 4. Prompt    per-topic instruction + bounded content
//!  ├─ 5. Infer     Llama-envelope call to bedrock-runtime, sequential
//!  ├─ 6. Sanitize  strip lead-ins/markdown, fix number spacing
//!  └─ 7. Output    ordered SummarySet, overall first at priority 0
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brokersum::{summarize, SummarizeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Model resolved from BEDROCK_MODEL_ID; region from AWS_BEDROCK_REGION
//!     let config = SummarizeConfig::default();
//!     let summaries = summarize("statement.pdf", &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&summaries.to_display_map())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! A run yields either a complete-or-partial summary set (skipped topics
//! silently absent, failed topics carrying an inline error string) or a
//! single fatal [`StatementError`] — never a partial crash. See
//! [`error`] for the split.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `brokersum` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod summarize;
pub mod topic;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SummarizeConfig, SummarizeConfigBuilder};
pub use document::{Bucket, RawPage, SegmentedDocument, Table};
pub use error::{InferenceError, StatementError};
pub use output::{error_object, ProcessedOutput, Summary, SummarySet};
pub use pipeline::extract::{PageExtractor, PdfTextExtractor};
pub use pipeline::inference::{BedrockClient, InferenceProvider};
pub use pipeline::segment::{extract_and_segment, segment_pages};
pub use summarize::{summarize, summarize_bytes, summarize_document, summarize_with_extractor};
pub use topic::{Topic, SECTION_ORDER};
