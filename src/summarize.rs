//! Top-level entry points and the summary orchestrator.
//!
//! ## Failure containment
//!
//! The orchestrator walks topics strictly sequentially (one inference call
//! in flight at a time) and treats each topic as its own failure domain:
//! a topic with too little content is skipped silently, and a topic whose
//! inference call fails gets a summary body describing the failure — the
//! run continues either way. Only extraction failure is fatal, because
//! without a segmented document there is nothing to iterate.

use crate::config::SummarizeConfig;
use crate::document::SegmentedDocument;
use crate::error::{InferenceError, StatementError};
use crate::output::{ProcessedOutput, Summary, SummarySet};
use crate::pipeline::extract::{PageExtractor, PdfTextExtractor};
use crate::pipeline::inference::{BedrockClient, InferenceProvider};
use crate::pipeline::prompt::{build_bucket_prompt, build_prompt};
use crate::pipeline::sanitize::sanitize;
use crate::pipeline::segment::extract_and_segment;
use crate::pipeline::inference;
use crate::prompts::SYSTEM_PROMPT;
use crate::topic::{Topic, SECTION_ORDER};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Summarize a statement PDF on disk.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(StatementError)` only for fatal, document-level failures
/// (missing file, extraction failure, broken runtime plumbing). Per-topic
/// inference failures are reported inside the returned [`SummarySet`].
pub async fn summarize(
    path: impl AsRef<Path>,
    config: &SummarizeConfig,
) -> Result<SummarySet, StatementError> {
    let path = path.as_ref().to_path_buf();
    info!("summarizing statement: {}", path.display());

    // Extraction is CPU-bound and blocking; keep it off the async runtime,
    // and keep the sticky-topic walk strictly sequential within it.
    let doc = tokio::task::spawn_blocking(move || {
        extract_and_segment(&PdfTextExtractor, &path)
    })
    .await
    .map_err(|e| StatementError::Internal(format!("extraction task panicked: {e}")))??;

    let provider = resolve_provider(config);
    Ok(summarize_document(&doc, provider.as_ref(), config).await)
}

/// Summarize a statement supplied as raw bytes.
///
/// Sniffs the payload: `%PDF` magic runs the full pipeline through a
/// scoped temporary file (removed on every exit path, including panics);
/// anything that decodes as UTF-8 is treated as a plain-text upload and
/// returned verbatim.
pub async fn summarize_bytes(
    bytes: &[u8],
    config: &SummarizeConfig,
) -> Result<ProcessedOutput, StatementError> {
    if bytes.starts_with(b"%PDF") {
        let mut tmp = tempfile::NamedTempFile::new()
            .map_err(|e| StatementError::Internal(format!("tempfile: {e}")))?;
        tmp.write_all(bytes)
            .map_err(|e| StatementError::Internal(format!("tempfile write: {e}")))?;
        // `tmp` lives until summarize returns, then the file is deleted.
        let set = summarize(tmp.path(), config).await?;
        return Ok(ProcessedOutput::Summaries(set));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(ProcessedOutput::PlainText(text.to_string())),
        Err(_) => Err(StatementError::UnsupportedInput),
    }
}

/// Run the orchestrator over an already-segmented document.
///
/// Public so callers (and tests) can drive the summary stage with their
/// own extraction results and provider implementations.
pub async fn summarize_document(
    doc: &SegmentedDocument,
    provider: &dyn InferenceProvider,
    config: &SummarizeConfig,
) -> SummarySet {
    let mut set = SummarySet::default();

    // Overall first, always at priority 0, and only when there is enough
    // document text to say anything meaningful about the whole statement.
    if doc.full_text.trim().chars().count() > config.min_overall_chars {
        if let Some(prompt) = build_prompt(Topic::Overall, &doc.full_text, config) {
            set.summaries
                .push(run_topic(Topic::Overall, &prompt, provider, config, 0).await);
        }
    }

    let mut priority = 1u32;
    for topic in SECTION_ORDER {
        let Some(bucket) = doc.bucket(topic) else {
            continue;
        };
        let Some(prompt) = build_bucket_prompt(topic, &bucket, config) else {
            debug!("skipping {topic}: content below threshold");
            continue;
        };
        set.summaries
            .push(run_topic(topic, &prompt, provider, config, priority).await);
        priority += 1;
    }

    info!("produced {} summaries", set.len());
    set
}

/// Invoke, trim, and sanitize one topic. Failures are folded into the
/// summary body here — this is the only place a typed [`InferenceError`]
/// is degraded into display text, and the kind survives in the message.
async fn run_topic(
    topic: Topic,
    prompt: &str,
    provider: &dyn InferenceProvider,
    config: &SummarizeConfig,
    priority: u32,
) -> Summary {
    let system = config.system_prompt.as_deref().unwrap_or(SYSTEM_PROMPT);

    let body = match provider.generate(prompt, system).await {
        Ok(text) => {
            let trimmed = inference::trim_to_sentence(
                &text,
                config.trim_threshold_chars,
                config.trim_search_fraction,
            );
            sanitize(&trimmed)
        }
        Err(e) => {
            warn!("summary failed for {topic}: {e}");
            format!("Error generating summary for {}: {e}", topic.title())
        }
    };

    Summary {
        topic,
        title: topic.title().to_string(),
        body,
        priority,
    }
}

/// Summarize with a caller-supplied extractor (table-aware backends, test
/// doubles). Extraction failure is fatal, as in [`summarize`].
pub async fn summarize_with_extractor(
    extractor: &dyn PageExtractor,
    path: &Path,
    config: &SummarizeConfig,
) -> Result<SummarySet, StatementError> {
    let doc = extract_and_segment(extractor, path)?;
    let provider = resolve_provider(config);
    Ok(summarize_document(&doc, provider.as_ref(), config).await)
}

/// Resolve the inference provider: a pre-built one from config wins;
/// otherwise construct the production client. Construction errors become a
/// provider that fails every call with the configuration error, so they
/// surface per-topic exactly like any other inference failure.
fn resolve_provider(config: &SummarizeConfig) -> Arc<dyn InferenceProvider> {
    if let Some(provider) = &config.provider {
        return Arc::clone(provider);
    }
    match BedrockClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(e) => Arc::new(Misconfigured(e)),
    }
}

/// Provider stand-in for a client that could not be constructed; every
/// call reports the original configuration error.
struct Misconfigured(InferenceError);

#[async_trait::async_trait]
impl InferenceProvider for Misconfigured {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, InferenceError> {
        Err(self.0.clone())
    }
}
