//! Inference client: wrap a prompt into the model envelope, invoke the
//! remote service, and classify failures.
//!
//! The network boundary is the [`InferenceProvider`] trait so the
//! orchestrator can be driven by test doubles; [`BedrockClient`] is the
//! production implementation, targeting Llama-family models on the
//! bedrock-runtime HTTP API.
//!
//! ## Response trimming
//!
//! `max_gen_len` cuts generations mid-sentence. When a response does not
//! end in terminal punctuation and is long enough that dropping a trailing
//! fragment loses little, [`trim_to_sentence`] cuts at the last sentence
//! boundary found in the final stretch of the text. This is a heuristic
//! patch for output truncation, not a sentence-boundary detector; the
//! thresholds live in [`SummarizeConfig`], not here.

use crate::config::SummarizeConfig;
use crate::error::InferenceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// The remote text-generation boundary.
///
/// `generate` returns the raw model text on success; every failure mode is
/// an [`InferenceError`] kind so the orchestrator can degrade it into
/// display text without losing the cause.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, InferenceError>;
}

/// Format the Llama 3 role-delimited envelope.
///
/// The segment order is fixed by the model's chat template: optional
/// system instructions, user content, then the assistant continuation
/// marker the model completes from.
pub fn format_llama_prompt(prompt: &str, system: &str) -> String {
    if system.is_empty() {
        format!(
            "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n{prompt}<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>"
        )
    } else {
        format!(
            "<|begin_of_text|><|start_header_id|>system<|end_header_id|>\n{system}<|eot_id|>\
             <|start_header_id|>user<|end_header_id|>\n{prompt}<|eot_id|>\
             <|start_header_id|>assistant<|end_header_id|>"
        )
    }
}

/// Request body for the invoke endpoint.
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    prompt: &'a str,
    max_gen_len: usize,
    temperature: f32,
    top_p: f32,
}

/// Response body: the generated-text field is all we consume.
#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    generation: String,
}

/// Best-effort sentence-boundary trimming of a truncated generation.
///
/// If `text` already ends in `.`, `!` or `?` it is returned unchanged.
/// Otherwise, when it exceeds `threshold_chars`, the last terminal
/// punctuation mark at or after `search_fraction` of its length is found
/// and everything after it dropped. Short texts and texts with no boundary
/// in that window are kept whole rather than discarded.
pub fn trim_to_sentence(text: &str, threshold_chars: usize, search_fraction: f32) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.ends_with(['.', '!', '?']) {
        return trimmed.to_string();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= threshold_chars {
        return trimmed.to_string();
    }

    let floor = (chars.len() as f32 * search_fraction) as usize;
    for i in (floor..chars.len()).rev() {
        if matches!(chars[i], '.' | '!' | '?') {
            return chars[..=i].iter().collect();
        }
    }
    trimmed.to_string()
}

/// Production inference client for Llama models on bedrock-runtime.
///
/// Construction validates configuration eagerly: a missing or
/// wrong-family model id is a `Configuration` error before any request is
/// sent. Credentials are a bearer token read from
/// `AWS_BEARER_TOKEN_BEDROCK`; provisioning that token is the caller's
/// concern.
#[derive(Debug)]
pub struct BedrockClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
    model_id: String,
    max_gen_len: usize,
    temperature: f32,
    top_p: f32,
}

impl BedrockClient {
    /// Build a client from config, falling back to the environment for the
    /// model id and region.
    pub fn new(config: &SummarizeConfig) -> Result<Self, InferenceError> {
        let model_id = config
            .model_id
            .clone()
            .or_else(|| std::env::var("BEDROCK_MODEL_ID").ok().filter(|s| !s.is_empty()))
            .ok_or_else(|| {
                InferenceError::Configuration(
                    "model identifier missing: set SummarizeConfig::model_id or BEDROCK_MODEL_ID"
                        .into(),
                )
            })?;

        if !model_id.to_lowercase().contains("llama") {
            return Err(InferenceError::Configuration(format!(
                "expected a Llama-family model, got '{model_id}'"
            )));
        }

        let region = config
            .region
            .clone()
            .or_else(|| std::env::var("AWS_BEDROCK_REGION").ok().filter(|s| !s.is_empty()))
            .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "us-east-1".to_string());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        // Model ARNs contain ':' and '/' which must not be read as path
        // separators by the service router.
        let encoded_id = model_id.replace(':', "%3A").replace('/', "%2F");
        let endpoint =
            format!("https://bedrock-runtime.{region}.amazonaws.com/model/{encoded_id}/invoke");

        Ok(Self {
            http,
            endpoint,
            bearer_token: std::env::var("AWS_BEARER_TOKEN_BEDROCK")
                .ok()
                .filter(|s| !s.is_empty()),
            model_id,
            max_gen_len: config.max_gen_len,
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }

    fn classify_status(&self, status: reqwest::StatusCode, body: &str) -> InferenceError {
        match status.as_u16() {
            401 | 403 => InferenceError::Authorization(format!(
                "access denied to model '{}': check model access permissions",
                self.model_id
            )),
            400 if body.contains("inference profile") => InferenceError::Validation(format!(
                "model '{}' requires inference profile setup; use the inference profile ARN",
                self.model_id
            )),
            400..=499 => InferenceError::Validation(format!("HTTP {status}: {body}")),
            _ => InferenceError::Transport(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl InferenceProvider for BedrockClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, InferenceError> {
        let body = InvokeRequest {
            prompt: &format_llama_prompt(prompt, system),
            max_gen_len: self.max_gen_len,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Transport("request timed out".into())
            } else {
                InferenceError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = self.classify_status(status, &text);
            warn!("inference call failed: {err}");
            return Err(err);
        }

        let parsed: InvokeResponse = serde_json::from_str(&text)
            .map_err(|e| InferenceError::Transport(format!("malformed response: {e}")))?;

        let generation = parsed.generation.trim();
        if generation.is_empty() {
            return Err(InferenceError::Empty);
        }

        debug!("generated {} chars", generation.len());
        Ok(generation.to_string())
    }
}
