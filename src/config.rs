//! Configuration for statement summarization.
//!
//! All behaviour is controlled through [`SummarizeConfig`], built via its
//! [`SummarizeConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across calls and to diff two runs to understand
//! why their outputs differ.
//!
//! The character thresholds (skip, truncation, sentence-trim) are plain
//! fields rather than constants: the defaults are sensible for typical
//! statements but they are tuning knobs, not protocol.

use crate::error::StatementError;
use crate::pipeline::inference::InferenceProvider;
use std::fmt;
use std::sync::Arc;

/// Configuration for a summarization run.
///
/// Built via [`SummarizeConfig::builder()`] or using
/// [`SummarizeConfig::default()`].
///
/// # Example
/// ```rust
/// use brokersum::SummarizeConfig;
///
/// let config = SummarizeConfig::builder()
///     .model_id("meta.llama3-70b-instruct-v1:0")
///     .region("us-east-1")
///     .api_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SummarizeConfig {
    /// Inference model identifier or ARN. If `None`, read from
    /// `BEDROCK_MODEL_ID` at client construction; missing both ways is a
    /// per-topic `Configuration` error, not a fatal one.
    pub model_id: Option<String>,

    /// Service region. If `None`, read from `AWS_BEDROCK_REGION`, then
    /// `AWS_DEFAULT_REGION`, then `us-east-1`.
    pub region: Option<String>,

    /// Pre-constructed inference provider. Takes precedence over
    /// `model_id`/`region`; this is the seam for test doubles.
    pub provider: Option<Arc<dyn InferenceProvider>>,

    /// Sampling temperature. Default: 0.3.
    ///
    /// Low enough that the model stays faithful to the statement numbers,
    /// high enough that the prose does not collapse into bullet fragments.
    pub temperature: f32,

    /// Nucleus-sampling cutoff. Default: 0.9.
    pub top_p: f32,

    /// Maximum tokens the model may generate per section. Default: 300.
    ///
    /// A topical digest should fit in a short paragraph; anything longer is
    /// the model padding. Responses cut off mid-sentence by this cap are
    /// repaired by the sentence-trim pass in the inference client.
    pub max_gen_len: usize,

    /// Per-call timeout in seconds. Default: 60. A timeout surfaces as a
    /// `Transport`-kind [`crate::InferenceError`], isolated to its topic.
    pub api_timeout_secs: u64,

    /// Minimum stripped content length for a section to be summarized at
    /// all. Default: 20. Below this the topic is silently skipped.
    pub min_section_chars: usize,

    /// Minimum stripped full-text length before the overall summary is
    /// attempted. Default: 100.
    pub min_overall_chars: usize,

    /// Maximum prompt content length in characters. Default: 4000.
    /// Longer content is truncated with a visible marker.
    pub max_prompt_chars: usize,

    /// Responses longer than this that do not end in terminal punctuation
    /// get sentence-boundary trimming. Default: 500.
    pub trim_threshold_chars: usize,

    /// Fraction of the response length behind which a sentence boundary is
    /// searched for during trimming. Default: 0.7.
    pub trim_search_fraction: f32,

    /// Custom system prompt. If `None`, uses the built-in financial-analyst
    /// prompt from [`crate::prompts`].
    pub system_prompt: Option<String>,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            model_id: None,
            region: None,
            provider: None,
            temperature: 0.3,
            top_p: 0.9,
            max_gen_len: 300,
            api_timeout_secs: 60,
            min_section_chars: 20,
            min_overall_chars: 100,
            max_prompt_chars: 4000,
            trim_threshold_chars: 500,
            trim_search_fraction: 0.7,
            system_prompt: None,
        }
    }
}

impl fmt::Debug for SummarizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizeConfig")
            .field("model_id", &self.model_id)
            .field("region", &self.region)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn InferenceProvider>"))
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_gen_len", &self.max_gen_len)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("min_section_chars", &self.min_section_chars)
            .field("min_overall_chars", &self.min_overall_chars)
            .field("max_prompt_chars", &self.max_prompt_chars)
            .finish()
    }
}

impl SummarizeConfig {
    /// Create a new builder for `SummarizeConfig`.
    pub fn builder() -> SummarizeConfigBuilder {
        SummarizeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SummarizeConfig`].
#[derive(Debug)]
pub struct SummarizeConfigBuilder {
    config: SummarizeConfig,
}

impl SummarizeConfigBuilder {
    pub fn model_id(mut self, id: impl Into<String>) -> Self {
        self.config.model_id = Some(id.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn InferenceProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 1.0);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn max_gen_len(mut self, n: usize) -> Self {
        self.config.max_gen_len = n.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn min_section_chars(mut self, n: usize) -> Self {
        self.config.min_section_chars = n;
        self
    }

    pub fn min_overall_chars(mut self, n: usize) -> Self {
        self.config.min_overall_chars = n;
        self
    }

    pub fn max_prompt_chars(mut self, n: usize) -> Self {
        self.config.max_prompt_chars = n;
        self
    }

    pub fn trim_threshold_chars(mut self, n: usize) -> Self {
        self.config.trim_threshold_chars = n;
        self
    }

    pub fn trim_search_fraction(mut self, f: f32) -> Self {
        self.config.trim_search_fraction = f.clamp(0.0, 1.0);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummarizeConfig, StatementError> {
        let c = &self.config;
        if c.max_prompt_chars == 0 {
            return Err(StatementError::InvalidConfig(
                "max_prompt_chars must be ≥ 1".into(),
            ));
        }
        if c.min_section_chars > c.max_prompt_chars {
            return Err(StatementError::InvalidConfig(format!(
                "min_section_chars ({}) exceeds max_prompt_chars ({})",
                c.min_section_chars, c.max_prompt_chars
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let c = SummarizeConfig::default();
        assert_eq!(c.temperature, 0.3);
        assert_eq!(c.top_p, 0.9);
        assert_eq!(c.max_gen_len, 300);
        assert_eq!(c.min_section_chars, 20);
        assert_eq!(c.min_overall_chars, 100);
        assert_eq!(c.max_prompt_chars, 4000);
        assert_eq!(c.trim_threshold_chars, 500);
        assert!((c.trim_search_fraction - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn builder_clamps_sampling_params() {
        let c = SummarizeConfig::builder()
            .temperature(5.0)
            .top_p(-1.0)
            .build()
            .unwrap();
        assert_eq!(c.temperature, 1.0);
        assert_eq!(c.top_p, 0.0);
    }

    #[test]
    fn builder_rejects_inverted_thresholds() {
        let err = SummarizeConfig::builder()
            .min_section_chars(100)
            .max_prompt_chars(50)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("min_section_chars"));
    }
}
