//! Error types for the brokersum library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`StatementError`] — **Fatal**: the run cannot proceed at all (missing
//!   file, unreadable PDF, invalid configuration). Returned as
//!   `Err(StatementError)` from the top-level `summarize*` functions; the
//!   caller renders it as a single `{"error": ...}` object.
//!
//! * [`InferenceError`] — **Per-topic**: one section's model call failed
//!   (bad credentials, transient network fault, empty generation) but the
//!   other sections are fine. The orchestrator degrades it into that
//!   topic's summary text, preserving the error kind, and keeps going.
//!
//! The separation means a run either yields a (possibly partially
//! populated) summary set or a single top-level error — never a crash
//! halfway through.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the brokersum library.
///
/// Topic-level failures use [`InferenceError`] and are folded into summary
/// bodies rather than propagated here.
#[derive(Debug, Error)]
pub enum StatementError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("statement file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Byte input was neither a PDF nor valid UTF-8 text.
    #[error("unsupported input: not a PDF and not valid UTF-8 text")]
    UnsupportedInput,

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The extraction collaborator failed for the whole document.
    /// Segmentation is all-or-nothing: either every page was walked or
    /// this error surfaces.
    #[error("could not extract structured data: {detail}")]
    Extraction { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A per-topic inference failure. Contained by the orchestrator; it never
/// aborts processing of the remaining topics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// Model identifier missing or not in the supported model family.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service refused access to the model (401/403).
    #[error("access denied: {0}")]
    Authorization(String),

    /// Malformed request, or the model requires additional setup
    /// (e.g. an inference profile) before it can be invoked.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Network or service failure, including timeouts.
    #[error("inference service unavailable: {0}")]
    Transport(String),

    /// The service answered but produced no text.
    #[error("inference service returned no content")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_display_is_descriptive() {
        let e = StatementError::Extraction {
            detail: "corrupt xref table".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("could not extract"), "got: {msg}");
        assert!(msg.contains("corrupt xref table"));
    }

    #[test]
    fn inference_kinds_are_visible_in_display() {
        assert!(InferenceError::Authorization("model arn".into())
            .to_string()
            .contains("access denied"));
        assert!(InferenceError::Transport("timed out after 60s".into())
            .to_string()
            .contains("unavailable"));
        assert!(InferenceError::Empty.to_string().contains("no content"));
    }

    #[test]
    fn configuration_error_carries_detail() {
        let e = InferenceError::Configuration("BEDROCK_MODEL_ID not set".into());
        assert!(e.to_string().contains("BEDROCK_MODEL_ID"));
    }
}
