//! Pipeline stages for statement summarization.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a richer extraction backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──▶ classify ──▶ segment ─┬▶ prompt ──▶ inference ──▶ sanitize
//! (pages)     (cleanup)     (topic FSM)  (buckets) │  (per topic, sequential)
//!                                                  └▶ full_text (overall topic)
//! ```
//!
//! 1. [`extract`]   — pull per-page text and tables from the document; the
//!    only blocking stage, run under `spawn_blocking`
//! 2. [`normalize`] — idempotent cleanup of extraction artifacts
//! 3. [`classify`]  — assign lines (sticky state machine) and tables
//!    (header keywords) to topics
//! 4. [`segment`]   — accumulate per-topic buckets and the full text
//! 5. [`prompt`]    — serialize a bucket into a bounded instruction prompt,
//!    or skip the topic when there is too little content
//! 6. [`inference`] — drive the remote generation call; the only stage with
//!    network I/O
//! 7. [`sanitize`]  — idempotent cleanup of model-output quirks (markdown
//!    artifacts, lead-ins, spacing around numbers)

pub mod classify;
pub mod extract;
pub mod inference;
pub mod normalize;
pub mod prompt;
pub mod sanitize;
pub mod segment;
