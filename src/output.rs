//! Output types: per-topic summaries and the display schema.
//!
//! A [`Summary`] exists for a topic only when the topic had content worth
//! summarizing — skipped topics leave no trace. A topic whose inference
//! call failed still gets a `Summary` whose body is the error description:
//! failure is visible in the output, never silent.

use crate::topic::Topic;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One topical summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub topic: Topic,
    /// Fixed display title for the topic.
    pub title: String,
    /// Sanitized summary text, or a descriptive error string when the
    /// topic's inference call failed.
    pub body: String,
    /// Display priority: 0 is reserved for the overall summary, sections
    /// follow with strictly increasing values in processing order.
    pub priority: u32,
}

/// The ordered set of summaries for one statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarySet {
    pub summaries: Vec<Summary>,
}

impl SummarySet {
    /// Look up a topic's summary.
    pub fn get(&self, topic: Topic) -> Option<&Summary> {
        self.summaries.iter().find(|s| s.topic == topic)
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Render the display schema: a map from topic key to
    /// `{Section, Summary, Priority}`.
    pub fn to_display_map(&self) -> Value {
        let mut map = serde_json::Map::new();
        for s in &self.summaries {
            map.insert(
                s.topic.key().to_string(),
                json!({
                    "Section": s.title,
                    "Summary": s.body,
                    "Priority": s.priority,
                }),
            );
        }
        Value::Object(map)
    }
}

/// The single top-level error object produced on total failure.
pub fn error_object(message: &str) -> Value {
    json!({ "error": message })
}

/// Result of processing an uploaded byte stream: PDFs run the full
/// pipeline; plain-text files pass through verbatim.
#[derive(Debug, Clone)]
pub enum ProcessedOutput {
    Summaries(SummarySet),
    PlainText(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_map_shape() {
        let set = SummarySet {
            summaries: vec![
                Summary {
                    topic: Topic::Overall,
                    title: Topic::Overall.title().into(),
                    body: "All good.".into(),
                    priority: 0,
                },
                Summary {
                    topic: Topic::Fees,
                    title: Topic::Fees.title().into(),
                    body: "Fees were $5.".into(),
                    priority: 1,
                },
            ],
        };
        let map = set.to_display_map();
        assert_eq!(map["overall"]["Priority"], 0);
        assert_eq!(map["fees"]["Section"], "Fees & Charges");
        assert_eq!(map["fees"]["Summary"], "Fees were $5.");
    }

    #[test]
    fn error_object_shape() {
        let v = error_object("could not extract structured data: bad file");
        assert!(v["error"].as_str().unwrap().contains("bad file"));
        assert_eq!(v.as_object().unwrap().len(), 1);
    }
}
