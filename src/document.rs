//! Document data model: raw extracted pages and the segmented result.
//!
//! [`RawPage`] is what the extraction collaborator hands us — per-page text
//! plus whatever tables it recovered, cells possibly missing. Everything
//! downstream of segmentation works on [`SegmentedDocument`], which is
//! built once per document and never mutated afterwards.

use crate::topic::Topic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A table recovered from one page.
///
/// Cells are `Option<String>` because extractors report merged or empty
/// cells as nulls; they are only flattened to empty strings at the point of
/// header matching and prompt rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Build a table from plain string cells (handy in tests and simple
    /// extractors that never produce nulls).
    pub fn from_strings(rows: Vec<Vec<&str>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(|c| Some(c.to_string())).collect())
                .collect(),
        }
    }

    /// Header row cells, lowercased, with null cells as empty strings.
    pub fn header_lower(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| {
                row.iter()
                    .map(|c| c.as_deref().unwrap_or("").to_lowercase())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Render the table as tab-separated rows joined by newlines, null
    /// cells as empty strings.
    pub fn to_tsv(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One page as produced by the extraction collaborator. Read-only downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPage {
    /// Raw page text, pre-normalization.
    pub text: String,
    /// Tables recovered from the page, in page order.
    pub tables: Vec<Table>,
}

/// Content accumulated for one topic: either text lines or tables, never a
/// mix of both under one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    Lines(Vec<String>),
    Tables(Vec<Table>),
}

impl Bucket {
    pub fn is_empty(&self) -> bool {
        match self {
            Bucket::Lines(lines) => lines.is_empty(),
            Bucket::Tables(tables) => tables.is_empty(),
        }
    }
}

/// The segmented statement: per-topic buckets plus the full concatenated
/// page text used only for the overall summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentedDocument {
    /// Line buckets, keyed by topic. `BTreeMap` keeps iteration in the
    /// fixed topic order.
    pub lines: BTreeMap<Topic, Vec<String>>,
    /// Table buckets, kept separate from line buckets.
    pub tables: BTreeMap<Topic, Vec<Table>>,
    /// All cleaned page text, concatenated in page order.
    pub full_text: String,
}

impl SegmentedDocument {
    /// The bucket for a topic, if the topic accumulated any content.
    /// Tables win over lines when both exist for a topic, matching how the
    /// table sections of a statement carry the authoritative numbers.
    pub fn bucket(&self, topic: Topic) -> Option<Bucket> {
        if let Some(tables) = self.tables.get(&topic) {
            if !tables.is_empty() {
                return Some(Bucket::Tables(tables.clone()));
            }
        }
        match self.lines.get(&topic) {
            Some(lines) if !lines.is_empty() => Some(Bucket::Lines(lines.clone())),
            _ => None,
        }
    }

    /// True when no bucket holds content and the full text is empty.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
            && self.lines.values().all(|l| l.is_empty())
            && self.tables.values().all(|t| t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_header_treats_null_cells_as_empty() {
        let t = Table::new(vec![vec![Some("Symbol".into()), None, Some("Qty".into())]]);
        assert_eq!(t.header_lower(), vec!["symbol", "", "qty"]);
    }

    #[test]
    fn table_tsv_rendering() {
        let t = Table::new(vec![
            vec![Some("A".into()), Some("B".into())],
            vec![Some("1".into()), None],
        ]);
        assert_eq!(t.to_tsv(), "A\tB\n1\t");
    }

    #[test]
    fn headerless_table_has_empty_header() {
        assert!(Table::default().header_lower().is_empty());
    }

    #[test]
    fn bucket_prefers_tables_over_lines() {
        let mut doc = SegmentedDocument::default();
        doc.lines
            .insert(Topic::Dividends, vec!["dividend line".into()]);
        doc.tables
            .insert(Topic::Dividends, vec![Table::from_strings(vec![vec!["Dividend"]])]);
        match doc.bucket(Topic::Dividends) {
            Some(Bucket::Tables(t)) => assert_eq!(t.len(), 1),
            other => panic!("expected table bucket, got {other:?}"),
        }
    }

    #[test]
    fn empty_topic_yields_no_bucket() {
        let doc = SegmentedDocument::default();
        assert!(doc.bucket(Topic::Fees).is_none());
        assert!(doc.is_empty());
    }
}
