//! Section classification: assign lines and tables to topics.
//!
//! ## Line classification is a running-topic state machine
//!
//! Statements announce a section once ("DIVIDENDS AND DISTRIBUTIONS") and
//! then list rows that carry no section keywords of their own. A line is
//! therefore classified by the *last* keyword match seen, not by its own
//! content: state = current [`Topic`], transition = keyword hit, initial
//! state = [`Topic::Other`]. The transition function is pure — callers
//! thread the state value through [`classify_line`] themselves — which
//! keeps segmentation trivially testable.
//!
//! ## Tables are classified once, from the header row
//!
//! Table bodies are numbers; only the header names what the table is.
//! Matching is case-insensitive substring search over header cells, null
//! cells treated as empty, in a fixed precedence order.

use crate::document::Table;
use crate::topic::Topic;

/// Keyword sets per topic, in match precedence order. First hit wins, so a
/// line naming both dividends and trades lands in the dividends section.
const LINE_KEYWORDS: [(Topic, &[&str]); 6] = [
    (
        Topic::Dividends,
        &["dividend", "distribution", "reinvestment"],
    ),
    (
        Topic::Transactions,
        &["transaction", "trade", "buy", "sell", "purchase"],
    ),
    (
        Topic::Positions,
        &["position", "holding", "shares", "quantity", "portfolio"],
    ),
    (Topic::Fees, &["fee", "charge", "commission", "expense"]),
    (
        Topic::Performance,
        &["gain", "loss", "return", "performance", "change"],
    ),
    (
        Topic::AccountSummary,
        &["account summary", "portfolio value", "total value", "balance"],
    ),
];

/// Advance the sticky classification state by one line.
///
/// Returns the topic the line belongs to, which is also the state carried
/// into the next line. Lines matching no keyword stay with `current`.
pub fn classify_line(current: Topic, line: &str) -> Topic {
    let lower = line.to_lowercase();
    for (topic, keywords) in LINE_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return topic;
        }
    }
    current
}

/// Classify a table from its header row alone.
///
/// Precedence: dividend/distribution, then (symbol AND qty) or position,
/// then trade keywords, then fee keywords, else [`Topic::Other`]. A table
/// with no header row is `Other`.
pub fn classify_table(table: &Table) -> Topic {
    let headers = table.header_lower();
    if headers.is_empty() {
        return Topic::Other;
    }

    let any = |needle: &str| headers.iter().any(|h| h.contains(needle));

    if any("dividend") || any("distribution") {
        Topic::Dividends
    } else if (any("symbol") && (any("qty") || any("quantity"))) || any("position") {
        Topic::Positions
    } else if any("trade") || any("buy") || any("sell") || any("transaction") {
        Topic::Transactions
    } else if any("fee") || any("charge") || any("commission") {
        Topic::Fees
    } else {
        Topic::Other
    }
}
