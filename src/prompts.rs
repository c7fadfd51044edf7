//! Prompt templates for section summarization.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tweaking what a section summary must
//!    cover requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without a
//!    live inference call, making prompt regressions easy to catch.
//!
//! Callers can override the system prompt via
//! [`crate::config::SummarizeConfig::system_prompt`]; the constants here are
//! used only when no override is provided.

use crate::topic::Topic;

/// Default system prompt sent with every section summary request.
pub const SYSTEM_PROMPT: &str = "You are a financial analyst summarizing brokerage statements. \
Be concise and focus on key numbers and insights. Use plain text only with no markdown, \
asterisks, or special formatting. Ensure proper spacing around numbers and currency amounts.";

/// Marker separating the instruction from the statement content.
pub const DATA_MARKER: &str = "Data to analyze:";

/// Appended to prompt content cut at the length cap, so the model knows the
/// data is incomplete.
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// The instruction checklist for one topic.
///
/// Every variant has an explicit arm; `Other` and `Overall` use the generic
/// and whole-statement instructions respectively, so there is no stringly
/// keyed fallback to fall through.
pub fn instruction(topic: Topic) -> &'static str {
    match topic {
        Topic::Overall => {
            "Summarize this brokerage statement. Cover:\n\
             1. Total portfolio value and period change\n\
             2. Notable activity (trades, income, fees)\n\
             3. Anything a client should follow up on\n\
             Use plain text only, no formatting."
        }
        Topic::Dividends => {
            "Summarize this dividend and distribution information. Cover:\n\
             1. Total dividends received\n\
             2. Companies that paid dividends\n\
             3. Payment dates\n\
             Use plain text only, no formatting."
        }
        Topic::Transactions => {
            "Summarize these transactions. Cover:\n\
             1. Number of trades\n\
             2. Most active securities\n\
             3. Net buying or selling activity\n\
             Use plain text only, no formatting."
        }
        Topic::Positions => {
            "Summarize the portfolio positions. Cover:\n\
             1. Largest holdings\n\
             2. Sector allocation\n\
             3. Total portfolio value\n\
             Use plain text only, no formatting."
        }
        Topic::Fees => {
            "Summarize all fees and charges. Cover:\n\
             1. Total costs\n\
             2. Types of fees\n\
             Use plain text only, no formatting."
        }
        Topic::Performance => {
            "Summarize the performance metrics. Cover:\n\
             1. Gains and losses\n\
             2. Returns for the period\n\
             Use plain text only, no formatting."
        }
        Topic::AccountSummary => {
            "Summarize the account summary. Cover:\n\
             1. Opening and closing balances\n\
             2. Change in account value\n\
             Use plain text only, no formatting."
        }
        Topic::Other => {
            "Summarize this brokerage statement section. \
             Use plain text only, no formatting."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic::SECTION_ORDER;

    #[test]
    fn every_section_topic_has_an_instruction() {
        for topic in SECTION_ORDER {
            assert!(
                !instruction(topic).is_empty(),
                "missing instruction for {topic}"
            );
        }
    }

    #[test]
    fn instructions_forbid_formatting() {
        for topic in SECTION_ORDER {
            assert!(instruction(topic).contains("plain text only"));
        }
    }

    #[test]
    fn dividend_checklist_covers_required_items() {
        let p = instruction(Topic::Dividends);
        assert!(p.contains("Total dividends"));
        assert!(p.contains("Companies"));
        assert!(p.contains("dates"));
    }
}
