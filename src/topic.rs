//! The closed set of statement topics and their fixed processing order.
//!
//! Topics double as display priorities: the enum variants are declared in
//! processing order so the derived `Ord` matches the order summaries are
//! presented in. [`Topic::Overall`] is special — it is always attempted
//! first, against the whole document text rather than a classified bucket,
//! and always carries display priority 0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A statement content category.
///
/// The taxonomy is fixed and small by design; classification into it is
/// heuristic (see [`crate::pipeline::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Whole-document summary, built from the concatenated page text.
    Overall,
    Dividends,
    Transactions,
    Positions,
    Fees,
    Performance,
    AccountSummary,
    /// Catch-all for lines seen before any keyword match, and for tables
    /// whose header matches no known section.
    Other,
}

/// The per-section processing order. `Overall` is handled separately and
/// deliberately absent.
pub const SECTION_ORDER: [Topic; 7] = [
    Topic::Dividends,
    Topic::Transactions,
    Topic::Positions,
    Topic::Fees,
    Topic::Performance,
    Topic::AccountSummary,
    Topic::Other,
];

impl Topic {
    /// Stable snake_case key used in the display output map.
    pub fn key(self) -> &'static str {
        match self {
            Topic::Overall => "overall",
            Topic::Dividends => "dividends",
            Topic::Transactions => "transactions",
            Topic::Positions => "positions",
            Topic::Fees => "fees",
            Topic::Performance => "performance",
            Topic::AccountSummary => "account_summary",
            Topic::Other => "other",
        }
    }

    /// Human-readable section title for display output.
    pub fn title(self) -> &'static str {
        match self {
            Topic::Overall => "Overall Summary",
            Topic::Dividends => "Dividends & Distributions",
            Topic::Transactions => "Trading Activity",
            Topic::Positions => "Portfolio Positions",
            Topic::Fees => "Fees & Charges",
            Topic::Performance => "Performance",
            Topic::AccountSummary => "Account Summary",
            Topic::Other => "Other Details",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
