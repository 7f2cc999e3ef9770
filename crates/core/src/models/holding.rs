use serde::{Deserialize, Serialize};

use super::category::Category;

/// A single position in the portfolio.
///
/// Symbols are uppercased on construction. `value` is the market value in
/// the portfolio's display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker or label (e.g., "TECH1", "CASH")
    pub symbol: String,

    /// Market value (must be finite and non-negative)
    pub value: f64,

    /// Number of shares held, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<f64>,

    /// Risk category
    pub category: Category,

    /// Unrealized gain/loss in percent. Absent is displayed as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_loss: Option<f64>,

    /// Fixed assets (cash balances, mutual funds) come from a separate
    /// source and are left out of the market holdings table.
    #[serde(default)]
    pub fixed: bool,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, value: f64, category: Category) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            value,
            shares: None,
            category,
            gain_loss: None,
            fixed: false,
        }
    }

    /// A fixed asset such as a cash balance or a mutual fund position.
    pub fn fixed(symbol: impl Into<String>, value: f64, category: Category) -> Self {
        Self {
            fixed: true,
            ..Self::new(symbol, value, category)
        }
    }

    pub fn with_shares(mut self, shares: f64) -> Self {
        self.shares = Some(shares);
        self
    }

    pub fn with_gain_loss(mut self, gain_loss: f64) -> Self {
        self.gain_loss = Some(gain_loss);
        self
    }

    /// Gain/loss for display, with absent treated as zero.
    pub fn gain_loss_or_zero(&self) -> f64 {
        self.gain_loss.unwrap_or(0.0)
    }
}
