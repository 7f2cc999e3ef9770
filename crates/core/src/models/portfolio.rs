use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holding::Holding;
use crate::errors::CoreError;

/// Input to the holdings summarizer: every position to analyse, in the
/// order the caller supplied them.
///
/// Order matters: holdings with equal value keep this order in the
/// summary table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Date the values were taken on, shown in the dashboard header
    #[serde(default)]
    pub analysis_date: Option<NaiveDate>,

    /// All holdings. Symbols are unique (case-insensitive).
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(analysis_date: Option<NaiveDate>) -> Self {
        Self {
            analysis_date,
            holdings: Vec::new(),
        }
    }

    /// Build a portfolio from a list of holdings, rejecting duplicate symbols.
    pub fn from_holdings(
        analysis_date: Option<NaiveDate>,
        holdings: impl IntoIterator<Item = Holding>,
    ) -> Result<Self, CoreError> {
        let mut portfolio = Self::new(analysis_date);
        for holding in holdings {
            portfolio.add_holding(holding)?;
        }
        Ok(portfolio)
    }

    /// Append a holding. Fails if the symbol is already present.
    pub fn add_holding(&mut self, holding: Holding) -> Result<(), CoreError> {
        if self.contains(&holding.symbol) {
            return Err(CoreError::InvalidInput(format!(
                "Duplicate holding symbol '{}'",
                holding.symbol
            )));
        }
        self.holdings.push(holding);
        Ok(())
    }

    /// Case-insensitive symbol lookup.
    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.holdings
            .iter()
            .find(|h| h.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
