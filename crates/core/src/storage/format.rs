//! JSON documents accepted and produced by the library.
//!
//! These replace hand-edited data blocks: a dashboard is driven by a
//! portfolio or comparison document plus an optional policy file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::comparison::ComparisonInput;
use crate::models::holding::Holding;
use crate::models::policy::BarbellPolicy;
use crate::models::portfolio::Portfolio;

/// Parse a portfolio document:
/// `{ "analysis_date": "2025-05-26", "holdings": [ { "symbol": ..., ... } ] }`.
pub fn parse_portfolio(json: &str) -> Result<Portfolio, CoreError> {
    let raw: Portfolio = serde_json::from_str(json)?;
    // Re-insert so symbols are normalized and duplicates rejected
    Portfolio::from_holdings(
        raw.analysis_date,
        raw.holdings.into_iter().map(|h| Holding {
            symbol: h.symbol.trim().to_uppercase(),
            ..h
        }),
    )
}

/// Parse a comparison document with `previous`, `current` and optional
/// `history` / `top_movers`.
pub fn parse_comparison(json: &str) -> Result<ComparisonInput, CoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a policy file. Missing fields take their defaults.
pub fn parse_policy(json: &str) -> Result<BarbellPolicy, CoreError> {
    let policy: BarbellPolicy = serde_json::from_str(json)?;
    policy.validate()?;
    Ok(policy)
}

/// Serialize any report or input document as pretty-printed JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize to JSON: {e}")))
}

/// Ticker → category classification.
///
/// Keys are stored uppercased so lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockMapping {
    entries: BTreeMap<String, Category>,
}

impl StockMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ "TECH1": "aggressive", "BOND1": "defensive", ... }`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, Category> = serde_json::from_str(json)?;
        let mut mapping = Self::new();
        for (symbol, category) in raw {
            mapping.insert(&symbol, category);
        }
        Ok(mapping)
    }

    pub fn insert(&mut self, symbol: &str, category: Category) {
        self.entries.insert(symbol.trim().to_uppercase(), category);
    }

    pub fn category_of(&self, symbol: &str) -> Option<Category> {
        self.entries.get(&symbol.trim().to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A position that is not in the brokerage export: cash balances,
/// mutual funds and similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedAsset {
    pub value: f64,
    pub category: Category,
}

/// Parse `{ "cash": { "value": 1000000, "category": "cash" }, ... }` into
/// fixed holdings, ordered by name.
pub fn parse_fixed_assets(json: &str) -> Result<Vec<Holding>, CoreError> {
    let raw: BTreeMap<String, FixedAsset> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|(name, asset)| Holding::fixed(name, asset.value, asset.category))
        .collect())
}
