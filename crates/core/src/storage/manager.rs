use chrono::NaiveDate;
use log::debug;

use crate::errors::CoreError;
use crate::models::comparison::ComparisonInput;
use crate::models::holding::Holding;
use crate::models::policy::BarbellPolicy;
use crate::models::portfolio::Portfolio;

use super::brokerage_csv::{self, BrokerageRow};
use super::format::{self, StockMapping};

/// High-level loading and export: builds typed inputs from the JSON / CSV
/// files the dashboards are driven by.
pub struct StorageManager;

impl StorageManager {
    /// Combine brokerage rows with the stock classification and the fixed
    /// assets into one portfolio.
    ///
    /// Every ticker must be classified by `mapping`; categories are never
    /// guessed. Repeated tickers are merged into one holding. Fixed assets
    /// follow the brokerage rows.
    pub fn assemble_portfolio(
        analysis_date: Option<NaiveDate>,
        rows: &[BrokerageRow],
        mapping: &StockMapping,
        fixed_assets: Vec<Holding>,
    ) -> Result<Portfolio, CoreError> {
        let mut portfolio = Portfolio::new(analysis_date);

        for row in &brokerage_csv::merge_repeated_tickers(rows) {
            let category = mapping.category_of(&row.ticker).ok_or_else(|| {
                CoreError::InvalidInput(format!(
                    "Ticker '{}' has no entry in the stock classification mapping",
                    row.ticker
                ))
            })?;
            portfolio.add_holding(
                Holding::new(&row.ticker, row.value, category)
                    .with_shares(row.shares)
                    .with_gain_loss(row.gain_loss),
            )?;
        }

        for asset in fixed_assets {
            portfolio.add_holding(asset)?;
        }

        debug!(
            "Assembled portfolio: {} brokerage rows, {} holdings total",
            rows.len(),
            portfolio.len()
        );
        Ok(portfolio)
    }

    /// Brokerage CSV + mapping JSON + fixed-asset JSON, all as strings.
    pub fn import_from_strings(
        analysis_date: Option<NaiveDate>,
        brokerage_csv: &str,
        mapping_json: &str,
        fixed_assets_json: &str,
    ) -> Result<Portfolio, CoreError> {
        let rows = brokerage_csv::parse_brokerage_csv(brokerage_csv)?;
        let mapping = StockMapping::from_json(mapping_json)?;
        let fixed = format::parse_fixed_assets(fixed_assets_json)?;
        Self::assemble_portfolio(analysis_date, &rows, &mapping, fixed)
    }

    /// Load a portfolio document from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_portfolio(path: &str) -> Result<Portfolio, CoreError> {
        let json = std::fs::read_to_string(path)?;
        format::parse_portfolio(&json)
    }

    /// Load a comparison document from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_comparison(path: &str) -> Result<ComparisonInput, CoreError> {
        let json = std::fs::read_to_string(path)?;
        format::parse_comparison(&json)
    }

    /// Load a policy file from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_policy(path: &str) -> Result<BarbellPolicy, CoreError> {
        let json = std::fs::read_to_string(path)?;
        format::parse_policy(&json)
    }

    /// Import brokerage CSV, mapping and fixed assets from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn import_from_files(
        analysis_date: Option<NaiveDate>,
        csv_path: &str,
        mapping_path: &str,
        fixed_assets_path: &str,
    ) -> Result<Portfolio, CoreError> {
        let csv = std::fs::read_to_string(csv_path)?;
        let mapping = std::fs::read_to_string(mapping_path)?;
        let fixed = std::fs::read_to_string(fixed_assets_path)?;
        Self::import_from_strings(analysis_date, &csv, &mapping, &fixed)
    }

    /// Write any serializable report as pretty JSON (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_json<T: serde::Serialize>(value: &T, path: &str) -> Result<(), CoreError> {
        let json = format::to_json_pretty(value)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
