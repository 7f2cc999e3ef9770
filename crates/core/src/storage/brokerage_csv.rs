//! Brokerage holdings export (Japanese column headers).
//!
//! Only the columns below are read; anything else in the file is ignored.

use csv::ReaderBuilder;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const COL_TICKER: &str = "ティッカー";
pub const COL_NAME: &str = "銘柄";
pub const COL_VALUE: &str = "時価評価額[円]";
pub const COL_SHARES: &str = "保有数[株]";
pub const COL_GAIN_LOSS: &str = "損益率[円]";
pub const COL_UNIT_PRICE: &str = "評価単価[円]";

/// One usable row of the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerageRow {
    /// Uppercased ticker
    pub ticker: String,
    pub name: String,
    pub value: f64,
    pub shares: f64,
    /// Gain/loss in percent
    pub gain_loss: f64,
    pub unit_price: f64,
}

/// Parse a UTF-8 brokerage CSV.
///
/// Numbers may carry thousands separators and a trailing `%`; anything
/// unparseable reads as 0. Rows without a ticker or with a non-positive
/// value are skipped. A missing ticker or value column is an error.
pub fn parse_brokerage_csv(data: &str) -> Result<Vec<BrokerageRow>, CoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.trim_start_matches('\u{feff}').as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let ticker_idx = column(COL_TICKER).ok_or_else(|| {
        CoreError::InvalidInput(format!("Brokerage CSV is missing the '{COL_TICKER}' column"))
    })?;
    let value_idx = column(COL_VALUE).ok_or_else(|| {
        CoreError::InvalidInput(format!("Brokerage CSV is missing the '{COL_VALUE}' column"))
    })?;
    let name_idx = column(COL_NAME);
    let shares_idx = column(COL_SHARES);
    let gain_loss_idx = column(COL_GAIN_LOSS);
    let unit_price_idx = column(COL_UNIT_PRICE);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let ticker = field(Some(ticker_idx)).to_uppercase();
        let value = parse_number(field(Some(value_idx)));

        if ticker.is_empty() || value <= 0.0 {
            skipped += 1;
            continue;
        }

        rows.push(BrokerageRow {
            ticker,
            name: field(name_idx).to_string(),
            value,
            shares: parse_number(field(shares_idx)),
            gain_loss: parse_number(field(gain_loss_idx)),
            unit_price: parse_number(field(unit_price_idx)),
        });
    }

    debug!("Parsed brokerage CSV: {} rows kept, {skipped} skipped", rows.len());
    Ok(rows)
}

/// Lenient number parsing: strips `,` and `%`, 0 on failure.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '%')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Collapse rows sharing a ticker (one position held in several accounts)
/// into one row, in first-seen order.
///
/// Values and shares are summed, the gain/loss percentage is weighted by
/// value and the unit price is recomputed from the merged totals.
pub fn merge_repeated_tickers(rows: &[BrokerageRow]) -> Vec<BrokerageRow> {
    let mut merged: Vec<BrokerageRow> = Vec::with_capacity(rows.len());

    for row in rows {
        match merged.iter_mut().find(|m| m.ticker == row.ticker) {
            Some(existing) => {
                warn!(
                    "Ticker '{}' appears more than once in the brokerage export; merging {} into {}",
                    row.ticker, row.value, existing.value
                );
                let value = existing.value + row.value;
                if value > 0.0 {
                    existing.gain_loss =
                        (existing.gain_loss * existing.value + row.gain_loss * row.value) / value;
                }
                existing.value = value;
                existing.shares += row.shares;
                if existing.shares > 0.0 {
                    existing.unit_price = value / existing.shares;
                }
            }
            None => merged.push(row.clone()),
        }
    }

    merged
}
