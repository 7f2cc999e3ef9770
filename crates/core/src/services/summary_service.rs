use std::collections::HashSet;

use log::debug;

use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::policy::BarbellPolicy;
use crate::models::portfolio::Portfolio;
use crate::models::summary::{
    AllocationSlice, CategoryRatios, CategoryTotals, ComplianceFlags, HoldingRow, HoldingsSummary,
};
use crate::rounding::percent_of;

/// Computes the standard dashboard: category totals, ratios, barbell
/// compliance and the holdings table.
///
/// Pure business logic, no I/O. The same portfolio always yields the
/// same summary.
pub struct HoldingsSummarizer {
    policy: BarbellPolicy,
}

impl HoldingsSummarizer {
    pub fn new(policy: BarbellPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &BarbellPolicy {
        &self.policy
    }

    /// Summarize a portfolio.
    ///
    /// Rejects empty portfolios, negative or non-finite values, duplicate
    /// symbols and a zero total, since every ratio divides by the total.
    pub fn summarize(&self, portfolio: &Portfolio) -> Result<HoldingsSummary, CoreError> {
        self.validate(portfolio)?;

        // 1. Category totals
        let mut totals = CategoryTotals::default();
        for holding in &portfolio.holdings {
            totals.add(holding.category, holding.value);
        }

        let total_value = totals.total();
        if total_value <= 0.0 {
            return Err(CoreError::InvalidInput(
                "Total portfolio value is zero, ratios are undefined".into(),
            ));
        }
        let defensive_combined = totals.defensive_combined();

        // 2. Ratios (display) and compliance (raw fractions)
        let ratios = CategoryRatios {
            aggressive: percent_of(totals.aggressive, total_value, 1),
            defensive: percent_of(defensive_combined, total_value, 1),
            defensive_only: percent_of(totals.defensive, total_value, 1),
            middle: percent_of(totals.middle, total_value, 1),
            cash: percent_of(totals.cash, total_value, 1),
        };

        let flags = ComplianceFlags {
            aggressive_ok: self
                .policy
                .aggressive_in_band(totals.aggressive / total_value),
            defensive_ok: self
                .policy
                .defensive_sufficient(defensive_combined / total_value),
            cash_ok: self.policy.cash_sufficient(totals.cash),
            middle_ok: self.policy.middle_reduced(totals.middle),
        };

        // 3. Holdings table, largest first. sort_by is stable, so equal
        // values keep the caller's order.
        let mut rows: Vec<HoldingRow> = portfolio
            .holdings
            .iter()
            .map(|h| HoldingRow {
                symbol: h.symbol.clone(),
                value: h.value,
                category: h.category,
                percentage: percent_of(h.value, total_value, 2),
                gain_loss: h.gain_loss_or_zero(),
                shares: h.shares,
                fixed: h.fixed,
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));

        let slices = Category::CHART_ORDER
            .iter()
            .map(|&category| AllocationSlice {
                category,
                value: totals.get(category),
            })
            .collect();

        debug!(
            "Summarized {} holdings: total={total_value}, aggressive={}%, defensive+cash={}%, all_ok={}",
            rows.len(),
            ratios.aggressive,
            ratios.defensive,
            flags.all_ok()
        );

        Ok(HoldingsSummary {
            analysis_date: portfolio.analysis_date,
            totals,
            total_value,
            defensive_combined,
            ratios,
            flags,
            rows,
            slices,
        })
    }

    /// Validate the input contract before any arithmetic.
    fn validate(&self, portfolio: &Portfolio) -> Result<(), CoreError> {
        if portfolio.is_empty() {
            return Err(CoreError::InvalidInput(
                "Portfolio has no holdings".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(portfolio.len());
        for holding in &portfolio.holdings {
            if !holding.value.is_finite() || holding.value < 0.0 {
                return Err(CoreError::InvalidInput(format!(
                    "Holding '{}' has invalid value {} (must be a non-negative amount)",
                    holding.symbol, holding.value
                )));
            }
            // Portfolios deserialized from JSON bypass `add_holding`
            if !seen.insert(holding.symbol.to_ascii_uppercase()) {
                return Err(CoreError::InvalidInput(format!(
                    "Duplicate holding symbol '{}'",
                    holding.symbol
                )));
            }
        }

        Ok(())
    }
}

impl Default for HoldingsSummarizer {
    fn default() -> Self {
        Self::new(BarbellPolicy::default())
    }
}
