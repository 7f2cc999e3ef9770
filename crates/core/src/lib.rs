pub mod errors;
pub mod models;
pub mod rounding;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    comparison::{ComparisonInput, ComparisonReport, MoverIssue},
    policy::BarbellPolicy,
    portfolio::Portfolio,
    snapshot::{Mover, Snapshot, TrendPoint},
    summary::HoldingsSummary,
};
use services::{
    comparison_service::{self, PeriodComparator},
    summary_service::HoldingsSummarizer,
};
use storage::{format, manager::StorageManager};

use errors::CoreError;

/// Main entry point for the barbell dashboard core library.
/// Holds the active policy and the two computation services built from it.
#[must_use]
pub struct BarbellDashboard {
    policy: BarbellPolicy,
    summarizer: HoldingsSummarizer,
    comparator: PeriodComparator,
}

impl std::fmt::Debug for BarbellDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarbellDashboard")
            .field("policy", &self.policy)
            .finish()
    }
}

impl BarbellDashboard {
    /// Create a dashboard with the default barbell policy
    /// (aggressive 8–12%, defensive + cash ≥ 88%, cash ≥ 800 000).
    pub fn new() -> Self {
        Self::build(BarbellPolicy::default())
    }

    /// Create a dashboard with a custom policy.
    pub fn with_policy(policy: BarbellPolicy) -> Result<Self, CoreError> {
        policy.validate()?;
        Ok(Self::build(policy))
    }

    // ── Policy ──────────────────────────────────────────────────────

    #[must_use]
    pub fn policy(&self) -> &BarbellPolicy {
        &self.policy
    }

    /// Replace the policy. Rebuilds the services so the new thresholds
    /// take effect immediately. An invalid policy leaves the current one
    /// in place.
    pub fn set_policy(&mut self, policy: BarbellPolicy) -> Result<(), CoreError> {
        policy.validate()?;
        *self = Self::build(policy);
        Ok(())
    }

    /// Replace the policy from a JSON policy file's contents.
    pub fn set_policy_json(&mut self, json: &str) -> Result<(), CoreError> {
        let policy = format::parse_policy(json)?;
        self.set_policy(policy)
    }

    // ── Holdings summary ────────────────────────────────────────────

    /// Category totals, ratios, compliance flags and the holdings table.
    pub fn summarize(&self, portfolio: &Portfolio) -> Result<HoldingsSummary, CoreError> {
        self.summarizer.summarize(portfolio)
    }

    /// Summarize a portfolio JSON document.
    pub fn summarize_json(&self, json: &str) -> Result<HoldingsSummary, CoreError> {
        let portfolio = format::parse_portfolio(json)?;
        self.summarize(&portfolio)
    }

    /// Build a portfolio from a brokerage CSV export, a stock mapping and a
    /// fixed-asset file (all given as file contents).
    pub fn import_portfolio(
        &self,
        analysis_date: Option<NaiveDate>,
        brokerage_csv: &str,
        mapping_json: &str,
        fixed_assets_json: &str,
    ) -> Result<Portfolio, CoreError> {
        StorageManager::import_from_strings(
            analysis_date,
            brokerage_csv,
            mapping_json,
            fixed_assets_json,
        )
    }

    // ── Period comparison ───────────────────────────────────────────

    /// Percent changes, allocation shares, trend, movers and findings.
    pub fn compare(&self, input: &ComparisonInput) -> Result<ComparisonReport, CoreError> {
        self.comparator.compare(input)
    }

    /// Compare from a comparison JSON document.
    pub fn compare_json(&self, json: &str) -> Result<ComparisonReport, CoreError> {
        let input = format::parse_comparison(json)?;
        self.compare(&input)
    }

    /// Movers whose direction flag contradicts their change.
    #[must_use]
    pub fn validate_movers(&self, movers: &[Mover]) -> Vec<MoverIssue> {
        comparison_service::validate_movers(movers)
    }

    /// Trend points from any number of snapshots, oldest first.
    #[must_use]
    pub fn trend_series(&self, snapshots: &[Snapshot]) -> Vec<TrendPoint> {
        comparison_service::trend_series(snapshots)
    }

    // ── Export ──────────────────────────────────────────────────────

    pub fn export_summary_json(&self, summary: &HoldingsSummary) -> Result<String, CoreError> {
        format::to_json_pretty(summary)
    }

    pub fn export_comparison_json(&self, report: &ComparisonReport) -> Result<String, CoreError> {
        format::to_json_pretty(report)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(policy: BarbellPolicy) -> Self {
        let summarizer = HoldingsSummarizer::new(policy.clone());
        let comparator = PeriodComparator::new(policy.clone());

        Self {
            policy,
            summarizer,
            comparator,
        }
    }
}

impl Default for BarbellDashboard {
    fn default() -> Self {
        Self::new()
    }
}
