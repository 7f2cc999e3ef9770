use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::comparison::{
    AllocationComparisonRow, AllocationPercentages, ChangeSet, ComparisonInput, ComparisonReport,
    MoverIssue, PercentChange,
};
use crate::models::policy::BarbellPolicy;
use crate::models::snapshot::{Mover, Snapshot, TrendPoint};
use crate::rounding::{percent_of, round_keeping_sign};
use crate::services::assessment_service::ProgressAssessor;

/// Compares two dated snapshots for the comparison dashboard: percent
/// changes, allocation shares, trend series, movers and progress findings.
pub struct PeriodComparator {
    policy: BarbellPolicy,
    assessor: ProgressAssessor,
}

impl PeriodComparator {
    pub fn new(policy: BarbellPolicy) -> Self {
        Self {
            assessor: ProgressAssessor::new(policy.clone()),
            policy,
        }
    }

    pub fn policy(&self) -> &BarbellPolicy {
        &self.policy
    }

    /// Build the full comparison report.
    ///
    /// Movers with a contradicting direction are reported in
    /// `mover_issues`, not corrected and not treated as an error.
    pub fn compare(&self, input: &ComparisonInput) -> Result<ComparisonReport, CoreError> {
        let prev = &input.previous;
        let curr = &input.current;

        validate_snapshot("previous", prev)?;
        validate_snapshot("current", curr)?;
        if prev.date > curr.date {
            return Err(CoreError::InvalidInput(format!(
                "Previous snapshot ({}) is dated after current snapshot ({})",
                prev.date, curr.date
            )));
        }
        for point in &input.history {
            validate_trend_point(point)?;
        }

        let changes = ChangeSet {
            total_value: percent_change(prev.total_value, curr.total_value),
            aggressive: percent_change(prev.aggressive, curr.aggressive),
            defensive: percent_change(prev.defensive, curr.defensive),
            cash: percent_change(prev.cash, curr.cash),
            middle: percent_change(prev.middle, curr.middle),
        };

        let previous_allocation = allocation(prev);
        let current_allocation = allocation(curr);

        let allocation_comparison = Category::CHART_ORDER
            .iter()
            .map(|&category| AllocationComparisonRow {
                category,
                previous: previous_allocation.get(category),
                current: current_allocation.get(category),
                target: self.policy.display_targets.get(category),
            })
            .collect();

        let trend = if input.history.is_empty() {
            trend_series(&[*prev, *curr])
        } else {
            input.history.clone()
        };

        let mover_issues = validate_movers(&input.top_movers);

        let findings = self.assessor.assess(
            prev,
            curr,
            &changes,
            &previous_allocation,
            &current_allocation,
        );

        debug!(
            "Compared {} -> {}: total change {}, {} mover issue(s), {} finding(s)",
            prev.date,
            curr.date,
            changes.total_value,
            mover_issues.len(),
            findings.len()
        );

        Ok(ComparisonReport {
            previous_date: prev.date,
            current_date: curr.date,
            changes,
            previous_allocation,
            current_allocation,
            allocation_comparison,
            trend,
            movers: input.top_movers.clone(),
            mover_issues,
            findings,
        })
    }
}

impl Default for PeriodComparator {
    fn default() -> Self {
        Self::new(BarbellPolicy::default())
    }
}

/// `(current - previous) / previous * 100`, one decimal. Zero baseline
/// yields `Undefined`. Any nonzero delta keeps its sign, so a change too
/// small to show at one decimal is reported as `+0.1` or `-0.1`.
pub fn percent_change(previous: f64, current: f64) -> PercentChange {
    if previous == 0.0 {
        return PercentChange::Undefined;
    }
    PercentChange::Defined(round_keeping_sign((current - previous) / previous * 100.0, 1))
}

/// Like [`percent_change`], but a zero baseline is an error naming `field`.
pub fn percent_change_strict(field: &str, previous: f64, current: f64) -> Result<f64, CoreError> {
    percent_change(previous, current)
        .value()
        .ok_or_else(|| CoreError::UndefinedArithmetic {
            field: field.to_string(),
        })
}

/// Category shares of a snapshot's own total.
pub fn allocation(snapshot: &Snapshot) -> AllocationPercentages {
    let total = snapshot.total_value;
    AllocationPercentages {
        aggressive: percent_of(snapshot.aggressive, total, 1),
        defensive: percent_of(snapshot.defensive, total, 1),
        cash: percent_of(snapshot.cash, total, 1),
        middle: percent_of(snapshot.middle, total, 1),
    }
}

/// Project snapshots onto trend points, oldest first. Snapshots sharing a
/// date keep their relative order.
pub fn trend_series(snapshots: &[Snapshot]) -> Vec<TrendPoint> {
    let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|s| s.date);
    ordered.into_iter().map(TrendPoint::from).collect()
}

/// Find every mover whose direction flag contradicts its change.
pub fn validate_movers(movers: &[Mover]) -> Vec<MoverIssue> {
    movers
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.is_consistent())
        .map(|(index, m)| {
            let issue = MoverIssue {
                index,
                symbol: m.symbol.clone(),
                change: m.change,
                direction: m.direction,
            };
            warn!("Inconsistent mover data: {issue}");
            issue
        })
        .collect()
}

/// Fail on the first inconsistent mover.
pub fn require_consistent_movers(movers: &[Mover]) -> Result<(), CoreError> {
    match validate_movers(movers).into_iter().next() {
        Some(issue) => Err(CoreError::DataInconsistency(issue.to_string())),
        None => Ok(()),
    }
}

fn validate_snapshot(name: &str, snapshot: &Snapshot) -> Result<(), CoreError> {
    if !snapshot.total_value.is_finite() || snapshot.total_value <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "{name} snapshot ({}) must have a positive total value, got {}",
            snapshot.date, snapshot.total_value
        )));
    }
    for category in Category::ALL {
        let value = snapshot.get(category);
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "{name} snapshot ({}) has invalid {} value {value}",
                snapshot.date,
                category.as_str()
            )));
        }
    }
    Ok(())
}

fn validate_trend_point(point: &TrendPoint) -> Result<(), CoreError> {
    let values = [
        point.aggressive,
        point.defensive,
        point.cash,
        point.middle,
        point.total,
    ];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "Trend point '{}' has a negative or non-finite value",
            point.label
        )));
    }
    Ok(())
}
