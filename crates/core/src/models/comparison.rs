use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::snapshot::{Direction, Mover, Snapshot, TrendPoint};

/// Input to the period comparator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub previous: Snapshot,
    pub current: Snapshot,

    /// Historical points for the trend chart, oldest first
    #[serde(default)]
    pub history: Vec<TrendPoint>,

    /// Caller-selected notable movers
    #[serde(default)]
    pub top_movers: Vec<Mover>,
}

/// Percent change between two values.
///
/// `Undefined` when the baseline is zero, so "no change" (`Defined(0.0)`)
/// stays distinguishable from "cannot be computed".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentChange {
    Defined(f64),
    Undefined,
}

impl PercentChange {
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentChange::Defined(v) => Some(*v),
            PercentChange::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, PercentChange::Defined(_))
    }
}

impl std::fmt::Display for PercentChange {
    /// "+4.9%", "-3.0%", "0.0%" or "n/a".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentChange::Defined(v) if *v > 0.0 => write!(f, "+{v:.1}%"),
            PercentChange::Defined(v) => write!(f, "{v:.1}%"),
            PercentChange::Undefined => write!(f, "n/a"),
        }
    }
}

/// Percent change of the total and of each category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub total_value: PercentChange,
    pub aggressive: PercentChange,
    pub defensive: PercentChange,
    pub cash: PercentChange,
    pub middle: PercentChange,
}

impl ChangeSet {
    pub fn get(&self, category: Category) -> PercentChange {
        match category {
            Category::Aggressive => self.aggressive,
            Category::Defensive => self.defensive,
            Category::Middle => self.middle,
            Category::Cash => self.cash,
        }
    }
}

/// Category shares of one snapshot's own total, percent, one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationPercentages {
    pub aggressive: f64,
    pub defensive: f64,
    pub cash: f64,
    pub middle: f64,
}

impl AllocationPercentages {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Aggressive => self.aggressive,
            Category::Defensive => self.defensive,
            Category::Middle => self.middle,
            Category::Cash => self.cash,
        }
    }
}

/// One bar group of the allocation comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationComparisonRow {
    pub category: Category,
    pub previous: f64,
    pub current: f64,
    pub target: f64,
}

/// A mover whose direction flag contradicts the sign of its change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverIssue {
    /// Position in the caller's movers list
    pub index: usize,
    pub symbol: String,
    pub change: f64,
    pub direction: Direction,
}

impl std::fmt::Display for MoverIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mover #{} '{}' is flagged {} but changed {:+.1}%",
            self.index, self.symbol, self.direction, self.change
        )
    }
}

/// Whether a finding is good news or something to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Achievement,
    Concern,
}

/// What a progress finding is about. Shares are percentages of the
/// current total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    CashIncreased { share: f64, amount: f64 },
    MiddleReduced { from: f64, to: f64 },
    TotalValueIncreased { change: f64 },
    TotalValueDecreased { change: f64 },
    AggressiveOutsideTarget { share: f64 },
    MiddleRemaining { share: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub level: FindingLevel,
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    pub fn achievement(kind: FindingKind) -> Self {
        Self {
            level: FindingLevel::Achievement,
            kind,
        }
    }

    pub fn concern(kind: FindingKind) -> Self {
        Self {
            level: FindingLevel::Concern,
            kind,
        }
    }
}

/// Everything the comparison dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub previous_date: NaiveDate,
    pub current_date: NaiveDate,

    pub changes: ChangeSet,

    pub previous_allocation: AllocationPercentages,
    pub current_allocation: AllocationPercentages,

    /// Chart order: Aggressive, Defensive, Cash, Middle
    pub allocation_comparison: Vec<AllocationComparisonRow>,

    pub trend: Vec<TrendPoint>,

    /// Movers exactly as supplied (never corrected)
    pub movers: Vec<Mover>,

    pub mover_issues: Vec<MoverIssue>,

    pub findings: Vec<Finding>,
}

impl ComparisonReport {
    pub fn has_data_issues(&self) -> bool {
        !self.mover_issues.is_empty()
    }

    pub fn achievements(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.level == FindingLevel::Achievement)
    }

    pub fn concerns(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.level == FindingLevel::Concern)
    }
}
