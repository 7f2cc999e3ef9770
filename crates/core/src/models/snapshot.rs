use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Category values of the whole portfolio on one date.
///
/// The category fields are reported independently and need not add up
/// to `total_value`: the cash figure may overlap the defensive one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub total_value: f64,
    pub aggressive: f64,
    pub defensive: f64,
    pub cash: f64,
    pub middle: f64,
}

impl Snapshot {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Aggressive => self.aggressive,
            Category::Defensive => self.defensive,
            Category::Middle => self.middle,
            Category::Cash => self.cash,
        }
    }
}

/// One point of the growth trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// X-axis label ("Jan", "2025-05-26", ...)
    pub label: String,
    pub aggressive: f64,
    pub defensive: f64,
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub middle: f64,
    pub total: f64,
}

impl From<&Snapshot> for TrendPoint {
    fn from(s: &Snapshot) -> Self {
        Self {
            label: s.date.format("%Y-%m-%d").to_string(),
            aggressive: s.aggressive,
            defensive: s.defensive,
            cash: s.cash,
            middle: s.middle,
            total: s.total_value,
        }
    }
}

/// Direction arrow shown next to a mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The direction implied by a signed change (zero counts as up).
    pub fn of_change(change: f64) -> Self {
        if change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A holding highlighted for its period-over-period price change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub symbol: String,
    /// Change in percent (signed)
    pub change: f64,
    pub category: Category,
    pub direction: Direction,
}

impl Mover {
    pub fn new(symbol: impl Into<String>, change: f64, category: Category, direction: Direction) -> Self {
        Self {
            symbol: symbol.into(),
            change,
            category,
            direction,
        }
    }

    /// `direction == Up` iff `change >= 0`. NaN changes are never consistent.
    pub fn is_consistent(&self) -> bool {
        !self.change.is_nan() && self.direction == Direction::of_change(self.change)
    }
}
