use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Summed value per category.
///
/// `total()` is defined as the sum of the four fields, so the two can
/// never drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub aggressive: f64,
    pub defensive: f64,
    pub middle: f64,
    pub cash: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Aggressive => self.aggressive,
            Category::Defensive => self.defensive,
            Category::Middle => self.middle,
            Category::Cash => self.cash,
        }
    }

    pub fn add(&mut self, category: Category, value: f64) {
        match category {
            Category::Aggressive => self.aggressive += value,
            Category::Defensive => self.defensive += value,
            Category::Middle => self.middle += value,
            Category::Cash => self.cash += value,
        }
    }

    pub fn total(&self) -> f64 {
        self.aggressive + self.defensive + self.middle + self.cash
    }

    /// The "safe" side of the barbell: defensive holdings plus cash.
    pub fn defensive_combined(&self) -> f64 {
        self.defensive + self.cash
    }
}

/// Category shares of the total, in percent, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRatios {
    pub aggressive: f64,
    /// Defensive + cash, as shown on the dashboard's defensive card
    pub defensive: f64,
    /// Defensive holdings alone; together with the other three fields
    /// this adds up to ~100
    pub defensive_only: f64,
    pub middle: f64,
    pub cash: f64,
}

/// Pass/fail per barbell rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFlags {
    pub aggressive_ok: bool,
    pub defensive_ok: bool,
    pub cash_ok: bool,
    pub middle_ok: bool,
}

impl ComplianceFlags {
    /// Overall strategy status. The middle-ground rule is advisory and
    /// does not participate.
    pub fn all_ok(&self) -> bool {
        self.aggressive_ok && self.defensive_ok && self.cash_ok
    }
}

/// One line of the holdings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    pub symbol: String,
    pub value: f64,
    pub category: Category,
    /// Share of total portfolio value, in percent, two decimals
    pub percentage: f64,
    /// Gain/loss in percent (0 when unknown)
    pub gain_loss: f64,
    pub shares: Option<f64>,
    pub fixed: bool,
}

/// Absolute value of one category, for the allocation pie chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub category: Category,
    pub value: f64,
}

/// Everything the standard portfolio dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsSummary {
    pub analysis_date: Option<NaiveDate>,

    pub totals: CategoryTotals,

    /// Total portfolio value (equals `totals.total()`)
    pub total_value: f64,

    /// Defensive + cash
    pub defensive_combined: f64,

    pub ratios: CategoryRatios,

    pub flags: ComplianceFlags,

    /// All holdings, largest value first
    pub rows: Vec<HoldingRow>,

    /// Pie chart slices in chart order (Aggressive, Defensive, Cash, Middle)
    pub slices: Vec<AllocationSlice>,
}

impl HoldingsSummary {
    /// Rows for market positions only (fixed assets excluded), in table order.
    pub fn market_rows(&self) -> impl Iterator<Item = &HoldingRow> {
        self.rows.iter().filter(|r| !r.fixed)
    }

    /// Rows belonging to one category, in table order.
    pub fn rows_in(&self, category: Category) -> impl Iterator<Item = &HoldingRow> {
        self.rows.iter().filter(move |r| r.category == category)
    }
}
