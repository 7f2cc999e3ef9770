use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::CoreError;

/// Tolerance used when comparing fractions against policy bounds, so a
/// ratio that is exactly on a bound in decimal (8.0%, 12.0%) counts as
/// inside even after floating-point division.
pub const BOUND_EPSILON: f64 = 1e-9;

/// Barbell strategy thresholds. All fields have defaults, so a policy file
/// only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarbellPolicy {
    /// Lower bound of the aggressive share (fraction of total, inclusive)
    pub aggressive_min: f64,

    /// Upper bound of the aggressive share (fraction of total, inclusive)
    pub aggressive_max: f64,

    /// Minimum defensive + cash share (fraction of total, inclusive)
    pub defensive_min: f64,

    /// Minimum absolute cash buffer, in the portfolio's currency
    pub cash_floor: f64,

    /// Middle-ground holdings are considered "reduced enough" below this
    /// absolute value
    pub middle_ceiling: f64,

    /// Target percentages drawn next to the allocation comparison bars
    pub display_targets: AllocationTargets,
}

impl Default for BarbellPolicy {
    fn default() -> Self {
        Self {
            aggressive_min: 0.08,
            aggressive_max: 0.12,
            defensive_min: 0.88,
            cash_floor: 800_000.0,
            middle_ceiling: 200_000.0,
            display_targets: AllocationTargets::default(),
        }
    }
}

impl BarbellPolicy {
    /// Check that the thresholds describe a usable policy.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fractions = [
            ("aggressive_min", self.aggressive_min),
            ("aggressive_max", self.aggressive_max),
            ("defensive_min", self.defensive_min),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidInput(format!(
                    "Policy {name} must be a fraction between 0 and 1, got {value}"
                )));
            }
        }
        if self.aggressive_min > self.aggressive_max {
            return Err(CoreError::InvalidInput(format!(
                "Policy aggressive_min ({}) exceeds aggressive_max ({})",
                self.aggressive_min, self.aggressive_max
            )));
        }
        for (name, value) in [
            ("cash_floor", self.cash_floor),
            ("middle_ceiling", self.middle_ceiling),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidInput(format!(
                    "Policy {name} must be a non-negative amount, got {value}"
                )));
            }
        }
        self.display_targets.validate()
    }

    /// Whether an aggressive share (fraction of total) lies in the target band.
    pub fn aggressive_in_band(&self, share: f64) -> bool {
        share >= self.aggressive_min - BOUND_EPSILON && share <= self.aggressive_max + BOUND_EPSILON
    }

    /// Whether a defensive + cash share (fraction of total) meets the minimum.
    pub fn defensive_sufficient(&self, share: f64) -> bool {
        share >= self.defensive_min - BOUND_EPSILON
    }

    pub fn cash_sufficient(&self, cash: f64) -> bool {
        cash >= self.cash_floor
    }

    pub fn middle_reduced(&self, middle: f64) -> bool {
        middle < self.middle_ceiling
    }
}

/// Display targets per category, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationTargets {
    pub aggressive: f64,
    pub defensive: f64,
    pub cash: f64,
    pub middle: f64,
}

impl Default for AllocationTargets {
    fn default() -> Self {
        Self {
            aggressive: 10.0,
            defensive: 90.0,
            cash: 50.0,
            middle: 0.0,
        }
    }
}

impl AllocationTargets {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Aggressive => self.aggressive,
            Category::Defensive => self.defensive,
            Category::Middle => self.middle,
            Category::Cash => self.cash,
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        for category in Category::ALL {
            let value = self.get(category);
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(CoreError::InvalidInput(format!(
                    "Display target for {category} must be between 0 and 100, got {value}"
                )));
            }
        }
        Ok(())
    }
}
