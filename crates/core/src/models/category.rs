use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Coarse risk classification of a holding.
///
/// The barbell strategy wants most of the value in `Defensive` + `Cash`,
/// a small `Aggressive` sleeve, and as little `Middle` as possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// High-risk, high-upside positions (growth stocks, crypto)
    Aggressive,
    /// Low-risk positions (bonds, gold)
    Defensive,
    /// Medium-risk positions the strategy wants to shrink (index funds, REITs)
    Middle,
    /// Cash balances
    Cash,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Aggressive,
        Category::Defensive,
        Category::Middle,
        Category::Cash,
    ];

    /// Order used by the allocation charts: Aggressive, Defensive, Cash, Middle.
    pub const CHART_ORDER: [Category; 4] = [
        Category::Aggressive,
        Category::Defensive,
        Category::Cash,
        Category::Middle,
    ];

    /// Lowercase key used in JSON and mapping files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Aggressive => "aggressive",
            Category::Defensive => "defensive",
            Category::Middle => "middle",
            Category::Cash => "cash",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Aggressive => write!(f, "Aggressive"),
            Category::Defensive => write!(f, "Defensive"),
            Category::Middle => write!(f, "Middle"),
            Category::Cash => write!(f, "Cash"),
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aggressive" => Ok(Category::Aggressive),
            "defensive" => Ok(Category::Defensive),
            "middle" => Ok(Category::Middle),
            "cash" => Ok(Category::Cash),
            other => Err(CoreError::InvalidInput(format!(
                "Unknown category '{other}': expected aggressive, defensive, middle or cash"
            ))),
        }
    }
}
