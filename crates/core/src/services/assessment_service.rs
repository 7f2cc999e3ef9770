use crate::models::comparison::{AllocationPercentages, ChangeSet, Finding, FindingKind};
use crate::models::policy::BarbellPolicy;
use crate::models::snapshot::Snapshot;

/// Turns a comparison into the "Strategy Progress Assessment" list:
/// achievements first, then concerns.
pub struct ProgressAssessor {
    policy: BarbellPolicy,
}

impl ProgressAssessor {
    pub fn new(policy: BarbellPolicy) -> Self {
        Self { policy }
    }

    pub fn assess(
        &self,
        previous: &Snapshot,
        current: &Snapshot,
        changes: &ChangeSet,
        previous_allocation: &AllocationPercentages,
        current_allocation: &AllocationPercentages,
    ) -> Vec<Finding> {
        let mut achievements = Vec::new();
        let mut concerns = Vec::new();

        if current.cash > previous.cash {
            achievements.push(Finding::achievement(FindingKind::CashIncreased {
                share: current_allocation.cash,
                amount: current.cash,
            }));
        }

        if current_allocation.middle < previous_allocation.middle {
            achievements.push(Finding::achievement(FindingKind::MiddleReduced {
                from: previous_allocation.middle,
                to: current_allocation.middle,
            }));
        }

        if let Some(change) = changes.total_value.value() {
            if change > 0.0 {
                achievements.push(Finding::achievement(FindingKind::TotalValueIncreased {
                    change,
                }));
            } else if change < 0.0 {
                concerns.push(Finding::concern(FindingKind::TotalValueDecreased { change }));
            }
        }

        // Raw fraction for the band check; the rounded share is for display.
        let aggressive_share = current.aggressive / current.total_value;
        if !self.policy.aggressive_in_band(aggressive_share) {
            concerns.push(Finding::concern(FindingKind::AggressiveOutsideTarget {
                share: current_allocation.aggressive,
            }));
        }

        if current.middle > 0.0 {
            concerns.push(Finding::concern(FindingKind::MiddleRemaining {
                share: current_allocation.middle,
            }));
        }

        achievements.extend(concerns);
        achievements
    }
}

impl Default for ProgressAssessor {
    fn default() -> Self {
        Self::new(BarbellPolicy::default())
    }
}
