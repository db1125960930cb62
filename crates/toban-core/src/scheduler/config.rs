//! Tunable constants for the assignment engine.

use serde::{Deserialize, Serialize};

/// Scoring and allocation constants.
///
/// The defaults are the canonical policy; they are kept tunable so tests and
/// experiments can tilt the balance without touching the allocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Duty slots every member should receive per term
    ///
    /// Default: 2
    pub target_per_member: u32,

    /// Upper bound on placement attempts per member in the greedy pass
    ///
    /// Default: 50
    pub max_attempts_per_member: u32,

    /// Score every admissible slot starts from
    ///
    /// Default: 10.0
    pub base_score: f64,

    /// Bonus for a weekday where the member's grade is not yet on duty
    ///
    /// Default: 5.0
    pub grade_spread_bonus: f64,

    /// Weight of the room-load term, applied as `weight / (occupants + 1)`
    ///
    /// Default: 3.0
    pub room_balance_weight: f64,

    /// Bonus for members who have no placement yet
    ///
    /// Default: 2.0
    pub first_assignment_bonus: f64,

    /// Upper bound of the uniform random term mixed in during second-half
    /// generation, so the autumn term does not reproduce the spring layout
    ///
    /// Default: 5.0
    pub second_half_jitter: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            target_per_member: 2,
            max_attempts_per_member: 50,
            base_score: 10.0,
            grade_spread_bonus: 5.0,
            room_balance_weight: 3.0,
            first_assignment_bonus: 2.0,
            second_half_jitter: 5.0,
        }
    }
}
