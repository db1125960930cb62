//! Slot scoring for the greedy allocator.

use rand::rngs::StdRng;
use rand::Rng;

use crate::domain::Member;

use super::candidates::Slot;
use super::config::SchedulerConfig;
use super::state::BoardState;

/// Score one admissible slot for one member against the current board.
///
/// The score starts from `base_score` and adds, in order: a uniform random
/// term in `[0, second_half_jitter)` when `jitter` is supplied (second-half
/// generation only), the grade-spread bonus when the member's grade is not
/// yet on duty that weekday, the room-load term
/// `room_balance_weight / (occupants + 1)`, and the first-assignment bonus
/// when the member holds no slot yet.
///
/// Ties are the caller's concern: the allocator keeps the earliest-enumerated
/// slot by comparing with strict `>`.
pub fn score_slot(
    config: &SchedulerConfig,
    member: &Member,
    slot: Slot,
    board: &BoardState,
    jitter: Option<&mut StdRng>,
) -> f64 {
    let mut score = config.base_score;

    if let Some(rng) = jitter {
        score += rng.gen::<f64>() * config.second_half_jitter;
    }

    if !board.grade_present(slot.weekday, member.grade) {
        score += config.grade_spread_bonus;
    }

    score += config.room_balance_weight / (board.occupants(slot.room_id, slot.weekday) as f64 + 1.0);

    if board.count(member.id) == 0 {
        score += config.first_assignment_bonus;
    }

    score
}
