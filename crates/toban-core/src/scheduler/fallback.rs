//! Last-resort allocator used when the greedy pass reports failure.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{LibraryRoom, Member, Weekday};

use super::config::SchedulerConfig;
use super::state::BoardState;

/// Plain weekday sweep: for each member, walk Monday..Friday and commit the
/// first repository-ordered room on every free weekday until the target is
/// reached. Honors the weekday-unique and rotation rules but not class
/// diversity, so every placement is recorded as relaxed.
pub fn fallback_assign(
    config: &SchedulerConfig,
    members: &[Member],
    rooms: &[LibraryRoom],
    prior_wed_fri: &HashSet<i64>,
    is_first_half: bool,
) -> BoardState {
    let mut board = BoardState::new(members, config.target_per_member);

    for member in members {
        let rotation_locked = !is_first_half && prior_wed_fri.contains(&member.id);
        for weekday in Weekday::ALL {
            if board.is_complete(member.id) {
                break;
            }
            if rotation_locked && weekday.is_wednesday_or_friday() {
                continue;
            }
            if board.has_day(member.id, weekday) {
                continue;
            }
            let Some(room) = rooms.first() else {
                return board;
            };
            board.place_relaxed(member, weekday, room.id);
        }
        if !board.is_complete(member.id) {
            warn!(
                member_id = member.id,
                count = board.count(member.id),
                "fallback sweep could not reach the target"
            );
        }
    }

    board
}
