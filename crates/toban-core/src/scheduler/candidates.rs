//! Candidate slot enumeration.

use std::collections::HashSet;

use crate::domain::{LibraryRoom, Member, Weekday};

use super::state::BoardState;

/// One open duty cell a member could be placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub weekday: Weekday,
    pub room_id: i64,
}

/// Enumerate the (weekday, room) slots open to `member`.
///
/// Filters the weekdays the member already holds and, for second-half
/// generation, the Wednesday/Friday slots of members who served those days in
/// the first half. Class diversity is the allocator's concern, not handled
/// here. Output order is deterministic: weekday ascending, rooms in
/// repository order.
pub fn admissible_slots(
    member: &Member,
    rooms: &[LibraryRoom],
    board: &BoardState,
    prior_wed_fri: &HashSet<i64>,
    is_first_half: bool,
) -> Vec<Slot> {
    let rotation_locked = !is_first_half && prior_wed_fri.contains(&member.id);
    let mut slots = Vec::new();
    for weekday in Weekday::ALL {
        if rotation_locked && weekday.is_wednesday_or_friday() {
            continue;
        }
        if board.has_day(member.id, weekday) {
            continue;
        }
        for room in rooms {
            slots.push(Slot {
                weekday,
                room_id: room.id,
            });
        }
    }
    slots
}
