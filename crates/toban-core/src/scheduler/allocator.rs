//! Greedy allocator with a constraint-relaxation phase.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::domain::{LibraryRoom, Member, Weekday};

use super::candidates::{admissible_slots, Slot};
use super::config::SchedulerConfig;
use super::scoring::score_slot;
use super::state::BoardState;

/// Per-member greedy placement toward the target count, followed by a
/// relaxation sweep that drops class diversity for members still short.
///
/// The weekday-unique rule and the Wednesday/Friday rotation rule hold in
/// both phases; only class diversity is ever given up.
pub struct GreedyAllocator<'a> {
    config: &'a SchedulerConfig,
    members: &'a [Member],
    rooms: &'a [LibraryRoom],
    prior_wed_fri: &'a HashSet<i64>,
    is_first_half: bool,
}

impl<'a> GreedyAllocator<'a> {
    pub fn new(
        config: &'a SchedulerConfig,
        members: &'a [Member],
        rooms: &'a [LibraryRoom],
        prior_wed_fri: &'a HashSet<i64>,
        is_first_half: bool,
    ) -> Self {
        Self {
            config,
            members,
            rooms,
            prior_wed_fri,
            is_first_half,
        }
    }

    /// Run both phases and return the filled board.
    ///
    /// `None` signals structural failure and sends the caller to the fallback
    /// sweep; the current two-phase design always completes, so this is a
    /// safety net rather than a live code path.
    pub fn run(&self, rng: &mut StdRng) -> Option<BoardState> {
        let mut board = BoardState::new(self.members, self.config.target_per_member);

        let mut order: Vec<&Member> = self.members.iter().collect();
        if !self.is_first_half {
            debug!("shuffling member order for second-half diversity");
            order.shuffle(rng);
        }

        for member in order {
            let mut attempts = 0;
            while !board.is_complete(member.id) && attempts < self.config.max_attempts_per_member {
                attempts += 1;
                match self.best_slot(member, &board, rng) {
                    Some(slot) => board.place(member, slot.weekday, slot.room_id),
                    None => {
                        debug!(
                            member_id = member.id,
                            count = board.count(member.id),
                            "no admissible slot left for member"
                        );
                        break;
                    }
                }
            }
        }

        let short: Vec<&Member> = self
            .members
            .iter()
            .filter(|member| !board.is_complete(member.id))
            .collect();
        if !short.is_empty() {
            warn!(
                count = short.len(),
                "placing remaining members with class diversity suspended"
            );
            for member in short {
                self.relax(member, &mut board);
            }
        }

        Some(board)
    }

    /// Highest-scoring slot satisfying all hard rules plus class diversity.
    /// On score ties the earliest-enumerated slot wins.
    fn best_slot(&self, member: &Member, board: &BoardState, rng: &mut StdRng) -> Option<Slot> {
        let mut best: Option<(f64, Slot)> = None;
        for slot in admissible_slots(member, self.rooms, board, self.prior_wed_fri, self.is_first_half)
        {
            if board.class_has_day(member.class_id, slot.weekday) {
                continue;
            }
            let jitter = if self.is_first_half {
                None
            } else {
                Some(&mut *rng)
            };
            let score = score_slot(self.config, member, slot, board, jitter);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, slot));
            }
        }
        best.map(|(_, slot)| slot)
    }

    /// Fill a short member's remaining slots ignoring class diversity. The
    /// weekday-unique and rotation rules still apply; rooms beyond the first
    /// are never needed since occupancy is unbounded.
    fn relax(&self, member: &Member, board: &mut BoardState) {
        let rotation_locked = !self.is_first_half && self.prior_wed_fri.contains(&member.id);
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
            let Some(room) = self.rooms.first() else {
                return;
            };
            board.place_relaxed(member, weekday, room.id);
            debug!(
                member_id = member.id,
                weekday = weekday.number(),
                "relaxed placement committed"
            );
        }
        if !board.is_complete(member.id) {
            warn!(
                member_id = member.id,
                count = board.count(member.id),
                target = board.target(),
                "member remains under target after relaxation"
            );
        }
    }
}
