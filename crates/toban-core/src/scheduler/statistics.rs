//! Deterministic summary of a finished board.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{LibraryRoom, Member, Weekday};

use super::state::BoardState;

/// Distinct members on duty for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub members: usize,
}

/// Occupants of one (weekday, room) cell, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRoster {
    pub weekday: Weekday,
    pub room_id: i64,
    pub room_name: String,
    pub members: Vec<String>,
}

/// One member's duty load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member_id: i64,
    pub name: String,
    pub count: u32,
    pub weekdays: Vec<Weekday>,
}

/// Aggregate view of one generated schedule, built purely from the final
/// board so it always agrees with the persisted assignment rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    pub assignment_count: usize,
    pub member_count: usize,
    pub room_count: usize,
    pub mean_assignments_per_member: f64,
    pub weekday_counts: Vec<WeekdayCount>,
    pub room_rosters: Vec<RoomRoster>,
    pub member_summaries: Vec<MemberSummary>,
}

/// Build the statistics and the warning list for a finished board.
///
/// Warnings cover members under the target count and members whose
/// placement needed the class-diversity rule suspended. Ordering follows
/// the repository order of members and rooms, weekdays ascending.
pub fn build_statistics(
    members: &[Member],
    rooms: &[LibraryRoom],
    board: &BoardState,
) -> (ScheduleStatistics, Vec<String>) {
    let names: HashMap<i64, &str> = members
        .iter()
        .map(|member| (member.id, member.name.as_str()))
        .collect();

    let weekday_counts = Weekday::ALL
        .iter()
        .map(|&weekday| WeekdayCount {
            weekday,
            members: members
                .iter()
                .filter(|member| board.has_day(member.id, weekday))
                .count(),
        })
        .collect();

    let mut room_rosters = Vec::new();
    for &weekday in &Weekday::ALL {
        for room in rooms {
            room_rosters.push(RoomRoster {
                weekday,
                room_id: room.id,
                room_name: room.name.clone(),
                members: board
                    .roster(room.id, weekday)
                    .iter()
                    .map(|id| names.get(id).copied().unwrap_or_default().to_string())
                    .collect(),
            });
        }
    }

    let member_summaries: Vec<MemberSummary> = members
        .iter()
        .map(|member| MemberSummary {
            member_id: member.id,
            name: member.name.clone(),
            count: board.count(member.id),
            weekdays: board.days(member.id),
        })
        .collect();

    let mut warnings = Vec::new();
    for member in members {
        let count = board.count(member.id);
        if count < board.target() {
            warnings.push(format!(
                "{} holds {} of {} duty slots",
                member.name,
                count,
                board.target()
            ));
        }
    }
    for member in members {
        if board.relaxed_members().contains(&member.id) {
            warnings.push(format!(
                "{} was placed without the one-per-class-per-day guarantee",
                member.name
            ));
        }
    }

    let assignment_count = board.total_placements();
    let member_count = members.len();
    let statistics = ScheduleStatistics {
        assignment_count,
        member_count,
        room_count: rooms.len(),
        mean_assignments_per_member: if member_count == 0 {
            0.0
        } else {
            assignment_count as f64 / member_count as f64
        },
        weekday_counts,
        room_rosters,
        member_summaries,
    };

    (statistics, warnings)
}
