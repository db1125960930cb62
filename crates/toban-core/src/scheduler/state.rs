//! Mutable allocation state for one generation run.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::{Assignment, Member, Weekday};

/// The in-memory duty board the allocator fills in.
///
/// Tracks, per member, how many slots they hold and on which weekdays; per
/// class, which weekdays are taken; and the ordered occupant list of every
/// (room, weekday) cell. Members placed with the class-diversity rule
/// suspended are remembered so the reporter can warn about them.
#[derive(Debug, Clone)]
pub struct BoardState {
    target: u32,
    counts: HashMap<i64, u32>,
    member_days: HashMap<i64, BTreeSet<Weekday>>,
    class_days: HashMap<i64, BTreeSet<Weekday>>,
    grade_counts: HashMap<(Weekday, u8), u32>,
    placements: BTreeMap<(i64, Weekday), Vec<i64>>,
    relaxed: BTreeSet<i64>,
}

impl BoardState {
    pub fn new(members: &[Member], target: u32) -> Self {
        let mut counts = HashMap::new();
        let mut member_days = HashMap::new();
        let mut class_days = HashMap::new();
        for member in members {
            counts.insert(member.id, 0);
            member_days.insert(member.id, BTreeSet::new());
            class_days.entry(member.class_id).or_insert_with(BTreeSet::new);
        }
        Self {
            target,
            counts,
            member_days,
            class_days,
            grade_counts: HashMap::new(),
            placements: BTreeMap::new(),
            relaxed: BTreeSet::new(),
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn count(&self, member_id: i64) -> u32 {
        self.counts.get(&member_id).copied().unwrap_or(0)
    }

    pub fn is_complete(&self, member_id: i64) -> bool {
        self.count(member_id) >= self.target
    }

    pub fn has_day(&self, member_id: i64, weekday: Weekday) -> bool {
        self.member_days
            .get(&member_id)
            .is_some_and(|days| days.contains(&weekday))
    }

    pub fn class_has_day(&self, class_id: i64, weekday: Weekday) -> bool {
        self.class_days
            .get(&class_id)
            .is_some_and(|days| days.contains(&weekday))
    }

    /// Whether any occupant of `weekday` (across all rooms) is of `grade`.
    pub fn grade_present(&self, weekday: Weekday, grade: u8) -> bool {
        self.grade_counts
            .get(&(weekday, grade))
            .copied()
            .unwrap_or(0)
            > 0
    }

    /// Occupant count of one (room, weekday) cell.
    pub fn occupants(&self, room_id: i64, weekday: Weekday) -> usize {
        self.placements
            .get(&(room_id, weekday))
            .map_or(0, |members| members.len())
    }

    /// Ordered occupant ids of one (room, weekday) cell.
    pub fn roster(&self, room_id: i64, weekday: Weekday) -> &[i64] {
        self.placements
            .get(&(room_id, weekday))
            .map_or(&[], |members| members.as_slice())
    }

    /// Weekdays the member currently holds, ascending.
    pub fn days(&self, member_id: i64) -> Vec<Weekday> {
        self.member_days
            .get(&member_id)
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Commit a placement, claiming the weekday for the member's class.
    pub fn place(&mut self, member: &Member, weekday: Weekday, room_id: i64) {
        self.record(member, weekday, room_id);
        self.class_days
            .entry(member.class_id)
            .or_default()
            .insert(weekday);
    }

    /// Commit a placement with the class-diversity rule suspended. The
    /// weekday is not claimed for the class and the member is flagged for a
    /// warning.
    pub fn place_relaxed(&mut self, member: &Member, weekday: Weekday, room_id: i64) {
        self.record(member, weekday, room_id);
        self.relaxed.insert(member.id);
    }

    fn record(&mut self, member: &Member, weekday: Weekday, room_id: i64) {
        self.placements
            .entry((room_id, weekday))
            .or_default()
            .push(member.id);
        *self.counts.entry(member.id).or_insert(0) += 1;
        self.member_days.entry(member.id).or_default().insert(weekday);
        *self.grade_counts.entry((weekday, member.grade)).or_insert(0) += 1;
    }

    pub fn relaxed_members(&self) -> &BTreeSet<i64> {
        &self.relaxed
    }

    pub fn total_placements(&self) -> usize {
        self.placements.values().map(|members| members.len()).sum()
    }

    /// Flatten the board into assignment rows, deterministically ordered by
    /// (room, weekday, placement order).
    pub fn assignments(&self) -> Vec<Assignment> {
        self.placements
            .iter()
            .flat_map(|(&(room_id, weekday), members)| {
                members.iter().map(move |&member_id| Assignment {
                    weekday,
                    room_id,
                    member_id,
                })
            })
            .collect()
    }
}
