use crate::domain::{Assignment, AssignmentRecord, LibraryRoom, Member, NewSchedule, Schedule};
use async_trait::async_trait;
use std::collections::HashSet;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Active members in grades 5 and 6, ordered by (grade, class, name)
    async fn load_members(
        &self,
        school_id: i64,
        academic_year: i32,
    ) -> anyhow::Result<Vec<Member>>;

    /// Active rooms ordered by room_id
    async fn load_rooms(&self, school_id: i64) -> anyhow::Result<Vec<LibraryRoom>>;

    /// Member ids assigned to Wednesday or Friday in any active first-half
    /// schedule for (school, year). Empty when no such schedule exists.
    async fn load_prior_wed_fri(
        &self,
        school_id: i64,
        academic_year: i32,
    ) -> anyhow::Result<HashSet<i64>>;

    /// Atomically persist one generation result.
    ///
    /// Within a single transaction: verifies the school exists, deletes any
    /// existing draft for the same (school, year, half) together with its
    /// assignments, inserts the new schedule as a draft, bulk-inserts the
    /// assignments, demotes other active peers to inactive, and promotes the
    /// new schedule to active. Any failure rolls the whole transaction back.
    ///
    /// # Returns
    /// The id of the newly active schedule.
    async fn commit_schedule(
        &self,
        schedule: &NewSchedule,
        assignments: &[Assignment],
    ) -> anyhow::Result<i64>;

    /// Schedule row by id
    async fn load_schedule(&self, schedule_id: i64) -> anyhow::Result<Option<Schedule>>;

    /// Assignment rows joined with names, ordered by (weekday, room, member name)
    async fn load_assignments(&self, schedule_id: i64)
        -> anyhow::Result<Vec<AssignmentRecord>>;
}
