//! SQLite implementation of the schedule repository port.

use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, Sqlite, SqlitePool, Transaction};
use tracing::debug;

use toban_core::{
    Assignment, AssignmentRecord, DomainError, LibraryRoom, Member, NewSchedule, Schedule,
    ScheduleRepository, ScheduleStatus, Weekday,
};

use crate::models::{AssignmentRow, MemberRow, RoomRow, ScheduleRow};

pub struct SqliteScheduleRepository {
    pool: SqlitePool,
}

impl SqliteScheduleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool for transaction creation
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ========================================================================
    // Transaction-aware steps of the commit path
    // ========================================================================

    /// Delete any draft schedule for the same (school, year, half) together
    /// with its assignments, within an existing transaction.
    pub async fn delete_drafts_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        schedule: &NewSchedule,
    ) -> anyhow::Result<()> {
        query(
            "DELETE FROM schedule_assignments
             WHERE schedule_id IN (
                 SELECT id FROM schedules
                 WHERE school_id = ? AND academic_year = ? AND is_first_half = ?
                   AND status = 'draft'
             )",
        )
        .bind(schedule.school_id)
        .bind(schedule.academic_year)
        .bind(schedule.is_first_half)
        .execute(&mut **tx)
        .await
        .context("clearing draft assignments")?;

        query(
            "DELETE FROM schedules
             WHERE school_id = ? AND academic_year = ? AND is_first_half = ?
               AND status = 'draft'",
        )
        .bind(schedule.school_id)
        .bind(schedule.academic_year)
        .bind(schedule.is_first_half)
        .execute(&mut **tx)
        .await
        .context("clearing draft schedules")?;

        Ok(())
    }

    /// Insert the new schedule as a draft within an existing transaction.
    pub async fn insert_draft_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        schedule: &NewSchedule,
    ) -> anyhow::Result<i64> {
        let result = query(
            "INSERT INTO schedules
             (school_id, schedule_name, description, academic_year, is_first_half, status)
             VALUES (?, ?, ?, ?, ?, 'draft')",
        )
        .bind(schedule.school_id)
        .bind(&schedule.name)
        .bind(&schedule.description)
        .bind(schedule.academic_year)
        .bind(schedule.is_first_half)
        .execute(&mut **tx)
        .await
        .context("inserting draft schedule")?;

        Ok(result.last_insert_rowid())
    }

    /// Bulk-insert assignment rows within an existing transaction.
    pub async fn insert_assignments_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        schedule_id: i64,
        assignments: &[Assignment],
    ) -> anyhow::Result<()> {
        for assignment in assignments {
            query(
                "INSERT INTO schedule_assignments
                 (schedule_id, day_of_week, library_room_id, committee_member_id)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(schedule_id)
            .bind(assignment.weekday.number())
            .bind(assignment.room_id)
            .bind(assignment.member_id)
            .execute(&mut **tx)
            .await
            .context("inserting assignment")?;
        }
        Ok(())
    }

    /// Demote active peers and promote the new schedule, within an existing
    /// transaction. A constraint violation while demoting is an activation
    /// conflict.
    pub async fn activate_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        schedule: &NewSchedule,
        schedule_id: i64,
    ) -> anyhow::Result<()> {
        query(
            "UPDATE schedules SET status = 'inactive'
             WHERE school_id = ? AND academic_year = ? AND is_first_half = ?
               AND status = 'active' AND id != ?",
        )
        .bind(schedule.school_id)
        .bind(schedule.academic_year)
        .bind(schedule.is_first_half)
        .bind(schedule_id)
        .execute(&mut **tx)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(_) => anyhow::Error::new(DomainError::ActivationConflict {
                school_id: schedule.school_id,
                academic_year: schedule.academic_year,
            }),
            other => anyhow::Error::new(other),
        })?;

        query("UPDATE schedules SET status = 'active' WHERE id = ?")
            .bind(schedule_id)
            .execute(&mut **tx)
            .await
            .context("activating schedule")?;

        Ok(())
    }
}

fn member_from_row(row: MemberRow) -> Member {
    Member {
        id: row.id,
        name: row.name,
        class_id: row.class_id,
        class_name: row.class_name,
        grade: row.grade as u8,
        position: row.position_name,
        academic_year: row.academic_year as i32,
    }
}

fn weekday_from_db(day_of_week: i64) -> anyhow::Result<Weekday> {
    u8::try_from(day_of_week)
        .ok()
        .and_then(Weekday::from_number)
        .ok_or_else(|| anyhow::anyhow!("stored weekday out of range: {}", day_of_week))
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    async fn load_members(
        &self,
        school_id: i64,
        academic_year: i32,
    ) -> anyhow::Result<Vec<Member>> {
        let rows = query_as::<_, MemberRow>(
            "SELECT cm.id, cm.name, cm.class_id, c.class_name, c.grade,
                    p.position_name, cm.academic_year
             FROM committee_members cm
             JOIN classes c ON cm.class_id = c.id
             LEFT JOIN positions p ON cm.position_id = p.id
             WHERE cm.school_id = ? AND cm.academic_year = ? AND cm.active = 1
               AND c.grade IN (5, 6)
             ORDER BY c.grade, c.class_name, cm.name",
        )
        .bind(school_id)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("loading committee members")?;

        Ok(rows.into_iter().map(member_from_row).collect())
    }

    async fn load_rooms(&self, school_id: i64) -> anyhow::Result<Vec<LibraryRoom>> {
        let rows = query_as::<_, RoomRow>(
            "SELECT id, room_id, room_name, capacity
             FROM library_rooms
             WHERE school_id = ? AND active = 1
             ORDER BY room_id",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await
        .context("loading library rooms")?;

        Ok(rows
            .into_iter()
            .map(|row| LibraryRoom {
                id: row.id,
                room_id: row.room_id,
                name: row.room_name,
                capacity: row.capacity.max(0) as u32,
            })
            .collect())
    }

    async fn load_prior_wed_fri(
        &self,
        school_id: i64,
        academic_year: i32,
    ) -> anyhow::Result<HashSet<i64>> {
        let ids = query_scalar::<_, i64>(
            "SELECT DISTINCT sa.committee_member_id
             FROM schedule_assignments sa
             JOIN schedules s ON s.id = sa.schedule_id
             WHERE s.school_id = ? AND s.academic_year = ?
               AND s.is_first_half = 1 AND s.status = 'active'
               AND sa.day_of_week IN (3, 5)",
        )
        .bind(school_id)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("loading first-half Wednesday/Friday history")?;

        Ok(ids.into_iter().collect())
    }

    async fn commit_schedule(
        &self,
        schedule: &NewSchedule,
        assignments: &[Assignment],
    ) -> anyhow::Result<i64> {
        let mut tx = self.pool.begin().await.context("opening transaction")?;

        let school: Option<i64> = query_scalar("SELECT id FROM schools WHERE id = ?")
            .bind(schedule.school_id)
            .fetch_optional(&mut *tx)
            .await
            .context("checking school")?;
        if school.is_none() {
            return Err(DomainError::SchoolNotFound(schedule.school_id).into());
        }

        Self::delete_drafts_in_tx(&mut tx, schedule).await?;
        let schedule_id = Self::insert_draft_in_tx(&mut tx, schedule).await?;
        Self::insert_assignments_in_tx(&mut tx, schedule_id, assignments).await?;
        Self::activate_in_tx(&mut tx, schedule, schedule_id).await?;

        tx.commit().await.context("committing schedule")?;
        debug!(
            schedule_id,
            assignments = assignments.len(),
            "schedule committed"
        );
        Ok(schedule_id)
    }

    async fn load_schedule(&self, schedule_id: i64) -> anyhow::Result<Option<Schedule>> {
        let row = query_as::<_, ScheduleRow>(
            "SELECT id, school_id, schedule_name, description, academic_year,
                    is_first_half, status
             FROM schedules WHERE id = ?",
        )
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await
        .context("loading schedule")?;

        row.map(|row| {
            let status = ScheduleStatus::parse(&row.status).map_err(anyhow::Error::msg)?;
            Ok(Schedule {
                id: row.id,
                school_id: row.school_id,
                name: row.schedule_name,
                description: row.description,
                academic_year: row.academic_year as i32,
                is_first_half: row.is_first_half != 0,
                status,
            })
        })
        .transpose()
    }

    async fn load_assignments(
        &self,
        schedule_id: i64,
    ) -> anyhow::Result<Vec<AssignmentRecord>> {
        let rows = query_as::<_, AssignmentRow>(
            "SELECT sa.day_of_week, sa.library_room_id, lr.room_name,
                    sa.committee_member_id, cm.name AS member_name,
                    c.class_name, c.grade
             FROM schedule_assignments sa
             JOIN library_rooms lr ON sa.library_room_id = lr.id
             JOIN committee_members cm ON sa.committee_member_id = cm.id
             JOIN classes c ON cm.class_id = c.id
             WHERE sa.schedule_id = ?
             ORDER BY sa.day_of_week, sa.library_room_id, cm.name",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await
        .context("loading schedule assignments")?;

        rows.into_iter()
            .map(|row| {
                Ok(AssignmentRecord {
                    weekday: weekday_from_db(row.day_of_week)?,
                    room_id: row.library_room_id,
                    room_name: row.room_name,
                    member_id: row.committee_member_id,
                    member_name: row.member_name,
                    class_name: row.class_name,
                    grade: row.grade as u8,
                })
            })
            .collect()
    }
}
