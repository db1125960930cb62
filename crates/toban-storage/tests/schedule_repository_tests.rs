//! Integration tests for the SQLite schedule repository.

use anyhow::Result;
use sqlx::SqlitePool;
use tempfile::TempDir;

use toban_core::{
    Assignment, DomainError, NewSchedule, ScheduleRepository, ScheduleStatus, Weekday,
};
use toban_storage::{init_duty_db, table_exists, SqliteScheduleRepository};

async fn setup() -> Result<(TempDir, SqlitePool, SqliteScheduleRepository)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("duty.db");
    let pool = init_duty_db(path.to_str().unwrap()).await?;
    seed_base(&pool).await?;
    let repo = SqliteScheduleRepository::new(pool.clone());
    Ok((dir, pool, repo))
}

/// One school, four classes (two per grade), eight members, two rooms.
async fn seed_base(pool: &SqlitePool) -> Result<()> {
    sqlx::query("INSERT INTO schools (id, school_name) VALUES (1, 'Central Elementary')")
        .execute(pool)
        .await?;

    let classes = [
        (1, 5, 1, "5-1"),
        (2, 5, 2, "5-2"),
        (3, 6, 1, "6-1"),
        (4, 6, 2, "6-2"),
    ];
    for (id, grade, number, name) in classes {
        sqlx::query(
            "INSERT INTO classes (id, school_id, grade, class_number, class_name)
             VALUES (?, 1, ?, ?, ?)",
        )
        .bind(id)
        .bind(grade)
        .bind(number)
        .bind(name)
        .execute(pool)
        .await?;
    }

    sqlx::query("INSERT INTO positions (id, position_name) VALUES (1, 'chair')")
        .execute(pool)
        .await?;

    let members = [
        (1, 1, "Aoki"),
        (2, 1, "Baba"),
        (3, 2, "Chiba"),
        (4, 2, "Doi"),
        (5, 3, "Endo"),
        (6, 3, "Fuji"),
        (7, 4, "Goto"),
        (8, 4, "Hara"),
    ];
    for (id, class_id, name) in members {
        sqlx::query(
            "INSERT INTO committee_members
             (id, school_id, class_id, position_id, name, academic_year, active)
             VALUES (?, 1, ?, NULL, ?, 2025, 1)",
        )
        .bind(id)
        .bind(class_id)
        .bind(name)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        "INSERT INTO library_rooms (id, school_id, room_id, room_name, capacity, active)
         VALUES (1, 1, 1, 'Main Library', 4, 1), (2, 1, 2, 'Reading Room', 3, 1)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn new_schedule(is_first_half: bool) -> NewSchedule {
    NewSchedule {
        school_id: 1,
        name: "2025 duty schedule".to_string(),
        description: "test".to_string(),
        academic_year: 2025,
        is_first_half,
    }
}

fn assignment(weekday: Weekday, room_id: i64, member_id: i64) -> Assignment {
    Assignment {
        weekday,
        room_id,
        member_id,
    }
}

#[tokio::test]
async fn schema_is_created_by_migrations() -> Result<()> {
    let (_dir, pool, _repo) = setup().await?;
    for table in [
        "schools",
        "classes",
        "committee_members",
        "library_rooms",
        "schedules",
        "schedule_assignments",
    ] {
        assert!(table_exists(&pool, table).await?, "missing table {table}");
    }
    Ok(())
}

#[tokio::test]
async fn load_members_filters_and_orders() -> Result<()> {
    let (_dir, pool, repo) = setup().await?;

    // Out-of-scope rows: inactive, wrong year, grade outside 5-6
    sqlx::query(
        "INSERT INTO classes (id, school_id, grade, class_number, class_name)
         VALUES (9, 1, 4, 1, '4-1')",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "INSERT INTO committee_members
         (id, school_id, class_id, name, academic_year, active)
         VALUES (90, 1, 1, 'Inactive', 2025, 0),
                (91, 1, 1, 'LastYear', 2024, 1),
                (92, 1, 9, 'TooYoung', 2025, 1)",
    )
    .execute(&pool)
    .await?;

    let members = repo.load_members(1, 2025).await?;

    assert_eq!(members.len(), 8);
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Aoki", "Baba", "Chiba", "Doi", "Endo", "Fuji", "Goto", "Hara"]
    );
    assert!(members.iter().all(|m| m.grade == 5 || m.grade == 6));
    assert_eq!(members[0].class_name, "5-1");
    Ok(())
}

#[tokio::test]
async fn load_rooms_filters_inactive_and_orders_by_room_id() -> Result<()> {
    let (_dir, pool, repo) = setup().await?;

    sqlx::query(
        "INSERT INTO library_rooms (id, school_id, room_id, room_name, capacity, active)
         VALUES (3, 1, 0, 'Annex', 2, 1), (4, 1, 9, 'Closed Stack', 2, 0)",
    )
    .execute(&pool)
    .await?;

    let rooms = repo.load_rooms(1).await?;

    let room_ids: Vec<i64> = rooms.iter().map(|r| r.room_id).collect();
    assert_eq!(room_ids, vec![0, 1, 2]);
    assert_eq!(rooms[1].name, "Main Library");
    assert_eq!(rooms[1].capacity, 4);
    Ok(())
}

#[tokio::test]
async fn commit_activates_the_schedule_and_persists_assignments() -> Result<()> {
    let (_dir, _pool, repo) = setup().await?;

    let assignments = vec![
        assignment(Weekday::Monday, 1, 1),
        assignment(Weekday::Tuesday, 2, 1),
        assignment(Weekday::Monday, 2, 3),
    ];
    let schedule_id = repo
        .commit_schedule(&new_schedule(true), &assignments)
        .await?;

    let stored = repo.load_schedule(schedule_id).await?.expect("schedule row");
    assert_eq!(stored.status, ScheduleStatus::Active);
    assert_eq!(stored.academic_year, 2025);
    assert!(stored.is_first_half);

    let records = repo.load_assignments(schedule_id).await?;
    assert_eq!(records.len(), 3);
    // Ordered by (weekday, room, member name)
    assert_eq!(records[0].weekday, Weekday::Monday);
    assert_eq!(records[0].room_id, 1);
    assert_eq!(records[0].member_name, "Aoki");
    assert_eq!(records[1].member_name, "Chiba");
    assert_eq!(records[2].weekday, Weekday::Tuesday);
    Ok(())
}

#[tokio::test]
async fn recommitting_replaces_drafts_and_demotes_the_active_peer() -> Result<()> {
    let (_dir, pool, repo) = setup().await?;

    // A stale draft for the same term should not survive the commit
    sqlx::query(
        "INSERT INTO schedules
         (id, school_id, schedule_name, description, academic_year, is_first_half, status)
         VALUES (77, 1, 'stale draft', '', 2025, 1, 'draft')",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "INSERT INTO schedule_assignments
         (schedule_id, day_of_week, library_room_id, committee_member_id)
         VALUES (77, 1, 1, 1)",
    )
    .execute(&pool)
    .await?;

    let first = repo
        .commit_schedule(&new_schedule(true), &[assignment(Weekday::Monday, 1, 1)])
        .await?;
    let second = repo
        .commit_schedule(&new_schedule(true), &[assignment(Weekday::Tuesday, 1, 2)])
        .await?;

    assert!(repo.load_schedule(77).await?.is_none());

    let first_row = repo.load_schedule(first).await?.expect("first schedule");
    assert_eq!(first_row.status, ScheduleStatus::Inactive);

    let second_row = repo.load_schedule(second).await?.expect("second schedule");
    assert_eq!(second_row.status, ScheduleStatus::Active);

    let active_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM schedules
         WHERE school_id = 1 AND academic_year = 2025 AND is_first_half = 1
           AND status = 'active'",
    )
    .fetch_one(&pool)
    .await?;
    assert_eq!(active_count, 1);
    Ok(())
}

#[tokio::test]
async fn prior_wed_fri_reflects_the_active_first_half_schedule() -> Result<()> {
    let (_dir, _pool, repo) = setup().await?;

    let assignments = vec![
        assignment(Weekday::Monday, 1, 1),
        assignment(Weekday::Wednesday, 1, 2),
        assignment(Weekday::Friday, 2, 3),
        assignment(Weekday::Friday, 2, 2),
        assignment(Weekday::Thursday, 1, 4),
    ];
    repo.commit_schedule(&new_schedule(true), &assignments)
        .await?;

    let prior = repo.load_prior_wed_fri(1, 2025).await?;
    assert_eq!(prior, [2, 3].into_iter().collect());
    Ok(())
}

#[tokio::test]
async fn prior_wed_fri_is_empty_without_history() -> Result<()> {
    let (_dir, _pool, repo) = setup().await?;
    let prior = repo.load_prior_wed_fri(1, 2025).await?;
    assert!(prior.is_empty());
    Ok(())
}

#[tokio::test]
async fn second_half_commit_does_not_feed_the_rotation_lookup() -> Result<()> {
    let (_dir, _pool, repo) = setup().await?;

    repo.commit_schedule(
        &new_schedule(false),
        &[assignment(Weekday::Wednesday, 1, 5)],
    )
    .await?;

    let prior = repo.load_prior_wed_fri(1, 2025).await?;
    assert!(prior.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_school_fails_without_persisting_anything() -> Result<()> {
    let (_dir, pool, repo) = setup().await?;

    let mut schedule = new_schedule(true);
    schedule.school_id = 99;
    let err = repo
        .commit_schedule(&schedule, &[assignment(Weekday::Monday, 1, 1)])
        .await
        .expect_err("commit must fail");

    match err.downcast_ref::<DomainError>() {
        Some(DomainError::SchoolNotFound(99)) => {}
        other => panic!("unexpected error: {:?}", other),
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0);
    Ok(())
}

#[tokio::test]
async fn failed_commit_leaves_no_partial_state() -> Result<()> {
    let (_dir, pool, repo) = setup().await?;

    // Second assignment violates the member foreign key, so the draft and
    // the first assignment must be rolled back with it.
    let assignments = vec![
        assignment(Weekday::Monday, 1, 1),
        assignment(Weekday::Tuesday, 1, 999),
    ];
    let result = repo.commit_schedule(&new_schedule(true), &assignments).await;
    assert!(result.is_err());

    let schedules: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
        .fetch_one(&pool)
        .await?;
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedule_assignments")
        .fetch_one(&pool)
        .await?;
    assert_eq!((schedules, rows), (0, 0));
    Ok(())
}

#[tokio::test]
async fn deleting_a_schedule_cascades_to_its_assignments() -> Result<()> {
    let (_dir, pool, repo) = setup().await?;

    let schedule_id = repo
        .commit_schedule(
            &new_schedule(true),
            &[
                assignment(Weekday::Monday, 1, 1),
                assignment(Weekday::Tuesday, 1, 2),
            ],
        )
        .await?;

    sqlx::query("DELETE FROM schedules WHERE id = ?")
        .bind(schedule_id)
        .execute(&pool)
        .await?;

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedule_assignments")
        .fetch_one(&pool)
        .await?;
    assert_eq!(rows, 0);
    Ok(())
}
