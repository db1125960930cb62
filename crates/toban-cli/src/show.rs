use anyhow::Result;
use colored::*;
use toban_core::{ScheduleRepository, Weekday};
use toban_storage::{init_duty_db, SqliteScheduleRepository};

/// Print a stored schedule with its assignments grouped by weekday.
pub async fn run(db_path: &str, schedule_id: i64, json: bool) -> Result<bool> {
    let pool = init_duty_db(db_path).await?;
    let repo = SqliteScheduleRepository::new(pool);

    let Some(schedule) = repo.load_schedule(schedule_id).await? else {
        println!(
            "❌ {}",
            format!("No schedule with id {}", schedule_id).red().bold()
        );
        return Ok(false);
    };
    let assignments = repo.load_assignments(schedule_id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "schedule": schedule,
                "assignments": assignments,
            }))?
        );
        return Ok(true);
    }

    let half = if schedule.is_first_half {
        "first half"
    } else {
        "second half"
    };
    println!(
        "🗓  {} ({} {}, {})",
        schedule.name.bright_cyan().bold(),
        schedule.academic_year,
        half,
        schedule.status.to_string().bright_magenta()
    );
    if !schedule.description.is_empty() {
        println!("   {}", schedule.description.dimmed());
    }
    println!();

    for day in Weekday::ALL {
        let on_day: Vec<_> = assignments.iter().filter(|a| a.weekday == day).collect();
        if on_day.is_empty() {
            continue;
        }
        println!("   {}", day.label().bright_magenta().bold());
        for record in on_day {
            println!(
                "      {:<16} {} ({}, grade {})",
                record.room_name.dimmed(),
                record.member_name,
                record.class_name,
                record.grade
            );
        }
    }
    println!();
    println!("   {} assignments", assignments.len());

    Ok(true)
}
