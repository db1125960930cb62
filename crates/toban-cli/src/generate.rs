use std::sync::Arc;

use anyhow::Result;
use colored::*;
use toban_core::{GenerationRequest, GenerationService, Weekday};
use toban_storage::{init_duty_db, SqliteScheduleRepository};

/// Run one generation and render the result envelope.
///
/// Returns whether the generation succeeded so the caller can set the exit
/// code.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    db_path: &str,
    school: i64,
    year: i32,
    is_first_half: bool,
    name: Option<String>,
    description: String,
    seed: Option<u64>,
    json: bool,
) -> Result<bool> {
    let half = if is_first_half {
        "first-half"
    } else {
        "second-half"
    };
    let name = name.unwrap_or_else(|| format!("{} {} schedule", year, half));

    if !json {
        println!(
            "🗓  {}",
            format!("Generating {} for school {}", name, school)
                .bright_cyan()
                .bold()
        );
        println!("   {}: {}", "Database".dimmed(), db_path.dimmed());
        println!();
    }

    let pool = init_duty_db(db_path).await?;
    let repo = Arc::new(SqliteScheduleRepository::new(pool));
    let service = GenerationService::new(repo);

    let request = GenerationRequest {
        school_id: school,
        academic_year: year,
        is_first_half,
        name,
        description,
    };

    let outcome = match seed {
        Some(seed) => service.generate_seeded(request, seed).await,
        None => service.generate(request).await,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(outcome.success);
    }

    if !outcome.success {
        println!("❌ {}", outcome.message.red().bold());
        for error in &outcome.errors {
            println!("   {}", error.red());
        }
        return Ok(false);
    }

    println!("✅ {}", "Schedule generated!".green().bold());
    println!();
    if let Some(schedule_id) = outcome.schedule_id {
        println!(
            "   {}: {}",
            "Schedule ID".bright_white().bold(),
            schedule_id.to_string().bright_cyan().bold()
        );
    }

    if let Some(stats) = &outcome.statistics {
        println!(
            "   {}: {} across {} members and {} rooms (mean {:.1})",
            "Assignments".bright_white().bold(),
            stats.assignment_count.to_string().bright_cyan(),
            stats.member_count,
            stats.room_count,
            stats.mean_assignments_per_member
        );
        println!();

        for day in Weekday::ALL {
            let on_duty = stats
                .weekday_counts
                .iter()
                .find(|w| w.weekday == day)
                .map_or(0, |w| w.members);
            println!("   {} {} on duty", day.label().bright_magenta(), on_duty);
            for roster in stats.room_rosters.iter().filter(|r| r.weekday == day) {
                if roster.members.is_empty() {
                    continue;
                }
                println!(
                    "      {}: {}",
                    roster.room_name.dimmed(),
                    roster.members.join(", ")
                );
            }
        }
    }

    if !outcome.warnings.is_empty() {
        println!();
        for warning in &outcome.warnings {
            println!("   ⚠ {}", warning.yellow());
        }
    }

    Ok(true)
}
