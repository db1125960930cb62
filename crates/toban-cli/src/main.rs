use anyhow::Result;
use clap::{Parser, Subcommand};

mod generate;
mod show;

/// Toban CLI - library duty schedule generator
#[derive(Parser)]
#[command(name = "toban")]
#[command(about = "Generate and inspect library duty schedules", long_about = None)]
struct Cli {
    /// Duty database path (default: data/duty.db, overridable via TOBAN_DB_PATH)
    #[arg(short, long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one term's schedule and activate it
    Generate {
        /// School ID
        #[arg(long, default_value_t = 1)]
        school: i64,
        /// Academic year (e.g. 2025)
        #[arg(long)]
        year: i32,
        /// Generate the autumn-winter half instead of spring-summer
        #[arg(long)]
        second_half: bool,
        /// Schedule name (defaults to "<year> first-half schedule" or second-half)
        #[arg(long)]
        name: Option<String>,
        /// Schedule description
        #[arg(long, default_value = "")]
        description: String,
        /// Fixed RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a stored schedule with its assignments
    Show {
        /// Schedule ID
        schedule_id: i64,
        /// Print the schedule and assignments as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let db_path = cli
        .database
        .clone()
        .or_else(|| std::env::var("TOBAN_DB_PATH").ok())
        .unwrap_or_else(|| "data/duty.db".to_string());

    let ok = match cli.command {
        Commands::Generate {
            school,
            year,
            second_half,
            name,
            description,
            seed,
            json,
        } => {
            generate::run(
                &db_path,
                school,
                year,
                !second_half,
                name,
                description,
                seed,
                json,
            )
            .await?
        }
        Commands::Show { schedule_id, json } => show::run(&db_path, schedule_id, json).await?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
