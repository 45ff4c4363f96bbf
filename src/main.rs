use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

mod db;
mod founder;
mod goals;
mod health;
mod input;
mod models;
mod normalize;
mod report;

use crate::founder::FounderSignalInput;
use crate::health::BusinessHealthInput;
use crate::input::overlay;
use crate::models::FounderProfile;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Parser)]
#[command(name = "prospra-metrics")]
#[command(about = "Founder score, business health and goal progress for Prospra", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a demo founder profile and goals
    Seed,
    /// Import goals from a CSV file
    ImportGoals {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Compute a founder score from JSON signals and print it as JSON
    FounderScore(FounderScoreArgs),
    /// Map business health scores to indicators and print them as JSON
    Health(HealthArgs),
    /// List a user's goals with progress and status
    Goals {
        #[arg(long)]
        user: Uuid,
    },
    /// Write a markdown dashboard for a user
    Dashboard {
        #[arg(long)]
        user: Uuid,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct FounderScoreArgs {
    /// JSON file with founder signals, or `-` for stdin
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    clarity: Option<f64>,
    #[arg(long)]
    execution: Option<f64>,
    #[arg(long)]
    strategy: Option<f64>,
    #[arg(long)]
    consistency: Option<f64>,
    #[arg(long)]
    market_readiness: Option<f64>,
    #[arg(long)]
    website_score: Option<f64>,
    #[arg(long)]
    journal_consistency: Option<f64>,
    #[arg(long)]
    goal_progress: Option<f64>,
}

impl FounderScoreArgs {
    fn signals(&self) -> anyhow::Result<FounderSignalInput> {
        let mut signals: FounderSignalInput = input::read_input(self.input.as_deref())?;
        overlay(&mut signals.clarity, self.clarity);
        overlay(&mut signals.execution, self.execution);
        overlay(&mut signals.strategy, self.strategy);
        overlay(&mut signals.consistency, self.consistency);
        overlay(&mut signals.market_readiness, self.market_readiness);
        overlay(&mut signals.website_score, self.website_score);
        overlay(&mut signals.journal_consistency, self.journal_consistency);
        overlay(&mut signals.goal_progress, self.goal_progress);
        Ok(signals)
    }
}

#[derive(Args)]
struct HealthArgs {
    /// JSON file with health scores, or `-` for stdin
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    traffic: Option<f64>,
    #[arg(long)]
    lead_flow: Option<f64>,
    #[arg(long)]
    offer_clarity: Option<f64>,
    #[arg(long)]
    funnel_strength: Option<f64>,
    #[arg(long)]
    momentum: Option<f64>,
}

impl HealthArgs {
    fn scores(&self) -> anyhow::Result<BusinessHealthInput> {
        let mut scores: BusinessHealthInput = input::read_input(self.input.as_deref())?;
        overlay(&mut scores.traffic_score, self.traffic);
        overlay(&mut scores.lead_flow_score, self.lead_flow);
        overlay(&mut scores.offer_clarity_score, self.offer_clarity);
        overlay(&mut scores.funnel_strength_score, self.funnel_strength);
        overlay(&mut scores.momentum_score, self.momentum);
        Ok(scores)
    }
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prospra_metrics=info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;
    let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(value) => value
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
        Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        error!("command failed: {err:#}");
        return Err(err);
    }

    Ok(())
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            let user_id = db::seed(&pool).await?;
            println!("Seed data inserted for user {user_id}.");
        }
        Commands::ImportGoals { csv } => {
            let pool = connect().await?;
            let inserted = db::import_goals_csv(&pool, &csv).await?;
            println!("Inserted {inserted} goals from {}.", csv.display());
        }
        Commands::FounderScore(args) => {
            let result = founder::compute_founder_score(&args.signals()?);
            info!(total = result.total_score, tier = %result.tier, "computed founder score");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Health(args) => {
            let indicators = health::compute_business_health_indicators(&args.scores()?);
            println!("{}", serde_json::to_string_pretty(&indicators)?);
        }
        Commands::Goals { user } => {
            let pool = connect().await?;
            let user_goals = db::fetch_goals(&pool, user).await?;

            if user_goals.is_empty() {
                println!("No goals found for this user.");
                return Ok(());
            }

            println!("Goals by creation date:");
            for goal in &user_goals {
                println!(
                    "- {} ({}) {} / {} progress {:.0}% {}",
                    goal.label,
                    goal.period.as_str(),
                    goal.current_value,
                    goal.target_value,
                    goals::compute_goal_progress(goal) * 100.0,
                    goals::goal_status(goal)
                );
            }
            println!(
                "Average progress {:.0}% across {} goals",
                goals::average_goal_progress(&user_goals) * 100.0,
                user_goals.len()
            );
        }
        Commands::Dashboard { user, out } => {
            let pool = connect().await?;
            let profile = match db::fetch_profile(&pool, user).await? {
                Some(profile) => profile,
                None => {
                    info!(%user, "no founder profile stored, using defaults");
                    FounderProfile::empty(user)
                }
            };
            let goals = db::fetch_goals(&pool, user).await?;
            let report = report::build_report(&profile, &goals, chrono::Utc::now().date_naive());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
    }

    Ok(())
}
