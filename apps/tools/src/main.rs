use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use client_core::{derive_dashboard, report::render_report, FixedScoring, ScoringStrategy};
use shared::domain::{AnswerSet, ResultRecord, Scores, RESULTS_STORAGE_KEY};
use storage::{clear_result, load_result, save_result, KeyValueStore, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Inspect and manage the stored assessment result")]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/assessment.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored result as a text report.
    Show,
    /// Write the text report to a file.
    Export { path: PathBuf },
    /// Delete the stored result.
    Clear,
    /// Store a result with fixed category scores.
    Seed {
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        psychometric: u32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        technical: u32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        wiscar: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url)
        .await
        .with_context(|| format!("failed to open {}", cli.database_url))?;

    match cli.command {
        Command::Show => match report(&storage).await? {
            Some(text) => print!("{text}"),
            None => println!("no result stored under '{RESULTS_STORAGE_KEY}'"),
        },
        Command::Export { path } => match report(&storage).await? {
            Some(text) => {
                fs::write(&path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("report written to {}", path.display());
            }
            None => println!("no result stored under '{RESULTS_STORAGE_KEY}'; nothing exported"),
        },
        Command::Clear => {
            if clear_result(&storage).await? {
                println!("cleared '{RESULTS_STORAGE_KEY}'");
            } else {
                println!("nothing to clear");
            }
        }
        Command::Seed {
            psychometric,
            technical,
            wiscar,
        } => {
            let record = seed(
                &storage,
                &FixedScoring::new(psychometric, technical, wiscar),
            )
            .await?;
            println!(
                "stored overall={} recommendation={}",
                record.scores.overall, record.recommendation
            );
        }
    }

    Ok(())
}

/// `RUST_LOG` when set, otherwise `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
}

async fn report(store: &dyn KeyValueStore) -> Result<Option<String>> {
    let record = load_result(store).await?;
    Ok(record.map(|record| render_report(&derive_dashboard(&record))))
}

async fn seed(store: &dyn KeyValueStore, scoring: &dyn ScoringStrategy) -> Result<ResultRecord> {
    let answers = AnswerSet::new();
    let scores = Scores::from_categories(scoring.score(&answers));
    let record = ResultRecord::new(answers, scores, Utc::now());
    save_result(store, &record).await?;
    info!(overall = record.scores.overall, "seeded assessment result");
    Ok(record)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
