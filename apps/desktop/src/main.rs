use std::{io::Write as _, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    landing::landing_content, open_results, report::render_report, AdvanceOutcome,
    AssessmentFlow, FlowError, Navigator, RandomScoring, RecordingNavigator, View,
};
use shared::domain::QuestionCatalog;
use storage::{KeyValueStore, Storage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod prompt;

use prompt::{parse_input, render_landing, render_question, Input};

#[derive(Parser, Debug)]
#[command(about = "Take the readiness assessment in the terminal")]
struct Args {
    #[arg(long, default_value = "sqlite://./data/assessment.db")]
    database_url: String,
    /// How long the completing screen stays up before results are shown.
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the stored results without taking the assessment.
    Results,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let storage = Storage::new(&args.database_url)
        .await
        .with_context(|| format!("failed to open {}", args.database_url))?;
    let navigator = RecordingNavigator::new();

    match args.command {
        Some(Command::Results) => {
            navigator.navigate(View::Results);
            show_results(&storage, &navigator).await
        }
        None => {
            navigator.navigate(View::Landing);
            let finished = run_assessment(&storage, &navigator, args.delay_ms).await?;
            if finished {
                show_results(&storage, &navigator).await?;
            }
            Ok(())
        }
    }
}

/// Returns whether the flow reached the results view.
async fn run_assessment(
    storage: &Storage,
    navigator: &RecordingNavigator,
    delay_ms: u64,
) -> Result<bool> {
    let landing = landing_content();
    println!("{}", render_landing(&landing));
    println!("Press Enter to {} or q to quit.", landing.start_label);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    match lines.next_line().await? {
        Some(line) if !line.trim().eq_ignore_ascii_case("q") => {}
        _ => return Ok(false),
    }
    navigator.navigate(View::Assessment);

    let store: Arc<dyn KeyValueStore> = Arc::new(storage.clone());
    let mut flow = AssessmentFlow::new(
        Arc::new(QuestionCatalog::builtin()),
        store,
        Arc::new(RandomScoring),
    )
    .with_completion_delay(Duration::from_millis(delay_ms));

    loop {
        print!("{}> ", render_question(&flow.snapshot()));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            info!(flow_id = %flow.flow_id(), "input closed before completion");
            return Ok(false);
        };

        match parse_input(&line, flow.current_question()) {
            Input::Quit => {
                println!("Assessment abandoned; nothing was saved.");
                return Ok(false);
            }
            Input::Previous => {
                if !flow.retreat() {
                    println!("Already at the first question.");
                }
            }
            Input::Answer(value) => {
                let question_id = flow.current_question().id.clone();
                if let Err(err) = flow.record_answer(&question_id, value) {
                    println!("{err}");
                }
            }
            Input::Next => match flow.advance().await {
                Err(FlowError::Storage(err)) => {
                    println!("Could not save your results: {err:#}");
                    println!("Press n to try again or q to quit.");
                }
                Err(err) => return Err(err.into()),
                Ok(AdvanceOutcome::Blocked) => {
                    println!("Please answer this question before continuing.");
                }
                Ok(AdvanceOutcome::Moved { .. }) => {}
                Ok(AdvanceOutcome::Completed(completion)) => {
                    println!();
                    println!("Completing Assessment");
                    println!("Analyzing your responses and generating personalized recommendations...");
                    completion.navigation.deliver(navigator).await;
                    return Ok(true);
                }
                Ok(AdvanceOutcome::AlreadyCompleted) => return Ok(true),
            },
            Input::Invalid(message) => println!("{message}"),
        }
    }
}

async fn show_results(storage: &Storage, navigator: &RecordingNavigator) -> Result<()> {
    match open_results(storage, navigator).await? {
        Some(dashboard) => print!("{}", render_report(&dashboard)),
        None => {
            let view = navigator.current().unwrap_or(View::Landing);
            println!("No assessment results found; returning to {}.", view.path());
            println!();
            println!("{}", render_landing(&landing_content()));
            println!("Run `desktop` to take the assessment.");
        }
    }
    Ok(())
}
