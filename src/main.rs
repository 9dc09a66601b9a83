//! Holocron CLI
//!
//! Interactive terminal search by default, plus a one-shot `search` command.

use clap::{Parser, Subcommand};
use console::style;
use holocron::logging::{self, LogTarget};
use holocron::view::{self, ListView};
use holocron::{AppConfig, HolocronError, SearchOrchestrator, SwapiClient, UiState};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;

/// Holocron - Star Wars character search
///
/// Searches the public Star Wars API by name, caching every successful
/// query for the rest of the session.
#[derive(Parser)]
#[command(name = "holocron")]
#[command(author = "Holocron Contributors")]
#[command(version)]
#[command(about = "Star Wars character search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet period in milliseconds before a typed query is searched
    #[arg(long, global = true, default_value = "300")]
    debounce_ms: u64,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log file for the interactive UI (default: holocron.log next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search (default)
    Tui,

    /// Search once and print the first page of results
    Search {
        /// Name or part of a name (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Print the result page as JSON
        #[arg(long)]
        json: bool,

        /// Seconds to wait for the server before giving up
        #[arg(long, default_value = "60")]
        wait: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = AppConfig {
        debounce: Duration::from_millis(cli.debounce_ms),
        log_level: cli.log_level.clone(),
        log_file: cli.log_file.clone(),
    };

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&config),
        Some(Commands::Search { query, json, wait }) => {
            cmd_search(&config, &query, json, Duration::from_secs(wait))
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Interactive terminal UI
fn cmd_tui(config: &AppConfig) -> holocron::Result<()> {
    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    logging::init(&config.log_level, LogTarget::File(log_path))?;

    holocron::tui::run(config)
}

/// One-shot search command
fn cmd_search(config: &AppConfig, query: &str, json: bool, wait: Duration) -> holocron::Result<()> {
    logging::init(&config.log_level, LogTarget::Stderr)?;

    let mut orchestrator = SearchOrchestrator::new(SwapiClient::new()?);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Searching for '{}'", query.trim()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    orchestrator.handle_query(query);
    let finished = orchestrator.wait_for_fetch(wait);
    spinner.finish_and_clear();

    if !finished {
        return Err(HolocronError::Timeout);
    }

    let state = orchestrator.state();
    if state.ui_state == UiState::Error {
        return Err(HolocronError::SearchFailed(state.error_message.clone()));
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "query": state.query,
                "state": state.ui_state,
                "total_count": state.total_count,
                "has_next_page": state.has_next_page,
                "results": state.characters,
            }))?
        );
        return Ok(());
    }

    match view::list_view(state) {
        ListView::Hidden => {
            println!("{}", style("Nothing to search for.").dim());
        }
        ListView::Empty => {
            println!("{}", style(view::EMPTY_TEXT).yellow());
        }
        ListView::Rows(_) => {
            println!();
            for (i, c) in state.characters.iter().enumerate() {
                println!(
                    "  {} {} {}",
                    style(format!("{:3}.", i + 1)).dim(),
                    style(&c.name).cyan().bold(),
                    style(format!("born {}, {}", c.birth_year, c.gender)).dim()
                );
            }
            println!();
            if let Some(summary) = view::summary_line(state) {
                println!("{}", style(summary).green());
            }
        }
        ListView::Loading | ListView::Error(_) => {}
    }

    Ok(())
}
