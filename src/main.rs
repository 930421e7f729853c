use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::Event;

use kf_backtest::backtest::{rolling_backtest, summarize};
use kf_backtest::config::{Config, DEFAULT_CONFIG_PATH, DEFAULT_RESULTS_PATH};
use kf_backtest::data::{load_prices, read_results, write_results};
use kf_backtest::input::parse_viewer_command;
use kf_backtest::ui::{self, ViewerState};

const VIEWER_LOG_PATH: &str = "kf-backtest.log";
const VIEWER_POLL_MS: u64 = 250;

/// Rolling-window backtest of a scalar Kalman-filter return forecaster.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load prices, run the backtest and write the result table
    Run {
        /// Path to the TOML config file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Browse a result table in the terminal
    View {
        /// Result table to open (defaults to output.results_path from the config)
        #[arg(long)]
        results: Option<PathBuf>,
        /// Path to the TOML config file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config } => run(&config),
        Commands::View { results, config } => view(results, &config),
    }
}

fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::try_new(level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    })
}

fn run(config_path: &Path) -> Result<()> {
    let config = match Config::load_from_path(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    let params = config.backtest()?;
    tracing::info!(
        config = %config_path.display(),
        source = ?config.data.source,
        horizon = params.horizon(),
        r = params.measure_var(),
        q = params.process_var(),
        "Starting kf-backtest"
    );

    let prices = load_prices(&config.data)?;
    let returns = prices.log_returns();
    let results = rolling_backtest(&returns, &params).context("backtest failed")?;

    for summary in summarize(&results) {
        tracing::info!(
            ticker = %summary.ticker,
            windows = summary.windows,
            mean_mae = summary.mean_mae,
            "Ticker summary"
        );
    }

    let out = &config.output.results_path;
    write_results(out, &results)
        .with_context(|| format!("failed to write results to {}", out.display()))?;
    tracing::info!(path = %out.display(), rows = results.len(), "Saved results");
    println!("Saved results to {}", out.display());
    Ok(())
}

fn view(results: Option<PathBuf>, config_path: &Path) -> Result<()> {
    // The viewer needs no data credentials, only the output path and log level.
    let config = std::fs::read_to_string(config_path)
        .ok()
        .and_then(|s| Config::parse(&s).ok());
    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    let path = results
        .or_else(|| config.map(|c| c.output.results_path))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_PATH));

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create(VIEWER_LOG_PATH)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&level))
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    if !path.exists() {
        tracing::error!(path = %path.display(), "Results file not found");
        eprintln!(
            "No results found at '{}'. Run the backtest first.",
            path.display()
        );
        std::process::exit(1);
    }
    let rows = read_results(&path)
        .with_context(|| format!("failed to read results from {}", path.display()))?;
    let mut state = ViewerState::new(&path.display().to_string(), rows);
    tracing::info!(path = %path.display(), rows = state.rows.len(), "Opened results");

    let mut terminal = ratatui::init();
    let outcome = viewer_loop(&mut terminal, &mut state);
    ratatui::restore();
    outcome
}

fn viewer_loop(terminal: &mut ratatui::DefaultTerminal, state: &mut ViewerState) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, state))?;

        if crossterm::event::poll(Duration::from_millis(VIEWER_POLL_MS))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if let Some(cmd) = parse_viewer_command(&key.code) {
                    if !state.apply(cmd) {
                        tracing::info!("User quit");
                        return Ok(());
                    }
                }
            }
        }
    }
}
