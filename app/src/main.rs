// In app/src/main.rs

use analytics::{AnalyticsEngine, PerformanceReport, TradeFilter, time_range};
use anyhow::Result;
use app_config::AnalyticsSettings;
use clap::{Args, Parser, Subcommand};
use core_types::{Direction, Outcome, Session};
use database::{MemoryStore, TradeStore, build_report};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use web_server::AppState;

mod export;
mod printer;

use crate::export::JournalExport;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Performance analytics for a trading journal.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the dashboard API server.
    Serve,

    /// Prints a performance report for a user's trades in the database.
    Report {
        /// The journal user to report on.
        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Prints a performance report for a JSON journal export.
    Analyze {
        /// Path to the export file.
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Derive the session of trades that never recorded one from their entry time.
        #[arg(long)]
        infer_sessions: bool,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// The dashboard filters, shared by `report` and `analyze`.
#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    #[arg(long)]
    account: Option<String>,

    #[arg(long)]
    strategy: Option<String>,

    /// AS, LO, NY or OTHER.
    #[arg(long)]
    session: Option<Session>,

    /// LONG or SHORT.
    #[arg(long)]
    direction: Option<Direction>,

    /// win or loss.
    #[arg(long)]
    outcome: Option<Outcome>,

    /// today, yesterday, 3days, 7days, 30days or 60days. An empty value means all time.
    #[arg(long)]
    range: Option<String>,

    /// Account size the equity curve starts from.
    #[arg(long, value_parser = parse_starting_capital)]
    starting_capital: Option<Decimal>,
}

fn parse_starting_capital(value: &str) -> std::result::Result<Decimal, String> {
    let capital: Decimal = value.trim().parse().map_err(|e| format!("not a decimal number: {e}"))?;
    analytics::check_starting_capital(capital)
}

impl FilterArgs {
    fn to_filter(&self, default_range: &str) -> TradeFilter {
        TradeFilter {
            account_id: self.account.clone(),
            strategy_id: self.strategy.clone(),
            session: self.session,
            direction: self.direction,
            outcome: self.outcome,
            range: time_range::resolve(self.range.as_deref().unwrap_or(default_range)),
        }
    }

    fn engine(&self, analytics: &AnalyticsSettings) -> AnalyticsEngine {
        let engine = AnalyticsEngine::new(analytics.report_config());
        match self.starting_capital {
            Some(capital) => engine.with_starting_capital(capital),
            None => engine,
        }
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("sqlx::query", tracing::Level::WARN) // Disable sqlx query debug logs
            .with_default(tracing::Level::INFO));
    tracing_subscriber::registry().with(fmt_layer).init();

    // Parse command-line arguments.
    let cli = Cli::parse();

    tracing::info!("Starting tradelog");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Serve => {
            handle_serve().await?;
        }
        Commands::Report { user, filters, json } => {
            handle_report(&user, &filters, json).await?;
        }
        Commands::Analyze {
            file,
            filters,
            infer_sessions,
            json,
        } => {
            handle_analyze(file, &filters, infer_sessions, json).await?;
        }
    }

    tracing::info!("tradelog has finished successfully.");

    Ok(())
}

async fn handle_serve() -> Result<()> {
    // --- 1. Initialization ---
    let settings = app_config::load_settings()?;
    tracing::info!("Application settings loaded successfully.");

    let db = database::connect(&settings.database).await?;
    tracing::info!("Database connection established and migrations are up-to-date.");

    // --- 2. Serve ---
    let state = AppState::new(Arc::new(db), &settings.analytics);
    web_server::run(&settings.server, state).await?;

    Ok(())
}

async fn handle_report(user: &str, filters: &FilterArgs, json: bool) -> Result<()> {
    let settings = app_config::load_settings()?;
    let db = database::connect(&settings.database).await?;

    let filter = filters.to_filter(&settings.analytics.default_time_range);
    let engine = filters.engine(&settings.analytics);
    let report = build_report(&db, &engine, user, &filter).await?;

    print_report(&report, json)
}

async fn handle_analyze(file: PathBuf, filters: &FilterArgs, infer_sessions: bool, json: bool) -> Result<()> {
    // Settings are optional here; an export can be analysed without a config directory.
    let analytics = match app_config::load_settings() {
        Ok(settings) => settings.analytics,
        Err(e) => {
            tracing::debug!(error = %e, "No settings found, using analytics defaults.");
            AnalyticsSettings::default()
        }
    };

    let mut export = JournalExport::load(&file)?;
    if infer_sessions {
        let filled = export.infer_missing_sessions();
        tracing::info!(filled, "Inferred sessions from entry times.");
    }

    // Every trade in the file is treated as belonging to one local user.
    const LOCAL_USER: &str = "local";
    let store = MemoryStore::for_user(LOCAL_USER, export.trades, export.strategies);
    if store.is_empty() {
        tracing::warn!(file = %file.display(), "Export contains no trades.");
    }

    let filter = filters.to_filter(&analytics.default_time_range);
    let engine = filters.engine(&analytics);
    let report = build_report(&store as &dyn TradeStore, &engine, LOCAL_USER, &filter).await?;

    print_report(&report, json)
}

fn print_report(report: &PerformanceReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", printer::render_report(report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_parses_analyze_filters() {
        let cli = Cli::try_parse_from([
            "tradelog", "analyze", "--file", "export.json", "--session", "ny",
            "--outcome", "win", "--range", "", "--starting-capital", "2500", "--json",
        ])
        .unwrap();

        let Commands::Analyze { file, filters, json, infer_sessions } = cli.command else {
            panic!("expected the analyze command");
        };
        assert_eq!(file, PathBuf::from("export.json"));
        assert!(json);
        assert!(!infer_sessions);

        let filter = filters.to_filter("7days");
        assert_eq!(filter.session, Some(Session::NewYork));
        assert_eq!(filter.outcome, Some(Outcome::Win));
        assert_eq!(filter.range, None);

        let engine = filters.engine(&AnalyticsSettings::default());
        assert_eq!(engine.config().starting_capital, dec!(2500));
    }

    #[test]
    fn test_cli_rejects_unknown_direction() {
        let result = Cli::try_parse_from(["tradelog", "report", "--user", "u-1", "--direction", "up"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_capital() {
        for capital in ["79228162514264337593543950335", "-10", "lots"] {
            let result = Cli::try_parse_from([
                "tradelog", "analyze", "--file", "export.json", "--starting-capital", capital,
            ]);
            assert!(result.is_err(), "{capital} should be rejected");
        }
    }

    #[test]
    fn test_default_range_applies_when_omitted() {
        let filter = FilterArgs::default().to_filter("today");
        let range = filter.range.unwrap();
        assert_eq!(range.start, range.end);
    }
}
