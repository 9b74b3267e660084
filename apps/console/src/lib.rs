//! # Drik Kala Console Library
//!
//! The admin console for the Drik Kala storefront: composition root for the
//! stores, plus every command as a plain async function.
//!
//! ## Module Organization
//! ```text
//! kala_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions, dispatch, output
//! ├── config.rs       ◄─── console.toml + KALA_* overrides
//! ├── state/
//! │   └── mod.rs      ◄─── AppState (one Mutex per store)
//! ├── commands/
//! │   ├── product.rs  ◄─── Catalog views, product CRUD
//! │   ├── inquiry.rs  ◄─── Contact form, inquiry inbox
//! │   ├── settings.rs ◄─── Website settings, theme tokens
//! │   └── ...
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ConsoleConfig;
use error::{ApiError, ApiResult};
use kala_db::DbConfig;
use state::AppState;

/// Runs the console with the process arguments.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap; --help / --version exit here                                │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → console.toml → KALA_* env                              │
/// │                                                                         │
/// │  3. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else config log_filter; written to stderr               │
/// │                                                                         │
/// │  4. Determine Database Path ──────────────────────────────────────────► │
/// │     • --db, else config / KALA_DB_PATH, else platform data dir          │
/// │                                                                         │
/// │  5. Connect & Load Stores ────────────────────────────────────────────► │
/// │     • SQLite (WAL), pending migrations, four stores                     │
/// │                                                                         │
/// │  6. Execute Command ──────────────────────────────────────────────────► │
/// │     • result on stdout, errors as [CODE] message, exit code 1           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run_cli(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, json);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> ApiResult<()> {
    // An explicit --config must load; the default location may be absent or broken.
    let (config, load_error) = match cli.config.clone() {
        Some(path) => (ConsoleConfig::load(Some(path))?, None),
        None => ConsoleConfig::load_or_default(None),
    };

    init_tracing(&config.log_filter);
    if let Some(e) = load_error {
        warn!("Failed to load console config: {}. Using defaults.", e);
    }

    let db_path = config.resolve_database_path(cli.db.clone())?;
    info!(?db_path, "Database path determined");

    let state = AppState::open(config, DbConfig::new(db_path)).await?;
    let result = cli::execute(&state, cli.command, cli.json).await;
    state.close().await;

    result
}

fn report(err: &ApiError, json: bool) {
    error!(code = err.code.as_str(), "{}", err.message);

    if json {
        match serde_json::to_string_pretty(err) {
            Ok(rendered) => println!("{}", rendered),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("{}", err);
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kala=trace` - Show trace for kala crates only
/// - Default: `filter` from config (`info,kala=debug,sqlx=warn`)
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // A second init (tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .try_init();
}
