//! # smartpos-cli: Command-Line Front End
//!
//! The `smartpos` binary: loads configuration, initializes logging and hands
//! each subcommand to smartpos-core and smartpos-store.
//!
//! ## Module Organization
//! ```text
//! smartpos_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & dispatch)
//! ├── config.rs       ◄─── smartpos.toml + SMARTPOS_* overrides
//! ├── auth.rs         ◄─── Admin credential verifiers
//! ├── output.rs       ◄─── Menu / bill / report rendering
//! ├── commands/
//! │   ├── menu.rs     ◄─── smartpos menu
//! │   ├── bill.rs     ◄─── smartpos bill
//! │   ├── report.rs   ◄─── smartpos report
//! │   └── password.rs ◄─── smartpos hash-password
//! └── error.rs        ◄─── AppError + exit codes
//! ```
//!
//! ## Usage
//! ```text
//! smartpos menu
//! smartpos bill --customer Asha --item "Latte=2" --item "Vada pav=1" --payment UPI
//! smartpos report                     # today, asks for the admin password
//! smartpos report --date 2024-03-09 --json --password "$ADMIN_PW"
//! smartpos hash-password              # prints a value for [admin] password_hash
//! ```

pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use smartpos_store::CsvTransactionStore;

use commands::bill::BillArgs;
use commands::password::HashPasswordArgs;
use commands::report::ReportArgs;
use config::AppConfig;
use error::{AppError, AppResult};

/// Smart POS billing and sales reporting.
#[derive(Debug, Parser)]
#[command(name = "smartpos", version)]
pub struct Cli {
    /// Config file (default: ./smartpos.toml, then the user config directory)
    #[arg(long, global = true, value_name = "PATH", env = "SMARTPOS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the menu with prices
    Menu,

    /// Ring up a sale, save it and print the bill
    Bill(BillArgs),

    /// Daily or all-time sales report (admin only)
    Report(ReportArgs),

    /// Hash an admin password for the config file
    HashPassword(HashPasswordArgs),
}

/// Runs the CLI and returns the process exit code.
///
/// ## Startup Sequence
/// 1. Logging (stderr, `RUST_LOG` overrides the default filter)
/// 2. Argument parsing (clap exits on `--help` / usage errors)
/// 3. Config load and validation
/// 4. Subcommand
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json_errors = wants_json_errors(&cli);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, json_errors);
            err.exit_code()
        }
    }
}

/// Only `report --json` promises machine-readable stdout.
fn wants_json_errors(cli: &Cli) -> bool {
    matches!(&cli.command, Command::Report(args) if args.json)
}

/// `error: <message>` on stderr, or the JSON error body on stdout.
fn print_error(err: &AppError, json: bool) {
    if json {
        let stdout = io::stdout();
        if output::write_error_json(&mut stdout.lock(), err).is_ok() {
            return;
        }
    }
    eprintln!("error: {}", err);
}

/// Dispatches one parsed command.
pub fn execute(cli: Cli) -> AppResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::HashPassword(args) = &cli.command {
        let password = match &args.password {
            Some(password) => password.clone(),
            None => read_secret("Password to hash: ")?,
        };
        return commands::password::run(&password, &mut out);
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    info!(
        sales_file = %config.sales_file.display(),
        tax_rate = %config.tax_rate,
        "Configuration loaded"
    );

    match &cli.command {
        Command::Menu => commands::menu::run(&config, &mut out),

        Command::Bill(args) => {
            let mut store = CsvTransactionStore::new(&config.sales_file);
            let now = Local::now().naive_local();
            commands::bill::run(args, &config, &mut store, now, &mut out).map(|_| ())
        }

        Command::Report(args) => {
            let verifier = auth::verifier_from_config(&config.admin)?;
            let credential = match &args.password {
                Some(password) => password.clone(),
                None => read_secret("Admin password: ")?,
            };
            let store = CsvTransactionStore::new(&config.sales_file);
            let today = Local::now().date_naive();
            commands::report::run(
                args,
                &config,
                &*verifier,
                &credential,
                &store,
                today,
                &mut out,
            )
            .map(|_| ())
        }

        Command::HashPassword(_) => Ok(()),
    }
}

/// Prompts on stderr and reads one line from stdin, without the line break.
fn read_secret(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: `warn,smartpos=info` (completed sales and reports)
/// - `RUST_LOG=smartpos=debug` - store reads and appends
/// - Output goes to stderr so bills and JSON on stdout stay clean
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,smartpos=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
