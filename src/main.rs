//! Rust Bank App CLI
//!
//! Command-line front end replaying a script of banking intents against the
//! demo bank.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv
//! cargo run -- --silent script.csv
//! cargo run -- --format csv script.csv > accounts.csv
//! cargo run -- --roster roster.csv --strategy async --batch-size 16 script.csv
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` (default `warn`) to adjust verbosity.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable script or roster, invalid roster, etc.)

use rust_bank_app::cli;
use rust_bank_app::core::Bank;
use rust_bank_app::io::open_roster;
use rust_bank_app::strategy;
use rust_bank_app::BankError;
use std::process;
use tracing_subscriber::EnvFilter;

fn load_bank(args: &cli::CliArgs) -> Result<Bank, BankError> {
    match &args.roster_file {
        Some(path) => Bank::from_profiles(open_roster(path)?),
        None => Bank::demo(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut bank = match load_bank(&args) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    tracing::info!(accounts = bank.accounts().len(), "bank ready");

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy::run(
        strategy.as_ref(),
        &mut bank,
        &args.script_file,
        args.format,
        args.silent,
        &mut output,
    ) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
