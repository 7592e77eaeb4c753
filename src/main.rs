//! Concurrent Ledger CLI
//!
//! Runs the fixed account scenario and prints the final balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --strategy sequential
//! cargo run -- --strategy concurrent --workers 8 --latency-ms 100
//! cargo run -- --format csv > balances.csv
//! RUST_LOG=concurrent_ledger=debug cargo run -- --latency-ms 0
//! ```
//!
//! Final balances go to stdout; diagnostics (insufficient funds, run timing)
//! go to stderr through `tracing`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (unregistered account, runtime failure, output error)

use concurrent_ledger::cli;
use concurrent_ledger::strategy;
use concurrent_ledger::Scenario;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // RUST_LOG wins over --log-level when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let strategy = strategy::create_strategy(args.strategy.clone(), args.to_driver_config());

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&Scenario::default(), args.format, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
