use crate::io::OutputFormat;
use crate::strategy::DriverConfig;
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Simulate concurrent deposits, withdrawals and transfers across a fixed set of accounts
#[derive(Parser, Debug)]
#[command(name = "concurrent-ledger")]
#[command(about = "Simulate concurrent updates to a fixed set of bank accounts", long_about = None)]
pub struct CliArgs {
    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "concurrent",
        help = "Processing strategy: 'sequential' for one operation at a time or 'concurrent' for one task per operation"
    )]
    pub strategy: StrategyType,

    /// Simulated latency per operation, in milliseconds
    #[arg(
        long = "latency-ms",
        value_name = "MILLIS",
        default_value_t = 1000,
        help = "Simulated external latency incurred after each operation (default: 1000)"
    )]
    pub latency_ms: u64,

    /// Number of worker threads (concurrent mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Worker threads for the concurrent runtime (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Output format for the final balances
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Output format: 'text' or 'csv'"
    )]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Diagnostic log filter, e.g. 'warn' or 'concurrent_ledger=debug' (RUST_LOG takes precedence)"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sequential,
    Concurrent,
}

impl CliArgs {
    /// Create a DriverConfig from CLI arguments
    ///
    /// Falls back to the default worker count when none is given; a worker
    /// count of zero is replaced by the default with a warning.
    pub fn to_driver_config(&self) -> DriverConfig {
        let latency = Duration::from_millis(self.latency_ms);
        match self.workers {
            Some(workers) => DriverConfig::new(latency, workers),
            None => DriverConfig {
                latency,
                ..DriverConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program"], StrategyType::Concurrent)]
    #[case::explicit_sequential(&["program", "--strategy", "sequential"], StrategyType::Sequential)]
    #[case::explicit_concurrent(&["program", "--strategy", "concurrent"], StrategyType::Concurrent)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sequential, StrategyType::Sequential) => (),
            (StrategyType::Concurrent, StrategyType::Concurrent) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[rstest]
    #[case::defaults(&["program"], OutputFormat::Text, "warn")]
    #[case::csv(&["program", "--format", "csv"], OutputFormat::Csv, "warn")]
    #[case::log_level(&["program", "--log-level", "debug"], OutputFormat::Text, "debug")]
    fn test_output_options(
        #[case] args: &[&str],
        #[case] format: OutputFormat,
        #[case] log_level: &str,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.format, format);
        assert_eq!(parsed.log_level, log_level);
    }

    #[rstest]
    #[case::all_defaults(&["program"], Duration::from_secs(1), num_cpus::get())]
    #[case::no_latency(&["program", "--latency-ms", "0"], Duration::ZERO, num_cpus::get())]
    #[case::custom_workers(&["program", "--workers", "8"], Duration::from_secs(1), 8)]
    #[case::zero_workers_fall_back(&["program", "--workers", "0"], Duration::from_secs(1), num_cpus::get())]
    #[case::all_custom(
        &["program", "--latency-ms", "250", "--workers", "2"],
        Duration::from_millis(250),
        2
    )]
    fn test_driver_config_conversion(
        #[case] args: &[&str],
        #[case] expected_latency: Duration,
        #[case] expected_workers: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_driver_config();

        assert_eq!(config.latency, expected_latency);
        assert_eq!(config.workers, expected_workers);
    }

    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "parallel"])]
    #[case::invalid_format(&["program", "--format", "json"])]
    #[case::negative_latency(&["program", "--latency-ms", "-1"])]
    #[case::unexpected_positional(&["program", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
