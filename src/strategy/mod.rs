//! Processing strategy module for driving a scenario
//!
//! This module defines the Strategy pattern for running a batch of ledger
//! operations. Two implementations can be selected at runtime:
//!
//! - [`ConcurrentStrategy`]: one tokio task per operation on a multi-threaded
//!   runtime, joined before balances are read.
//! - [`SequentialStrategy`]: operations applied one after another, in launch
//!   order. Used as the reference result.
//!
//! Both produce the same final balances for the fixed scenario.

use crate::cli::StrategyType;
use crate::core::{AccountStore, LockRegistry};
use crate::io::{write_balances, OutputFormat};
use crate::scenario::Scenario;
use crate::types::{LedgerError, OperationRequest};
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentStrategy;
pub use sequential::SequentialStrategy;

/// Configuration shared by all strategies
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    /// Simulated external latency incurred by every operation
    pub latency: Duration,
    /// Worker threads for the concurrent runtime
    pub workers: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(1),
            workers: num_cpus::get(),
        }
    }
}

impl DriverConfig {
    /// Create a new DriverConfig with custom values
    ///
    /// A worker count of zero falls back to the default with a warning.
    pub fn new(latency: Duration, workers: usize) -> Self {
        let default = Self::default();

        let workers = if workers == 0 {
            warn!(
                workers,
                default = default.workers,
                "invalid worker count, using default"
            );
            default.workers
        } else {
            workers
        };

        Self { latency, workers }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Final account state, read after every operation finished
    pub store: AccountStore,
    /// Operations that changed balances
    pub applied: usize,
    /// Operations rejected with a recoverable error
    pub rejected: usize,
    /// Deposits minus withdrawals over applied operations
    pub net_flow: Decimal,
}

impl RunReport {
    pub fn balances(&self) -> Vec<Decimal> {
        self.store.balances()
    }
}

/// Processing strategy trait for running a scenario
pub trait ProcessingStrategy: Send + Sync {
    /// Run every request of `scenario` and return the final state
    ///
    /// Recoverable errors are logged and counted. The first fatal error is
    /// returned once all launched operations have completed.
    fn run(&self, scenario: &Scenario) -> Result<RunReport, LedgerError>;

    /// Run `scenario` and write the final balances to `output`
    fn process(
        &self,
        scenario: &Scenario,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<RunReport, LedgerError> {
        let report = self.run(scenario)?;
        let accounts: Vec<_> = report.store.iter().cloned().collect();
        write_balances(&accounts, format, output)?;
        Ok(report)
    }
}

/// Create a processing strategy based on the specified strategy type
pub fn create_strategy(strategy_type: StrategyType, config: DriverConfig) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sequential => Box::new(SequentialStrategy::new(config)),
        StrategyType::Concurrent => Box::new(ConcurrentStrategy::new(config)),
    }
}

/// Running count of operation outcomes
#[derive(Debug, Default)]
pub(crate) struct Tally {
    applied: usize,
    rejected: usize,
    net_flow: Decimal,
    fatal: Option<LedgerError>,
}

impl Tally {
    /// Account for one finished request
    ///
    /// Recoverable errors are logged here and absorbed. Only the first fatal
    /// error is kept.
    pub(crate) fn record(&mut self, request: &OperationRequest, result: Result<(), LedgerError>) {
        match result {
            Ok(()) => {
                self.applied += 1;
                self.net_flow += request.external_flow();
            }
            Err(e) if e.is_recoverable() => {
                warn!(operation = %request.kind(), amount = %request.amount, "{}", e);
                self.rejected += 1;
            }
            Err(e) => {
                error!(request = %request, "{}", e);
                self.fatal.get_or_insert(e);
            }
        }
    }

    pub(crate) fn has_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    pub(crate) fn record_fatal(&mut self, error: LedgerError) {
        error!("{}", error);
        self.fatal.get_or_insert(error);
    }

    /// Turn the tally into a report, reclaiming the accounts from `registry`
    ///
    /// Every clone of the registry must have been dropped by now.
    pub(crate) fn finish(self, registry: Arc<LockRegistry>) -> Result<RunReport, LedgerError> {
        if let Some(error) = self.fatal {
            return Err(error);
        }

        let registry = Arc::try_unwrap(registry).map_err(|_| LedgerError::TaskFailed {
            message: "lock registry still shared after all operations completed".to_string(),
        })?;

        Ok(RunReport {
            store: registry.into_store(),
            applied: self.applied,
            rejected: self.rejected,
            net_flow: self.net_flow,
        })
    }
}
