//! Sequential processing strategy
//!
//! Applies every request one after another, in launch order, on a
//! current-thread runtime. No two operations ever overlap, so this strategy
//! gives the reference result the concurrent strategy must reproduce. It
//! goes through the same [`Ledger`] and lock registry as the concurrent
//! strategy; the locks are simply never contended.
//!
//! The latency hook still runs after each operation, so a sequential run
//! takes roughly `requests x latency`.

use crate::core::{latency_for, Ledger, LockRegistry};
use crate::scenario::Scenario;
use crate::strategy::{DriverConfig, ProcessingStrategy, RunReport, Tally};
use crate::types::LedgerError;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Single-threaded, in-order processing strategy
#[derive(Debug, Clone)]
pub struct SequentialStrategy {
    config: DriverConfig,
}

impl SequentialStrategy {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for SequentialStrategy {
    fn run(&self, scenario: &Scenario) -> Result<RunReport, LedgerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| LedgerError::Runtime {
                message: e.to_string(),
            })?;

        let registry = Arc::new(LockRegistry::new(scenario.account_store()));
        let ledger = Ledger::new(Arc::clone(&registry), latency_for(self.config.latency));
        let requests = scenario.requests();
        let start = Instant::now();

        info!(requests = requests.len(), "starting sequential run");

        let mut tally = Tally::default();
        runtime.block_on(async {
            for request in &requests {
                let result = ledger.apply(*request).await;
                tally.record(request, result);
                // Nothing else is running, so a fatal error ends the run here
                if tally.has_fatal() {
                    break;
                }
            }
        });
        drop(ledger);

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "sequential run complete"
        );
        tally.finish(registry)
    }
}
