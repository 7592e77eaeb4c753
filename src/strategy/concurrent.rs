//! Concurrent processing strategy
//!
//! This module runs a scenario with one tokio task per operation request on
//! a multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! ConcurrentStrategy
//!     ├── DriverConfig (latency, workers)
//!     ├── LockRegistry (one mutex per account, shared via Arc)
//!     └── Ledger (cloned into every task)
//!         └── Latency (awaited after each critical section)
//! ```
//!
//! # Scheduling
//!
//! - Tasks are spawned in launch order (amount-major template expansion)
//! - Operations on disjoint accounts run fully in parallel
//! - Operations on the same account are serialised by its lock, in whatever
//!   order the scheduler picks
//! - The driver joins every task before reading balances; there is no
//!   cancellation and no timeout
//!
//! Each operation's check and mutation happen under its lock, so no update is
//! ever lost. Whenever every balance check passes, additions commute and the
//! final balances are independent of the interleaving. The fixed scenario's
//! margins are wide enough that its checks pass unless tasks run whole
//! rounds out of launch order.

use crate::core::{latency_for, Ledger, LockRegistry};
use crate::scenario::Scenario;
use crate::strategy::{DriverConfig, ProcessingStrategy, RunReport, Tally};
use crate::types::LedgerError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Multi-threaded, one-task-per-operation processing strategy
#[derive(Debug, Clone)]
pub struct ConcurrentStrategy {
    config: DriverConfig,
}

impl ConcurrentStrategy {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for ConcurrentStrategy {
    fn run(&self, scenario: &Scenario) -> Result<RunReport, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers)
            .enable_time()
            .build()
            .map_err(|e| LedgerError::Runtime {
                message: e.to_string(),
            })?;

        // Every lock exists before the first task is spawned
        let registry = Arc::new(LockRegistry::new(scenario.account_store()));
        let ledger = Ledger::new(Arc::clone(&registry), latency_for(self.config.latency));
        let requests = scenario.requests();
        let start = Instant::now();

        info!(
            requests = requests.len(),
            workers = self.config.workers,
            "starting concurrent run"
        );

        let results = runtime.block_on(async {
            let tasks: Vec<_> = requests
                .iter()
                .map(|request| {
                    let ledger = ledger.clone();
                    let request = *request;
                    tokio::spawn(async move { ledger.apply(request).await })
                })
                .collect();

            join_all(tasks).await
        });

        // Tasks have finished; shutting the runtime down releases their ledger clones
        drop(runtime);
        drop(ledger);

        let mut tally = Tally::default();
        for (request, joined) in requests.iter().zip(results) {
            match joined {
                Ok(result) => tally.record(request, result),
                Err(e) => tally.record_fatal(LedgerError::TaskFailed {
                    message: e.to_string(),
                }),
            }
        }

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "concurrent run complete"
        );
        tally.finish(registry)
    }
}
