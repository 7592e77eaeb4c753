//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the sequential and concurrent strategies on the
//! fixed scenario using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! Without latency the numbers show locking and scheduling overhead. With a
//! short latency they show how much of the delay the concurrent strategy
//! overlaps.

use concurrent_ledger::cli::StrategyType;
use concurrent_ledger::strategy::{create_strategy, DriverConfig};
use concurrent_ledger::Scenario;
use std::time::Duration;

fn main() {
    divan::main();
}

fn run(strategy_type: StrategyType, latency: Duration) {
    let strategy = create_strategy(strategy_type, DriverConfig::new(latency, num_cpus::get()));
    strategy
        .run(&Scenario::default())
        .expect("Processing failed");
}

/// Sequential strategy, no latency
#[divan::bench]
fn sequential_no_latency() {
    run(StrategyType::Sequential, Duration::ZERO);
}

/// Concurrent strategy, no latency
#[divan::bench]
fn concurrent_no_latency() {
    run(StrategyType::Concurrent, Duration::ZERO);
}

/// Sequential strategy, 1ms latency per operation
#[divan::bench(sample_count = 10)]
fn sequential_1ms_latency() {
    run(StrategyType::Sequential, Duration::from_millis(1));
}

/// Concurrent strategy, 1ms latency per operation
#[divan::bench(sample_count = 10)]
fn concurrent_1ms_latency() {
    run(StrategyType::Concurrent, Duration::from_millis(1));
}
