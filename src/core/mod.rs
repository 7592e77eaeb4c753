//! Core business logic module
//!
//! This module contains the concurrency-critical components:
//! - `account_store` - Unsynchronised, ordered account storage
//! - `lock_registry` - One lock per account, ordered two-account locking
//! - `ledger` - Deposit, withdraw and transfer operations
//! - `latency` - Injectable simulated-I/O delay

pub mod account_store;
pub mod latency;
pub mod ledger;
pub mod lock_registry;

pub use account_store::AccountStore;
pub use latency::{latency_for, Latency, NoLatency, SleepLatency};
pub use ledger::Ledger;
pub use lock_registry::LockRegistry;
