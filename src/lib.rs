//! Concurrent Ledger Library
//! # Overview
//!
//! This library simulates concurrent deposits, withdrawals and transfers over
//! a small, fixed set of bank accounts, with per-account locking that
//! prevents lost updates and deadlock.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, OperationRequest, LedgerError)
//! - [`core`] - Concurrency-critical components:
//!   - [`core::account_store`] - Ordered, unsynchronised account storage
//!   - [`core::lock_registry`] - One lock per account, ordered pair locking
//!   - [`core::ledger`] - Deposit, withdraw and transfer operations
//!   - [`core::latency`] - Injectable simulated-I/O delay
//! - [`scenario`] - The fixed accounts, amounts and operation templates
//! - [`strategy`] - Sequential and concurrent drivers
//! - [`io`] - Final balance output
//! - [`cli`] - CLI arguments parsing
//!
//! # Operations
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds from an account (requires sufficient balance)
//! - **Transfer**: Move funds between two accounts (requires sufficient
//!   source balance); both accounts are locked in ascending id order
//!
//! A failed balance check is reported and the run continues. An operation
//! naming an account with no registered lock aborts the run.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod scenario;
pub mod strategy;
pub mod types;

pub use crate::core::{AccountStore, Ledger, LockRegistry};
pub use io::write_balances;
pub use scenario::Scenario;
pub use types::{Account, AccountId, LedgerError, Operation, OperationKind, OperationRequest};
