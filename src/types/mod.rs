//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `operation`: Ledger operation requests and templates
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod operation;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use operation::{Operation, OperationKind, OperationRequest};
