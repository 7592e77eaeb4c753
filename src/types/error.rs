//! Error types for the concurrent ledger
//!
//! This module defines all error types that can occur while running ledger
//! operations and driving a batch of them.
//!
//! # Error Categories
//!
//! - **Recoverable**: insufficient funds, invalid amounts, same-account
//!   transfers. The operation becomes a no-op, a diagnostic is logged and
//!   the run continues.
//! - **Fatal**: unregistered account ids, arithmetic overflow, panicked
//!   tasks, runtime and output failures. These indicate a configuration or
//!   programming error and abort the run.

use super::account::AccountId;
use super::operation::OperationKind;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The debited account cannot cover the requested amount
    ///
    /// Detected inside the critical section; the balance is left unchanged.
    #[error("Insufficient funds to {operation} ${requested} from account {account} (available {available})")]
    InsufficientFunds {
        /// Operation that was rejected
        operation: OperationKind,
        /// Account that would have been debited
        account: AccountId,
        /// Balance observed under the lock
        available: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Amount is zero or negative
    #[error("Invalid amount {amount} for {operation}")]
    InvalidAmount {
        /// Operation that was rejected
        operation: OperationKind,
        /// The offending amount
        amount: Decimal,
    },

    /// Transfer whose source and destination are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SameAccountTransfer {
        /// The account named on both sides
        account: AccountId,
    },

    /// An operation referenced an account with no lock registered
    ///
    /// Means the lock registry and the requested operations disagree on the
    /// number of accounts. Fatal.
    #[error("Account {account} is not registered ({registered} accounts registered)")]
    UnregisteredAccount {
        /// The unknown account id
        account: AccountId,
        /// Number of accounts the registry knows about
        registered: usize,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: OperationKind,
        /// Account being credited
        account: AccountId,
    },

    /// A spawned operation task panicked or was cancelled
    #[error("Operation task failed: {message}")]
    TaskFailed {
        /// Description from the join error
        message: String,
    },

    /// The async runtime could not be created
    #[error("Failed to create runtime: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },

    /// I/O error while writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        operation: OperationKind,
        account: AccountId,
        available: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            operation,
            account,
            available,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: OperationKind, amount: Decimal) -> Self {
        LedgerError::InvalidAmount { operation, amount }
    }

    /// Create an UnregisteredAccount error
    pub fn unregistered_account(account: AccountId, registered: usize) -> Self {
        LedgerError::UnregisteredAccount {
            account,
            registered,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: OperationKind, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow { operation, account }
    }

    /// Whether the run may continue after this error
    ///
    /// Recoverable errors leave every balance untouched and are only
    /// reported. Everything else means the account set or the runtime is
    /// broken and the run must stop.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LedgerError::InsufficientFunds { .. }
                | LedgerError::InvalidAmount { .. }
                | LedgerError::SameAccountTransfer { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::insufficient_withdraw(
        LedgerError::insufficient_funds(OperationKind::Withdraw, 3, Decimal::new(50, 0), Decimal::new(100, 0)),
        "Insufficient funds to withdraw $100 from account 3 (available 50)"
    )]
    #[case::insufficient_transfer(
        LedgerError::insufficient_funds(OperationKind::Transfer, 1, Decimal::new(5, 1), Decimal::new(950, 0)),
        "Insufficient funds to transfer $950 from account 1 (available 0.5)"
    )]
    #[case::invalid_amount(
        LedgerError::invalid_amount(OperationKind::Deposit, Decimal::new(-10, 0)),
        "Invalid amount -10 for deposit"
    )]
    #[case::same_account(
        LedgerError::SameAccountTransfer { account: 2 },
        "Cannot transfer from account 2 to itself"
    )]
    #[case::unregistered(
        LedgerError::unregistered_account(7, 5),
        "Account 7 is not registered (5 accounts registered)"
    )]
    #[case::overflow(
        LedgerError::arithmetic_overflow(OperationKind::Deposit, 0),
        "Arithmetic overflow in deposit for account 0"
    )]
    #[case::task_failed(
        LedgerError::TaskFailed { message: "panicked".to_string() },
        "Operation task failed: panicked"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::insufficient(LedgerError::insufficient_funds(OperationKind::Withdraw, 0, Decimal::ZERO, Decimal::ONE), true)]
    #[case::invalid_amount(LedgerError::invalid_amount(OperationKind::Deposit, Decimal::ZERO), true)]
    #[case::same_account(LedgerError::SameAccountTransfer { account: 1 }, true)]
    #[case::unregistered(LedgerError::unregistered_account(9, 5), false)]
    #[case::overflow(LedgerError::arithmetic_overflow(OperationKind::Transfer, 1), false)]
    #[case::io(LedgerError::IoError { message: "closed".to_string() }, false)]
    fn test_is_recoverable(#[case] error: LedgerError, #[case] expected: bool) {
        assert_eq!(error.is_recoverable(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Broken pipe");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Broken pipe");
    }
}
