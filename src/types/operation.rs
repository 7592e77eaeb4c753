//! Ledger operation types
//!
//! An [`Operation`] names the kind of ledger operation and the account(s) it
//! touches. Pairing it with an amount produces an [`OperationRequest`], the
//! unit of work the driver hands to the ledger.

use super::account::AccountId;
use rust_decimal::Decimal;
use std::fmt;

/// The three ledger primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account (requires sufficient balance)
    Withdraw,

    /// Move funds between two accounts (requires sufficient source balance)
    Transfer,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdraw => "withdraw",
            OperationKind::Transfer => "transfer",
        };
        f.write_str(name)
    }
}

/// An operation template: kind plus the account(s) it references
///
/// Templates carry no amount. The driver applies each template once per
/// scenario amount via [`Operation::with_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit { account: AccountId },
    Withdraw { account: AccountId },
    Transfer { from: AccountId, to: AccountId },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Deposit { .. } => OperationKind::Deposit,
            Operation::Withdraw { .. } => OperationKind::Withdraw,
            Operation::Transfer { .. } => OperationKind::Transfer,
        }
    }

    /// Account ids referenced by this operation, in from/to order
    pub fn accounts(&self) -> Vec<AccountId> {
        match *self {
            Operation::Deposit { account } | Operation::Withdraw { account } => vec![account],
            Operation::Transfer { from, to } => vec![from, to],
        }
    }

    /// Bind this template to an amount
    pub fn with_amount(self, amount: Decimal) -> OperationRequest {
        OperationRequest {
            operation: self,
            amount,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit { account } => write!(f, "deposit({})", account),
            Operation::Withdraw { account } => write!(f, "withdraw({})", account),
            Operation::Transfer { from, to } => write!(f, "transfer({}->{})", from, to),
        }
    }
}

/// A single unit of work for the ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRequest {
    /// What to do and to which account(s)
    pub operation: Operation,

    /// Amount to move; must be strictly positive
    pub amount: Decimal,
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    /// Net effect of this request on the sum of all balances if it succeeds
    ///
    /// Deposits add money to the system, withdrawals remove it and
    /// transfers are zero-sum.
    pub fn external_flow(&self) -> Decimal {
        match self.operation {
            Operation::Deposit { .. } => self.amount,
            Operation::Withdraw { .. } => -self.amount,
            Operation::Transfer { .. } => Decimal::ZERO,
        }
    }
}

impl fmt::Display for OperationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.operation, self.amount)
    }
}
