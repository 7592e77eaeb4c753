//! Account-related types for the concurrent ledger
//!
//! This module defines the Account structure and the identifier type used
//! to index accounts in the store and the lock registry.

use rust_decimal::Decimal;

/// Account identifier
///
/// Accounts are addressed by their position in the store, starting at 0.
pub type AccountId = usize;

/// A single bank account
///
/// Holds the balance for one account. The balance is only ever mutated by a
/// ledger operation that holds the account's lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account index
    pub id: AccountId,

    /// Current balance
    ///
    /// Never goes below zero: withdrawals and transfers check the balance
    /// inside the critical section before debiting.
    pub balance: Decimal,
}

impl Account {
    /// Create a new account with the given opening balance
    pub fn new(id: AccountId, balance: Decimal) -> Self {
        Account { id, balance }
    }

    /// Whether the account can cover a debit of `amount`
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}
