//! Plain account storage
//!
//! `AccountStore` is an ordered collection of accounts indexed by
//! [`AccountId`]. It does no synchronisation of its own: mutation requires
//! `&mut self`, so the compiler only allows it while the caller has
//! exclusive access. To share accounts between concurrent operations, hand
//! the store to a [`LockRegistry`](super::LockRegistry), which wraps every
//! account in its own lock and gives the store back once the run is over.

use crate::types::{Account, AccountId};
use rust_decimal::Decimal;

/// Ordered, unsynchronised collection of accounts
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Create a store whose account ids are the positions of `balances`
    pub fn from_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let accounts = balances
            .into_iter()
            .enumerate()
            .map(|(id, balance)| Account::new(id, balance))
            .collect();
        Self { accounts }
    }

    pub(crate) fn from_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    /// Balances in account id order
    pub fn balances(&self) -> Vec<Decimal> {
        self.accounts.iter().map(|account| account.balance).collect()
    }

    /// Sum of all balances
    pub fn total(&self) -> Decimal {
        self.accounts.iter().map(|account| account.balance).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub(crate) fn into_accounts(self) -> Vec<Account> {
        self.accounts
    }
}
