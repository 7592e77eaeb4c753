//! Per-account lock registry
//!
//! This module provides the `LockRegistry`, which owns one independent mutex
//! per account. The registry is built from an [`AccountStore`] before any
//! concurrent work starts and never changes shape afterwards: there is no
//! way to add, remove or resize locks while operations are running.
//!
//! # Locking discipline
//!
//! - Single-account operations lock exactly one account via [`LockRegistry::lock_for`].
//! - Two-account operations go through [`LockRegistry::lock_pair`], which
//!   always acquires the lower account id first. Because every caller
//!   follows the same global order, no cycle of waiters can form, so opposing
//!   transfers (`A -> B` and `B -> A`) cannot deadlock.
//! - Guards are synchronous `parking_lot` guards. They are only ever held
//!   inside non-async critical sections and never across an `.await`.
//!
//! # Reading balances
//!
//! There is no unlocked read path while the registry is shared.
//! [`LockRegistry::snapshot`] takes each lock in turn, so every individual
//! balance is consistent, but the snapshot as a whole is not atomic: other
//! operations may run between two accounts being read. Exact final balances
//! come from [`LockRegistry::into_store`], which consumes the registry after
//! every operation has been joined.

use super::AccountStore;
use crate::types::{Account, AccountId, LedgerError};
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;

/// Fixed mapping from account id to its exclusive lock
#[derive(Debug)]
pub struct LockRegistry {
    locks: Box<[Mutex<Account>]>,
}

impl LockRegistry {
    /// Register one lock per account in `store`
    pub fn new(store: AccountStore) -> Self {
        let locks = store.into_accounts().into_iter().map(Mutex::new).collect();
        Self { locks }
    }

    /// Register `account_count` accounts, all opening at zero
    pub fn initialize(account_count: usize) -> Self {
        Self::new(AccountStore::from_balances(
            std::iter::repeat(Decimal::ZERO).take(account_count),
        ))
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Lock guarding `id`
    ///
    /// # Errors
    ///
    /// `LedgerError::UnregisteredAccount` if no lock exists for `id`. This is
    /// a fatal condition; callers must not fall back to unsynchronised access.
    pub fn lock_for(&self, id: AccountId) -> Result<&Mutex<Account>, LedgerError> {
        self.locks
            .get(id)
            .ok_or_else(|| LedgerError::unregistered_account(id, self.locks.len()))
    }

    /// Lock two distinct accounts, lower id first
    ///
    /// Guards are returned in caller order: `(first, second)`. Both ids are
    /// validated before any lock is taken, so an unregistered id never leaves
    /// a lock held.
    ///
    /// # Errors
    ///
    /// - `LedgerError::SameAccountTransfer` if `first == second`
    /// - `LedgerError::UnregisteredAccount` if either id is unknown
    pub fn lock_pair(
        &self,
        first: AccountId,
        second: AccountId,
    ) -> Result<(MutexGuard<'_, Account>, MutexGuard<'_, Account>), LedgerError> {
        if first == second {
            return Err(LedgerError::SameAccountTransfer { account: first });
        }

        let first_lock = self.lock_for(first)?;
        let second_lock = self.lock_for(second)?;

        if first < second {
            let first_guard = first_lock.lock();
            let second_guard = second_lock.lock();
            Ok((first_guard, second_guard))
        } else {
            let second_guard = second_lock.lock();
            let first_guard = first_lock.lock();
            Ok((first_guard, second_guard))
        }
    }

    /// Copy every account, taking each lock in turn
    ///
    /// Not atomic across accounts; see the module docs.
    pub fn snapshot(&self) -> Vec<Account> {
        self.locks.iter().map(|lock| lock.lock().clone()).collect()
    }

    /// Give the accounts back once no operation can touch them anymore
    pub fn into_store(self) -> AccountStore {
        let accounts = self
            .locks
            .into_vec()
            .into_iter()
            .map(Mutex::into_inner)
            .collect();
        AccountStore::from_accounts(accounts)
    }
}
