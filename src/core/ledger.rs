//! Ledger operations
//!
//! This module provides the `Ledger`, which runs deposits, withdrawals and
//! transfers against accounts held in a shared [`LockRegistry`].
//!
//! # Two phases
//!
//! Every operation is split in two:
//!
//! 1. **Critical section**: a plain synchronous function that takes the
//!    lock(s), checks the balance and mutates it. Check and mutation happen
//!    under the same guard, so no other operation can observe a balance in
//!    between. Guards are dropped when the function returns.
//! 2. **Simulated latency**: the [`Latency`] hook is awaited after the locks
//!    are gone, so the delay never serialises other operations.
//!
//! Fatal errors (unregistered account, overflow) skip the latency phase and
//! are returned straight away.
//!
//! # Thread Safety
//!
//! `Ledger` is cheap to clone (two `Arc`s) and every clone works on the same
//! registry, so one clone can be moved into each spawned task.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::{Latency, LockRegistry};
use crate::types::{AccountId, LedgerError, Operation, OperationKind, OperationRequest};

/// Runs ledger operations against a shared lock registry
#[derive(Debug, Clone)]
pub struct Ledger {
    registry: Arc<LockRegistry>,
    latency: Arc<dyn Latency>,
}

impl Ledger {
    /// Create a new Ledger
    ///
    /// # Arguments
    ///
    /// * `registry` - Arc-wrapped registry holding one lock per account
    /// * `latency` - Delay incurred after each critical section
    pub fn new(registry: Arc<LockRegistry>, latency: Arc<dyn Latency>) -> Self {
        Self { registry, latency }
    }

    pub fn registry(&self) -> &Arc<LockRegistry> {
        &self.registry
    }

    /// Run a single operation request
    pub async fn apply(&self, request: OperationRequest) -> Result<(), LedgerError> {
        match request.operation {
            Operation::Deposit { account } => self.deposit(account, request.amount).await,
            Operation::Withdraw { account } => self.withdraw(account, request.amount).await,
            Operation::Transfer { from, to } => self.transfer(from, to, request.amount).await,
        }
    }

    /// Credit `amount` to `account`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The deposit was applied
    /// * `Err(LedgerError::InvalidAmount)` - `amount` is not positive
    /// * `Err(LedgerError::UnregisteredAccount)` - No lock for `account`
    /// * `Err(LedgerError::ArithmeticOverflow)` - The balance would overflow
    pub async fn deposit(&self, account: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        let outcome = self.deposit_locked(account, amount);
        self.settle(outcome).await
    }

    /// Debit `amount` from `account` if the balance covers it
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The withdrawal was applied
    /// * `Err(LedgerError::InsufficientFunds)` - Balance too low; nothing changed
    /// * `Err(LedgerError::InvalidAmount)` - `amount` is not positive
    /// * `Err(LedgerError::UnregisteredAccount)` - No lock for `account`
    pub async fn withdraw(&self, account: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        let outcome = self.withdraw_locked(account, amount);
        self.settle(outcome).await
    }

    /// Move `amount` from `from` to `to` if `from` covers it
    ///
    /// Both accounts are locked before either balance is read, in ascending
    /// id order regardless of direction.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The transfer was applied
    /// * `Err(LedgerError::InsufficientFunds)` - Source balance too low; nothing changed
    /// * `Err(LedgerError::SameAccountTransfer)` - `from == to`
    /// * `Err(LedgerError::InvalidAmount)` - `amount` is not positive
    /// * `Err(LedgerError::UnregisteredAccount)` - No lock for one of the accounts
    /// * `Err(LedgerError::ArithmeticOverflow)` - The destination would overflow
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let outcome = self.transfer_locked(from, to, amount);
        self.settle(outcome).await
    }

    fn deposit_locked(&self, account: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(OperationKind::Deposit, amount)?;

        let mut guard = self.registry.lock_for(account)?.lock();
        guard.balance = guard
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(OperationKind::Deposit, account))?;

        debug!(account, %amount, balance = %guard.balance, "deposit applied");
        Ok(())
    }

    fn withdraw_locked(&self, account: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(OperationKind::Withdraw, amount)?;

        let mut guard = self.registry.lock_for(account)?.lock();
        if !guard.can_cover(amount) {
            return Err(LedgerError::insufficient_funds(
                OperationKind::Withdraw,
                account,
                guard.balance,
                amount,
            ));
        }
        guard.balance -= amount;

        debug!(account, %amount, balance = %guard.balance, "withdrawal applied");
        Ok(())
    }

    fn transfer_locked(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        ensure_positive(OperationKind::Transfer, amount)?;

        let (mut source, mut destination) = self.registry.lock_pair(from, to)?;
        if !source.can_cover(amount) {
            return Err(LedgerError::insufficient_funds(
                OperationKind::Transfer,
                from,
                source.balance,
                amount,
            ));
        }

        // Compute the credit before debiting so an overflow leaves both untouched
        let credited = destination
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(OperationKind::Transfer, to))?;
        source.balance -= amount;
        destination.balance = credited;

        debug!(from, to, %amount, "transfer applied");
        Ok(())
    }

    /// Latency phase, run with no locks held
    async fn settle(&self, outcome: Result<(), LedgerError>) -> Result<(), LedgerError> {
        if matches!(&outcome, Err(error) if !error.is_recoverable()) {
            return outcome;
        }
        self.latency.pause().await;
        outcome
    }
}

fn ensure_positive(operation: OperationKind, amount: Decimal) -> Result<(), LedgerError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(LedgerError::invalid_amount(operation, amount))
    }
}
