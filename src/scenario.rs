//! The fixed simulation scenario
//!
//! Five accounts with fixed opening balances, seven transaction amounts and
//! ten operation templates. Every template is applied once per amount,
//! amount-major: all ten templates for the first amount, then all ten for
//! the second, and so on.

use crate::core::AccountStore;
use crate::types::{Operation, OperationRequest};
use rust_decimal::Decimal;

/// Opening balances for accounts 0 through 4
pub const INITIAL_BALANCES: [i64; 5] = [1000, 1400, 2300, 5500, 6000];

/// Amounts applied per round, in order
pub const AMOUNTS: [i64; 7] = [100, 50, 75, 200, 800, 950, 230];

/// Operations applied for each amount, in order
pub const TEMPLATES: [Operation; 10] = [
    Operation::Deposit { account: 0 },
    Operation::Transfer { from: 1, to: 2 },
    Operation::Withdraw { account: 3 },
    Operation::Transfer { from: 4, to: 3 },
    Operation::Deposit { account: 4 },
    Operation::Withdraw { account: 0 },
    Operation::Transfer { from: 2, to: 0 },
    Operation::Transfer { from: 4, to: 1 },
    Operation::Deposit { account: 1 },
    Operation::Withdraw { account: 3 },
];

/// A batch of operations over a starting set of accounts
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    initial_balances: Vec<Decimal>,
    amounts: Vec<Decimal>,
    templates: Vec<Operation>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(
            INITIAL_BALANCES.iter().map(|b| Decimal::new(*b, 0)).collect(),
            AMOUNTS.iter().map(|a| Decimal::new(*a, 0)).collect(),
            TEMPLATES.to_vec(),
        )
    }
}

impl Scenario {
    pub fn new(
        initial_balances: Vec<Decimal>,
        amounts: Vec<Decimal>,
        templates: Vec<Operation>,
    ) -> Self {
        Self {
            initial_balances,
            amounts,
            templates,
        }
    }

    pub fn initial_balances(&self) -> &[Decimal] {
        &self.initial_balances
    }

    /// A fresh store holding the opening balances
    pub fn account_store(&self) -> AccountStore {
        AccountStore::from_balances(self.initial_balances.iter().copied())
    }

    /// Expand templates x amounts into requests, in launch order
    pub fn requests(&self) -> Vec<OperationRequest> {
        self.amounts
            .iter()
            .flat_map(|amount| {
                self.templates
                    .iter()
                    .map(move |template| template.with_amount(*amount))
            })
            .collect()
    }
}
