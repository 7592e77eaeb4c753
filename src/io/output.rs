//! Final balance output
//!
//! Two formats are supported:
//!
//! - **Text**: a `Final balances` header followed by one `<account> $<balance>`
//!   line per account.
//! - **CSV**: an `account,balance` header followed by one row per account,
//!   balances with two decimal places.
//!
//! Accounts are always written in id order.

use crate::types::{Account, AccountId, LedgerError};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// Output format for the final balances
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

/// One CSV output row
#[derive(Debug, Serialize)]
struct BalanceRow {
    account: AccountId,
    balance: String,
}

/// Write account balances in the requested format
///
/// # Arguments
///
/// * `accounts` - Accounts to write, in any order
/// * `format` - Text or CSV
/// * `output` - Destination writer
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(LedgerError::IoError)` if a write error occurred
pub fn write_balances(
    accounts: &[Account],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);

    match format {
        OutputFormat::Text => write_text(&sorted_accounts, output),
        OutputFormat::Csv => write_csv(&sorted_accounts, output),
    }
}

fn write_text(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    writeln!(output, "Final balances")?;
    for account in accounts {
        writeln!(output, "{} ${}", account.id, account.balance.normalize())?;
    }
    output.flush()?;
    Ok(())
}

fn write_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    // serialize() only emits a header once a row is written
    if accounts.is_empty() {
        writer.write_record(["account", "balance"])?;
    }
    for account in accounts {
        writer.serialize(BalanceRow {
            account: account.id,
            balance: format!("{:.2}", account.balance),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn accounts() -> Vec<Account> {
        vec![
            Account::new(1, Decimal::new(3805, 0)),
            Account::new(0, Decimal::new(3405, 0)),
            Account::new(2, Decimal::new(230050, 2)),
        ]
    }

    #[rstest]
    #[case::text(OutputFormat::Text, "Final balances\n0 $3405\n1 $3805\n2 $2300.5\n")]
    #[case::csv(OutputFormat::Csv, "account,balance\n0,3405.00\n1,3805.00\n2,2300.50\n")]
    fn test_write_balances(#[case] format: OutputFormat, #[case] expected: &str) {
        let mut output = Vec::new();

        write_balances(&accounts(), format, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[rstest]
    #[case::text(OutputFormat::Text, "Final balances\n")]
    #[case::csv(OutputFormat::Csv, "account,balance\n")]
    fn test_write_no_accounts(#[case] format: OutputFormat, #[case] expected: &str) {
        let mut output = Vec::new();

        write_balances(&[], format, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
