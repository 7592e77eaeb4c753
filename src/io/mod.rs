//! I/O module
//!
//! Handles writing the final account balances.
//!
//! # Components
//!
//! - `output` - Text and CSV rendering of account balances

pub mod output;

pub use output::{write_balances, OutputFormat};
