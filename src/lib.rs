#![doc(test(attr(deny(warnings))))]

//! Bank Core keeps named accounts of payments and transfers and persists each
//! account to its own tagged-JSON file.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::config::{BankConfig, ConfigManager};
pub use crate::core::bank::PrivateBank;
pub use crate::errors::{BankError, Result};
pub use crate::ledger::{InterestRates, Payment, Transaction, TransactionKind, Transfer};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bank Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
