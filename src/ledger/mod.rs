//! Ledger domain models: transaction records, interest rates, and the
//! account-to-transactions store.

pub mod interest;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use interest::InterestRates;
pub use ledger::Ledger;
pub use transaction::{Payment, Transaction, TransactionKind, Transfer};
