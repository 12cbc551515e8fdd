pub mod json_backend;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{errors::Result, ledger::Transaction};

/// Abstraction over persistence backends that hold one transaction list per account.
pub trait StorageBackend: Send + Sync {
    /// Reads every stored account.
    fn load_accounts(&self) -> Result<BTreeMap<String, Vec<Transaction>>>;
    /// Replaces the stored list for `name` with `transactions`.
    fn save_account(&self, name: &str, transactions: &[Transaction]) -> Result<()>;
    fn delete_account(&self, name: &str) -> Result<()>;
    fn account_path(&self, name: &str) -> PathBuf;
    fn root(&self) -> &Path;
}

pub use json_backend::{
    account_name_from_file, decode_transactions, encode_transactions, JsonStorage, FILE_EXTENSION,
    FILE_PREFIX,
};
