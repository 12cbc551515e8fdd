use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{BankError, Result},
    ledger::Transaction,
    utils::atomic_file,
};

use super::StorageBackend;

pub const FILE_PREFIX: &str = "Konto_";
pub const FILE_EXTENSION: &str = "json";

/// Directory of `Konto_<name>.json` files, one per account.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Opens the storage directory, creating it when missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| {
            BankError::Io(format!(
                "unable to create storage directory `{}`: {err}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Transaction>> {
        let data = fs::read_to_string(path)?;
        decode_transactions(&data)
            .map_err(|err| BankError::Io(format!("failed to parse `{}`: {err}", path.display())))
    }
}

impl StorageBackend for JsonStorage {
    fn load_accounts(&self) -> Result<BTreeMap<String, Vec<Transaction>>> {
        let mut accounts = BTreeMap::new();
        if !self.root.exists() {
            return Ok(accounts);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path
                .file_name()
                .and_then(|file| file.to_str())
                .and_then(account_name_from_file)
            else {
                continue;
            };
            let transactions = self.load_file(&path)?;
            tracing::debug!(
                account = name,
                count = transactions.len(),
                "loaded account file"
            );
            accounts.insert(name.to_string(), transactions);
        }
        Ok(accounts)
    }

    fn save_account(&self, name: &str, transactions: &[Transaction]) -> Result<()> {
        let path = self.account_path(name);
        let json = encode_transactions(transactions)?;
        atomic_file::replace_file(&path, &json)?;
        tracing::debug!(
            account = name,
            count = transactions.len(),
            path = %path.display(),
            "wrote account file"
        );
        Ok(())
    }

    fn delete_account(&self, name: &str) -> Result<()> {
        let path = self.account_path(name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn account_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{FILE_PREFIX}{name}.{FILE_EXTENSION}"))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// Extracts `<name>` from `Konto_<name>.json`; any other file name yields `None`.
pub fn account_name_from_file(file_name: &str) -> Option<&str> {
    let name = file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_EXTENSION)?
        .strip_suffix('.')?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Serializes a list as a pretty-printed array of `CLASSNAME`-tagged objects.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Parses an account file body. Blank input and `null` both mean "no transactions".
pub fn decode_transactions(data: &str) -> Result<Vec<Transaction>> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Option<Vec<Transaction>> = serde_json::from_str(data)?;
    Ok(parsed.unwrap_or_default())
}
