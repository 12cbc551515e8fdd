//! The bank facade: every account operation a front-end may call.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    config::BankConfig,
    errors::{BankError, Result},
    ledger::{interest::checked_rate, InterestRates, Ledger, Transaction},
    storage::{JsonStorage, StorageBackend},
};

/// Coordinates the in-memory ledger with its per-account storage.
///
/// Every mutating call writes the affected account's full transaction list
/// before returning. When the write fails the in-memory state is rolled back,
/// so memory and disk never disagree after an error.
pub struct PrivateBank {
    name: String,
    rates: InterestRates,
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
}

impl PrivateBank {
    /// Opens a bank over a JSON storage directory, loading every account file found there.
    pub fn new(
        name: impl Into<String>,
        incoming_interest: f64,
        outgoing_interest: f64,
        storage_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        Self::open(&BankConfig::new(
            name,
            incoming_interest,
            outgoing_interest,
            storage_dir,
        ))
    }

    pub fn open(config: &BankConfig) -> Result<Self> {
        let rates = config.validate()?;
        let storage = JsonStorage::new(&config.storage_dir)?;
        Self::with_storage(config.name.clone(), rates, Box::new(storage))
    }

    /// Builds a bank over any backend and loads its accounts.
    pub fn with_storage(
        name: impl Into<String>,
        rates: InterestRates,
        storage: Box<dyn StorageBackend>,
    ) -> Result<Self> {
        let name = name.into();
        let mut ledger = Ledger::new();
        for (account, transactions) in storage.load_accounts()? {
            let dropped = ledger.restore(account.as_str(), transactions);
            if dropped > 0 {
                tracing::warn!(account = %account, dropped, "ignored duplicate transactions in stored account");
            }
        }
        tracing::info!(
            bank = %name,
            accounts = ledger.len(),
            transactions = ledger.transaction_count(),
            root = %storage.root().display(),
            "bank opened"
        );
        Ok(Self {
            name,
            rates,
            ledger,
            storage,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn rates(&self) -> InterestRates {
        self.rates
    }

    pub fn incoming_interest(&self) -> f64 {
        self.rates.incoming
    }

    pub fn outgoing_interest(&self) -> f64 {
        self.rates.outgoing
    }

    /// Changes the rate applied to payments added from now on.
    pub fn set_incoming_interest(&mut self, rate: f64) -> Result<()> {
        self.rates.incoming = checked_rate("incoming interest", rate)?;
        Ok(())
    }

    pub fn set_outgoing_interest(&mut self, rate: f64) -> Result<()> {
        self.rates.outgoing = checked_rate("outgoing interest", rate)?;
        Ok(())
    }

    pub fn storage_dir(&self) -> &Path {
        self.storage.root()
    }

    pub fn account_path(&self, account: &str) -> PathBuf {
        self.storage.account_path(account)
    }

    pub fn create_account(&mut self, account: &str) -> Result<()> {
        validate_account_name(account)?;
        self.ledger.create(account)?;
        if let Err(err) = self.storage.save_account(account, &[]) {
            self.ledger.delete(account)?;
            return Err(err);
        }
        tracing::info!(account, "account created");
        Ok(())
    }

    /// Creates an account pre-filled with `transactions`.
    ///
    /// Records are validated up front; an invalid one aborts before anything
    /// is created. Records equal to an earlier one in the batch are skipped.
    pub fn create_account_with<I>(&mut self, account: &str, transactions: I) -> Result<()>
    where
        I: IntoIterator<Item = Transaction>,
    {
        validate_account_name(account)?;
        if self.ledger.exists(account) {
            return Err(BankError::AccountAlreadyExists(account.to_string()));
        }
        let mut batch: Vec<Transaction> = Vec::new();
        for transaction in transactions {
            let rated = transaction.with_rates(self.rates);
            rated.validate()?;
            if batch.contains(&rated) {
                tracing::warn!(account, transaction = %rated, "skipping duplicate transaction");
                continue;
            }
            batch.push(rated);
        }
        self.storage.save_account(account, &batch)?;
        let count = batch.len();
        self.ledger.restore(account, batch);
        tracing::info!(account, count, "account created with transactions");
        Ok(())
    }

    /// Appends `transaction`; a payment is stored with the bank's current rates.
    pub fn add_transaction(&mut self, account: &str, transaction: &Transaction) -> Result<()> {
        if !self.ledger.exists(account) {
            return Err(BankError::AccountDoesNotExist(account.to_string()));
        }
        let rated = transaction.with_rates(self.rates);
        rated.validate()?;
        let snapshot = self.snapshot(account);
        self.ledger.insert(account, rated)?;
        self.persist_or_rollback(account, snapshot)?;
        tracing::debug!(account, %transaction, "transaction added");
        Ok(())
    }

    /// Removes the first stored record equal to `transaction` re-rated with the
    /// bank's current rates, falling back to `transaction` as given.
    pub fn remove_transaction(&mut self, account: &str, transaction: &Transaction) -> Result<()> {
        if !self.ledger.exists(account) {
            return Err(BankError::AccountDoesNotExist(account.to_string()));
        }
        let target = self
            .stored_match(account, transaction)
            .ok_or_else(|| BankError::TransactionDoesNotExist(account.to_string()))?;
        let snapshot = self.snapshot(account);
        self.ledger.remove_equal(account, &target)?;
        self.persist_or_rollback(account, snapshot)?;
        tracing::debug!(account, %transaction, "transaction removed");
        Ok(())
    }

    pub fn delete_account(&mut self, account: &str) -> Result<()> {
        if !self.ledger.exists(account) {
            return Err(BankError::AccountDoesNotExist(account.to_string()));
        }
        self.storage.delete_account(account)?;
        self.ledger.delete(account)?;
        tracing::info!(account, "account deleted");
        Ok(())
    }

    pub fn account_exists(&self, account: &str) -> bool {
        self.ledger.exists(account)
    }

    /// False for unknown accounts.
    pub fn contains_transaction(&self, account: &str, transaction: &Transaction) -> bool {
        self.stored_match(account, transaction).is_some()
    }

    /// Sum of `calculate()` over the account; 0 for unknown accounts.
    pub fn account_balance(&self, account: &str) -> f64 {
        self.ledger.balance(account)
    }

    pub fn transactions(&self, account: &str) -> Vec<Transaction> {
        self.snapshot(account)
    }

    /// Transactions ordered by their calculated amount. Ties keep insertion order.
    pub fn transactions_sorted(&self, account: &str, ascending: bool) -> Vec<Transaction> {
        let mut sorted = self.snapshot(account);
        if ascending {
            sorted.sort_by(|a, b| a.calculate().total_cmp(&b.calculate()));
        } else {
            sorted.sort_by(|a, b| b.calculate().total_cmp(&a.calculate()));
        }
        sorted
    }

    /// `positive` selects `calculate() >= 0`, otherwise `calculate() < 0`.
    pub fn transactions_by_type(&self, account: &str, positive: bool) -> Vec<Transaction> {
        self.ledger
            .get(account)
            .unwrap_or_default()
            .iter()
            .filter(|txn| (txn.calculate() >= 0.0) == positive)
            .cloned()
            .collect()
    }

    pub fn all_accounts(&self) -> Vec<String> {
        self.ledger.names()
    }

    fn snapshot(&self, account: &str) -> Vec<Transaction> {
        self.ledger
            .get(account)
            .map(<[Transaction]>::to_vec)
            .unwrap_or_default()
    }

    /// Prefers the record `add_transaction` would have stored for this value.
    fn stored_match(&self, account: &str, transaction: &Transaction) -> Option<Transaction> {
        let rated = transaction.with_rates(self.rates);
        if self.ledger.contains(account, &rated) {
            return Some(rated);
        }
        self.ledger
            .contains(account, transaction)
            .then(|| transaction.clone())
    }

    fn persist_or_rollback(&mut self, account: &str, snapshot: Vec<Transaction>) -> Result<()> {
        let current = self.ledger.get(account).unwrap_or_default();
        if let Err(err) = self.storage.save_account(account, current) {
            tracing::warn!(account, error = %err, "write failed, rolling back");
            self.ledger.replace(account, snapshot)?;
            return Err(err);
        }
        Ok(())
    }
}

/// Account names become part of a file name, so they must be non-blank and
/// free of path separators.
pub fn validate_account_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        Err(BankError::InvalidAccountName(name.to_string()))
    } else {
        Ok(())
    }
}

impl PartialEq for PrivateBank {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.rates == other.rates && self.ledger == other.ledger
    }
}

impl fmt::Debug for PrivateBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateBank")
            .field("name", &self.name)
            .field("rates", &self.rates)
            .field("accounts", &self.ledger.names())
            .field("root", &self.storage.root())
            .finish()
    }
}

impl fmt::Display for PrivateBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) accounts: [{}]",
            self.name,
            self.rates,
            self.ledger.names().join(", ")
        )
    }
}
