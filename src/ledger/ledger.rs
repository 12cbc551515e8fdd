use std::collections::BTreeMap;

use super::transaction::Transaction;
use crate::errors::{BankError, Result};

/// In-memory store mapping account names to their ordered transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    accounts: BTreeMap<String, Vec<Transaction>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str) -> Result<()> {
        if self.accounts.contains_key(name) {
            return Err(BankError::AccountAlreadyExists(name.to_string()));
        }
        self.accounts.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Installs a loaded account, keeping only the first of any equal records.
    pub fn restore(&mut self, name: impl Into<String>, transactions: Vec<Transaction>) -> usize {
        let mut unique: Vec<Transaction> = Vec::with_capacity(transactions.len());
        let mut dropped = 0;
        for txn in transactions {
            if unique.contains(&txn) {
                dropped += 1;
            } else {
                unique.push(txn);
            }
        }
        self.accounts.insert(name.into(), unique);
        dropped
    }

    pub fn exists(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&[Transaction]> {
        self.accounts.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str, transaction: &Transaction) -> bool {
        self.accounts
            .get(name)
            .is_some_and(|list| list.contains(transaction))
    }

    pub fn insert(&mut self, name: &str, transaction: Transaction) -> Result<()> {
        let list = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| BankError::AccountDoesNotExist(name.to_string()))?;
        if list.contains(&transaction) {
            return Err(BankError::TransactionAlreadyExists(name.to_string()));
        }
        list.push(transaction);
        Ok(())
    }

    /// Removes the first entry equal to `transaction` and returns it.
    pub fn remove_equal(&mut self, name: &str, transaction: &Transaction) -> Result<Transaction> {
        let list = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| BankError::AccountDoesNotExist(name.to_string()))?;
        let index = list
            .iter()
            .position(|candidate| candidate == transaction)
            .ok_or_else(|| BankError::TransactionDoesNotExist(name.to_string()))?;
        Ok(list.remove(index))
    }

    /// Replaces an existing account's list wholesale.
    pub fn replace(&mut self, name: &str, transactions: Vec<Transaction>) -> Result<()> {
        let list = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| BankError::AccountDoesNotExist(name.to_string()))?;
        *list = transactions;
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<Vec<Transaction>> {
        self.accounts
            .remove(name)
            .ok_or_else(|| BankError::AccountDoesNotExist(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        // BTreeMap keys iterate in lexicographic order.
        self.accounts.keys().cloned().collect()
    }

    pub fn balance(&self, name: &str) -> f64 {
        self.accounts
            .get(name)
            .map(|list| list.iter().map(Transaction::calculate).sum())
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.accounts.values().map(Vec::len).sum()
    }
}
