use thiserror::Error;

/// Error type shared by the ledger, storage, and bank facade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),
    #[error("Account does not exist: {0}")]
    AccountDoesNotExist(String),
    #[error("Transaction already exists in account {0}")]
    TransactionAlreadyExists(String),
    #[error("Transaction does not exist in account {0}")]
    TransactionDoesNotExist(String),
    #[error("Invalid transaction attribute: {0}")]
    TransactionAttributeInvalid(String),
    #[error("Invalid account name: {0:?}")]
    InvalidAccountName(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BankError>;

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        BankError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        BankError::Io(err.to_string())
    }
}
