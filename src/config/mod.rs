use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils,
    errors::{BankError, Result},
    ledger::InterestRates,
    utils::atomic_file,
};

const DEFAULT_BANK_NAME: &str = "PrivateBank";

/// Settings a bank is constructed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    pub name: String,
    #[serde(default)]
    pub incoming_interest: f64,
    #[serde(default)]
    pub outgoing_interest: f64,
    #[serde(default = "utils::accounts_dir")]
    pub storage_dir: PathBuf,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BANK_NAME.into(),
            incoming_interest: 0.0,
            outgoing_interest: 0.0,
            storage_dir: utils::accounts_dir(),
        }
    }
}

impl BankConfig {
    pub fn new(
        name: impl Into<String>,
        incoming_interest: f64,
        outgoing_interest: f64,
        storage_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            incoming_interest,
            outgoing_interest,
            storage_dir: storage_dir.into(),
        }
    }

    /// Checks both rates and returns them as a validated pair.
    pub fn validate(&self) -> Result<InterestRates> {
        InterestRates::new(self.incoming_interest, self.outgoing_interest)
    }
}

/// Loads and stores a [`BankConfig`] as JSON on disk.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(utils::config_file())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the stored config, or the defaults when no file exists yet.
    pub fn load(&self) -> Result<BankConfig> {
        if !self.path.exists() {
            return Ok(BankConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: BankConfig = serde_json::from_str(&data).map_err(|err| {
            BankError::Config(format!("invalid config `{}`: {err}", self.path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &BankConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        atomic_file::replace_file(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
