use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".bank_core";
const ACCOUNTS_DIR: &str = "accounts";
const CONFIG_FILE: &str = "config.json";
pub const HOME_ENV_VAR: &str = "BANK_CORE_HOME";

/// Returns the application-specific data directory, defaulting to `~/.bank_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default directory holding the `Konto_<name>.json` files.
pub fn accounts_dir() -> PathBuf {
    app_data_dir().join(ACCOUNTS_DIR)
}

/// Default location of the bank configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}
