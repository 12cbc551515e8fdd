use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{BankError, Result};

/// Incoming and outgoing interest rates, each within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRates {
    pub incoming: f64,
    pub outgoing: f64,
}

impl InterestRates {
    pub fn new(incoming: f64, outgoing: f64) -> Result<Self> {
        Ok(Self {
            incoming: checked_rate("incoming interest", incoming)?,
            outgoing: checked_rate("outgoing interest", outgoing)?,
        })
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

impl fmt::Display for InterestRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "in {:.4} / out {:.4}", self.incoming, self.outgoing)
    }
}

/// Returns true when `rate` lies within the closed interval `[0, 1]`.
pub fn is_valid_rate(rate: f64) -> bool {
    (0.0..=1.0).contains(&rate)
}

/// Validates a single rate, naming it in the error message.
pub fn checked_rate(label: &str, rate: f64) -> Result<f64> {
    if is_valid_rate(rate) {
        Ok(rate)
    } else {
        Err(BankError::TransactionAttributeInvalid(format!(
            "{label} must be between 0 and 1, got {rate}"
        )))
    }
}
