//! Transaction value types and their balance rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::interest::{checked_rate, is_valid_rate, InterestRates};
use crate::errors::{BankError, Result};

/// A dated, described monetary event.
///
/// The variant name doubles as the `CLASSNAME` discriminator in account files.
/// Equality is structural: two records are equal when they are the same
/// variant and every field matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "CLASSNAME")]
pub enum Transaction {
    Payment(Payment),
    Transfer(Transfer),
    IncomingTransfer(Transfer),
    OutgoingTransfer(Transfer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Payment,
    Transfer,
    IncomingTransfer,
    OutgoingTransfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Payment => "Payment",
            TransactionKind::Transfer => "Transfer",
            TransactionKind::IncomingTransfer => "IncomingTransfer",
            TransactionKind::OutgoingTransfer => "OutgoingTransfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Transaction {
    pub fn payment(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        incoming_interest: f64,
        outgoing_interest: f64,
    ) -> Self {
        Transaction::Payment(Payment::new(
            date,
            amount,
            description,
            incoming_interest,
            outgoing_interest,
        ))
    }

    pub fn transfer(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Transaction::Transfer(Transfer::new(date, amount, description, sender, recipient))
    }

    pub fn incoming_transfer(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Transaction::IncomingTransfer(Transfer::new(date, amount, description, sender, recipient))
    }

    pub fn outgoing_transfer(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Transaction::OutgoingTransfer(Transfer::new(date, amount, description, sender, recipient))
    }

    /// Net effect of this record on an account balance.
    pub fn calculate(&self) -> f64 {
        match self {
            Transaction::Payment(payment) => payment.calculate(),
            Transaction::Transfer(transfer) | Transaction::IncomingTransfer(transfer) => {
                transfer.amount
            }
            Transaction::OutgoingTransfer(transfer) => -transfer.amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Payment(_) => TransactionKind::Payment,
            Transaction::Transfer(_) => TransactionKind::Transfer,
            Transaction::IncomingTransfer(_) => TransactionKind::IncomingTransfer,
            Transaction::OutgoingTransfer(_) => TransactionKind::OutgoingTransfer,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            Transaction::Payment(payment) => &payment.date,
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => &transfer.date,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            Transaction::Payment(payment) => payment.amount,
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => transfer.amount,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Transaction::Payment(payment) => &payment.description,
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => &transfer.description,
        }
    }

    pub fn is_transfer(&self) -> bool {
        !matches!(self, Transaction::Payment(_))
    }

    pub fn as_payment(&self) -> Option<&Payment> {
        match self {
            Transaction::Payment(payment) => Some(payment),
            _ => None,
        }
    }

    pub fn as_transfer(&self) -> Option<&Transfer> {
        match self {
            Transaction::Payment(_) => None,
            Transaction::Transfer(transfer)
            | Transaction::IncomingTransfer(transfer)
            | Transaction::OutgoingTransfer(transfer) => Some(transfer),
        }
    }

    /// Returns a copy carrying `rates` if this is a payment; other variants
    /// are returned unchanged.
    pub fn with_rates(&self, rates: InterestRates) -> Transaction {
        match self.as_payment() {
            Some(payment) => Transaction::Payment(Payment {
                incoming_interest: rates.incoming,
                outgoing_interest: rates.outgoing,
                ..payment.clone()
            }),
            None => self.clone(),
        }
    }

    /// Checks the record against the attribute rules without correcting it.
    pub fn validate(&self) -> Result<()> {
        let amount = self.amount();
        if !amount.is_finite() {
            return Err(BankError::TransactionAttributeInvalid(format!(
                "amount must be a finite number, got {amount}"
            )));
        }
        if let Some(transfer) = self.as_transfer() {
            checked_transfer_amount(transfer.amount)?;
        } else if let Some(payment) = self.as_payment() {
            checked_rate("incoming interest", payment.incoming_interest)?;
            checked_rate("outgoing interest", payment.outgoing_interest)?;
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {:?} {:.2}",
            self.kind(),
            self.date(),
            self.description(),
            self.calculate()
        )?;
        if let Some(transfer) = self.as_transfer() {
            write!(f, " ({} -> {})", transfer.sender, transfer.recipient)
        } else if let Some(payment) = self.as_payment() {
            write!(
                f,
                " (incoming interest {}, outgoing interest {})",
                payment.incoming_interest, payment.outgoing_interest
            )
        } else {
            Ok(())
        }
    }
}

impl From<Payment> for Transaction {
    fn from(payment: Payment) -> Self {
        Transaction::Payment(payment)
    }
}

/// A deposit (positive amount) or withdrawal (negative amount) with interest.
///
/// Decoding goes through [`Payment::new`], so stored rates outside `[0, 1]`
/// get the same corrections as constructed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PaymentRecord")]
pub struct Payment {
    date: String,
    amount: f64,
    description: String,
    incoming_interest: f64,
    outgoing_interest: f64,
}

impl Payment {
    /// Builds a payment, correcting out-of-range rates the same way the
    /// setters do: a bad incoming rate is ignored, a bad outgoing rate is 0.
    pub fn new(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        incoming_interest: f64,
        outgoing_interest: f64,
    ) -> Self {
        let mut payment = Self {
            date: date.into(),
            amount,
            description: description.into(),
            incoming_interest: 0.0,
            outgoing_interest: 0.0,
        };
        payment.set_incoming_interest(incoming_interest);
        payment.set_outgoing_interest(outgoing_interest);
        payment
    }

    /// Builds a payment, rejecting out-of-range rates.
    pub fn try_new(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        incoming_interest: f64,
        outgoing_interest: f64,
    ) -> Result<Self> {
        Ok(Self {
            date: date.into(),
            amount,
            description: description.into(),
            incoming_interest: checked_rate("incoming interest", incoming_interest)?,
            outgoing_interest: checked_rate("outgoing interest", outgoing_interest)?,
        })
    }

    pub fn calculate(&self) -> f64 {
        if self.amount > 0.0 {
            self.amount * (1.0 + self.incoming_interest)
        } else {
            self.amount * (1.0 + self.outgoing_interest)
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn incoming_interest(&self) -> f64 {
        self.incoming_interest
    }

    pub fn outgoing_interest(&self) -> f64 {
        self.outgoing_interest
    }

    pub fn rates(&self) -> InterestRates {
        InterestRates {
            incoming: self.incoming_interest,
            outgoing: self.outgoing_interest,
        }
    }

    /// Out-of-range input is logged and leaves the current rate untouched.
    pub fn set_incoming_interest(&mut self, rate: f64) {
        if is_valid_rate(rate) {
            self.incoming_interest = rate;
        } else {
            tracing::warn!(rate, "ignoring incoming interest outside [0, 1]");
        }
    }

    /// Out-of-range input is logged and resets the rate to 0.
    pub fn set_outgoing_interest(&mut self, rate: f64) {
        if is_valid_rate(rate) {
            self.outgoing_interest = rate;
        } else {
            tracing::warn!(rate, "outgoing interest outside [0, 1], resetting to 0");
            self.outgoing_interest = 0.0;
        }
    }

    pub fn try_set_incoming_interest(&mut self, rate: f64) -> Result<()> {
        self.incoming_interest = checked_rate("incoming interest", rate)?;
        Ok(())
    }

    pub fn try_set_outgoing_interest(&mut self, rate: f64) -> Result<()> {
        self.outgoing_interest = checked_rate("outgoing interest", rate)?;
        Ok(())
    }
}

/// Money moved between a sender and a recipient. The amount is always
/// stored as a non-negative value; the variant decides the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransferRecord")]
pub struct Transfer {
    date: String,
    amount: f64,
    description: String,
    sender: String,
    recipient: String,
}

impl Transfer {
    /// Builds a transfer, clamping a non-positive amount to 0.
    pub fn new(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        let mut transfer = Self {
            date: date.into(),
            amount: 0.0,
            description: description.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        };
        transfer.set_amount(amount);
        transfer
    }

    /// Builds a transfer, rejecting a non-positive amount.
    pub fn try_new(
        date: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            date: date.into(),
            amount: checked_transfer_amount(amount)?,
            description: description.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Values `<= 0` (and NaN) are logged and stored as exactly 0.
    pub fn set_amount(&mut self, amount: f64) {
        if amount > 0.0 {
            self.amount = amount;
        } else {
            tracing::warn!(amount, "transfer amount must be positive, clamping to 0");
            self.amount = 0.0;
        }
    }

    pub fn try_set_amount(&mut self, amount: f64) -> Result<()> {
        self.amount = checked_transfer_amount(amount)?;
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.sender = sender.into();
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
    }
}

/// Payment fields as they appear in an account file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRecord {
    date: String,
    amount: f64,
    description: String,
    incoming_interest: f64,
    outgoing_interest: f64,
}

impl From<PaymentRecord> for Payment {
    fn from(record: PaymentRecord) -> Self {
        Payment::new(
            record.date,
            record.amount,
            record.description,
            record.incoming_interest,
            record.outgoing_interest,
        )
    }
}

/// Transfer fields as they appear in an account file.
#[derive(Deserialize)]
struct TransferRecord {
    date: String,
    amount: f64,
    description: String,
    sender: String,
    recipient: String,
}

impl From<TransferRecord> for Transfer {
    fn from(record: TransferRecord) -> Self {
        Transfer::new(
            record.date,
            record.amount,
            record.description,
            record.sender,
            record.recipient,
        )
    }
}

fn checked_transfer_amount(amount: f64) -> Result<f64> {
    if amount > 0.0 && amount.is_finite() {
        Ok(amount)
    } else {
        Err(BankError::TransactionAttributeInvalid(format!(
            "transfer amount must be positive, got {amount}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary() -> Transaction {
        Transaction::payment("01.01.2025", 1000.0, "Lohn", 0.05, 0.1)
    }

    #[test]
    fn payment_applies_incoming_interest_to_deposits() {
        assert!((salary().calculate() - 1050.0).abs() < 1e-9);
    }

    #[test]
    fn payment_applies_outgoing_interest_to_withdrawals() {
        let rent = Transaction::payment("02.01.2025", -500.0, "Miete", 0.05, 0.1);
        assert!((rent.calculate() + 550.0).abs() < 1e-9);

        let zero = Transaction::payment("02.01.2025", 0.0, "Nichts", 0.05, 0.1);
        assert_eq!(zero.calculate(), 0.0);
    }

    #[test]
    fn transfer_variants_sign_their_amount() {
        let plain = Transaction::transfer("03.01.2025", 75.0, "Split", "Adam", "Eva");
        let incoming = Transaction::incoming_transfer("03.01.2025", 200.0, "Geschenk", "Bob", "Adam");
        let outgoing = Transaction::outgoing_transfer("04.01.2025", 400.0, "Auto", "Adam", "Bob");
        assert_eq!(plain.calculate(), 75.0);
        assert_eq!(incoming.calculate(), 200.0);
        assert_eq!(outgoing.calculate(), -400.0);
    }

    #[test]
    fn transfer_set_amount_clamps_non_positive_values() {
        let mut transfer = Transfer::new("05.01.2025", 100.0, "Test", "Adam", "Eva");
        transfer.set_amount(-50.0);
        assert_eq!(transfer.amount(), 0.0);

        let clamped = Transfer::new("05.01.2025", -10.0, "Test", "Adam", "Eva");
        assert_eq!(clamped.amount(), 0.0);
    }

    #[test]
    fn strict_transfer_api_rejects_non_positive_values() {
        let mut transfer = Transfer::try_new("05.01.2025", 100.0, "Test", "Adam", "Eva").unwrap();
        let err = transfer.try_set_amount(-50.0).expect_err("negative amount");
        assert!(matches!(err, BankError::TransactionAttributeInvalid(_)));
        assert_eq!(transfer.amount(), 100.0);
        assert!(Transfer::try_new("05.01.2025", 0.0, "Test", "Adam", "Eva").is_err());
    }

    #[test]
    fn payment_setters_keep_legacy_corrections() {
        let mut payment = Payment::new("01.01.2025", 10.0, "Test", 0.2, 0.3);
        payment.set_incoming_interest(1.5);
        assert_eq!(payment.incoming_interest(), 0.2);
        payment.set_outgoing_interest(-0.5);
        assert_eq!(payment.outgoing_interest(), 0.0);

        assert!(payment.try_set_incoming_interest(2.0).is_err());
        assert!(payment.try_set_outgoing_interest(0.4).is_ok());
        assert_eq!(payment.outgoing_interest(), 0.4);
        assert!(Payment::try_new("01.01.2025", 10.0, "Test", 0.2, 1.01).is_err());
    }

    #[test]
    fn equality_covers_variant_and_every_field() {
        let incoming = Transaction::incoming_transfer("01.01.2025", 20.0, "X", "A", "B");
        let plain = Transaction::transfer("01.01.2025", 20.0, "X", "A", "B");
        assert_ne!(incoming, plain);
        assert_eq!(incoming, incoming.clone());

        let other_rates = Transaction::payment("01.01.2025", 1000.0, "Lohn", 0.0, 0.1);
        assert_ne!(salary(), other_rates);
        let other_recipient = Transaction::transfer("01.01.2025", 20.0, "X", "A", "C");
        assert_ne!(plain, other_recipient);
    }

    #[test]
    fn with_rates_only_touches_payments() {
        let rates = InterestRates::new(0.2, 0.3).unwrap();
        let original = salary();
        let rated = original.with_rates(rates);
        assert_eq!(rated.as_payment().map(Payment::rates), Some(rates));
        assert_eq!(original.as_payment().map(Payment::incoming_interest), Some(0.05));

        let transfer = Transaction::transfer("01.01.2025", 20.0, "X", "A", "B");
        assert_eq!(transfer.with_rates(rates), transfer);
    }

    #[test]
    fn validate_flags_bad_attributes() {
        assert!(salary().validate().is_ok());
        let clamped = Transaction::transfer("01.01.2025", -1.0, "X", "A", "B");
        assert!(matches!(
            clamped.validate(),
            Err(BankError::TransactionAttributeInvalid(_))
        ));
        let infinite = Transaction::payment("01.01.2025", f64::INFINITY, "X", 0.0, 0.0);
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn variant_accessors_split_payments_from_transfers() {
        let outgoing = Transaction::outgoing_transfer("04.01.2025", 400.0, "Auto", "Adam", "Bob");
        assert!(outgoing.is_transfer());
        assert_eq!(outgoing.as_transfer().map(Transfer::recipient), Some("Bob"));
        assert!(outgoing.as_payment().is_none());

        assert!(!salary().is_transfer());
        assert!(salary().as_transfer().is_none());
    }

    #[test]
    fn decoding_applies_constructor_corrections() {
        let transfer: Transfer = serde_json::from_str(
            r#"{"date": "04.01.2025", "amount": -400.0, "description": "Auto", "sender": "Adam", "recipient": "Bob"}"#,
        )
        .unwrap();
        assert_eq!(transfer.amount(), 0.0);

        let payment: Payment = serde_json::from_str(
            r#"{"date": "01.01.2025", "amount": 100.0, "description": "Bonus", "incomingInterest": 5.0, "outgoingInterest": -1.0}"#,
        )
        .unwrap();
        assert_eq!(payment.incoming_interest(), 0.0);
        assert_eq!(payment.outgoing_interest(), 0.0);
        assert_eq!(payment.calculate(), 100.0);
    }

    #[test]
    fn display_names_the_variant() {
        let outgoing = Transaction::outgoing_transfer("04.01.2025", 400.0, "Auto", "Adam", "Bob");
        let rendered = outgoing.to_string();
        assert!(rendered.starts_with("[OutgoingTransfer] 04.01.2025"));
        assert!(rendered.contains("-400.00"));
        assert!(rendered.contains("Adam -> Bob"));
    }
}
