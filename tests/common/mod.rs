#![allow(dead_code)]

use bank_core::{PrivateBank, Transaction};
use std::path::PathBuf;
use tempfile::TempDir;

pub const INCOMING: f64 = 0.05;
pub const OUTGOING: f64 = 0.1;

/// Creates a bank backed by a fresh temporary directory. Keep the guard alive
/// for as long as the bank is used.
pub fn setup_bank() -> (TempDir, PrivateBank) {
    let temp = TempDir::new().expect("create temp dir");
    let bank = open_bank(&accounts_dir(&temp));
    (temp, bank)
}

pub fn accounts_dir(temp: &TempDir) -> PathBuf {
    temp.path().join("accounts")
}

pub fn open_bank(dir: &std::path::Path) -> PrivateBank {
    PrivateBank::new("TestBank", INCOMING, OUTGOING, dir).expect("open bank")
}

pub fn salary() -> Transaction {
    Transaction::payment("01.01.2025", 1000.0, "Lohn", INCOMING, OUTGOING)
}

pub fn rent() -> Transaction {
    Transaction::payment("03.01.2025", -500.0, "Miete", INCOMING, OUTGOING)
}

pub fn gift() -> Transaction {
    Transaction::incoming_transfer("02.01.2025", 200.0, "Geschenk", "Bob", "Adam")
}

pub fn car() -> Transaction {
    Transaction::outgoing_transfer("04.01.2025", 400.0, "Auto", "Adam", "Bob")
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
