pub mod bank;
pub mod utils;

pub use bank::PrivateBank;
