//! Error types for wallet operations

use thiserror::Error;

use crate::types::Natural;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Ledger consistency violation: {0}")]
    Consistency(String),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Natural, requested: Natural },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;
