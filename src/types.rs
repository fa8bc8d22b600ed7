//! Core wallet types for ledger reconstruction and spend assembly

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};

/// Hash type: 256-bit transaction identity
pub type Hash = [u8; 32];

/// Natural number type
pub type Natural = u64;

/// Transaction Input: ℐ = ℍ × ℕ × 𝕊
///
/// References the output at position `index` of the transaction identified
/// by `tx_hash`. The solution is the opaque claiming credential; this crate
/// attaches it without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub tx_hash: Hash,
    pub index: Natural,
    pub solution: String,
}

/// Transaction Output: 𝒯 = ℕ × 𝕊
///
/// A value locked under an opaque credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Natural,
    pub lock: String,
}

/// Transaction: 𝒯𝒳 = ℐ* × 𝒯*
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub vin: Vec<TransactionInput>,
    pub vout: Vec<TransactionOutput>,
}

/// Block: ℬ = 𝒯𝒳*
///
/// Height is positional: a block's height is its index in the containing
/// sequence. Unknown wire fields (nonce, timestamp) are ignored on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub transactions: Vec<Transaction>,
}

impl Transaction {
    /// Minting transaction: consumes nothing, outputs appear from nowhere
    pub fn coinbase(vout: Vec<TransactionOutput>) -> Self {
        Self { vin: Vec::new(), vout }
    }

    /// A coinbase transaction has no inputs
    pub fn is_coinbase(&self) -> bool {
        self.vin.is_empty()
    }

    /// Total value across outputs
    pub fn vout_total(&self) -> Result<Natural> {
        let mut total: Natural = 0;
        for output in &self.vout {
            total = total
                .checked_add(output.value)
                .ok_or_else(|| WalletError::Overflow("transaction output sum".to_string()))?;
        }
        Ok(total)
    }
}

impl Block {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}
