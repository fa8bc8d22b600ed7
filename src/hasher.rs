//! Transaction identity derivation

use sha2::{Digest, Sha256};

use crate::error::{Result, WalletError};
use crate::types::{Hash, Natural, Transaction};

/// TxId: 𝒯𝒳 × ℕ → ℍ
///
/// Derives the ledger identity of a transaction from its content and the
/// height of the containing block. Identities must be deterministic; all
/// parties reading the same chain must derive the same keys or their
/// reconstructions diverge.
pub trait TransactionHasher {
    fn hash_transaction(&self, tx: &Transaction, height: Natural) -> Result<Hash>;
}

/// Default identity: SHA-256 over the JSON encoding of the transaction
/// followed by the height as little-endian bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl TransactionHasher for Sha256Hasher {
    fn hash_transaction(&self, tx: &Transaction, height: Natural) -> Result<Hash> {
        let encoded = serde_json::to_vec(tx)
            .map_err(|e| WalletError::Serialization(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        hasher.update(&height.to_le_bytes());
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Ok(hash)
    }
}
