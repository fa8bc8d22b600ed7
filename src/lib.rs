//! # Wallet-Proof
//!
//! Pure reconstruction of a spendable-coin ledger and assembly of new
//! spends over it.
//!
//! This crate folds an ordered sequence of blocks into the set of unspent
//! transaction outputs, filters that set down to one owner's holdings, and
//! selects inputs and produces outputs for a new payment. It holds no
//! network, storage, or key material: blocks come in as values, a spend
//! goes out as a value.
//!
//! ## Architecture
//!
//! The pipeline has three stages, each a pure function:
//! - Ledger reconstruction (blocks to live UTXO set)
//! - Ownership filtering (UTXO set to one credential's subset and balance)
//! - Spend assembly (subset to a transaction with payment and change)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: All operations are deterministic and side-effect-free
//! 2. **Fail Loud**: A ledger inconsistency aborts reconstruction, never patches it
//! 3. **Checked Arithmetic**: Value sums never wrap silently
//! 4. **Exact Version Pinning**: Hash dependencies are pinned to exact versions
//!
//! ## Usage
//!
//! ```rust
//! use wallet_proof::WalletProof;
//! use wallet_proof::types::*;
//!
//! let wallet = WalletProof::new();
//!
//! let blocks = vec![Block::new(vec![Transaction::coinbase(vec![
//!     TransactionOutput { value: 1000, lock: "alice".to_string() },
//! ])])];
//!
//! let utxo_set = wallet.reconstruct_ledger(&blocks).unwrap();
//! let (balance, owned) = wallet.owned_utxos(&utxo_set, "alice").unwrap();
//! assert_eq!(balance, 1000);
//!
//! let tx = wallet.build_spend(&owned, balance, 600, "bob", 0, "alice").unwrap();
//! assert_eq!(tx.vout[0].lock, "bob");
//! ```

pub mod types;
pub mod utxo;
pub mod hasher;
pub mod ledger;
pub mod ownership;
pub mod spend;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use utxo::UtxoSet;
pub use hasher::{Sha256Hasher, TransactionHasher};
pub use error::{Result, WalletError};

/// Main wallet entry point
///
/// Bundles the three pipeline stages behind one value carrying the
/// transaction identity hasher they share.
///
/// # Examples
///
/// ```
/// use wallet_proof::WalletProof;
/// use wallet_proof::types::*;
///
/// let wallet = WalletProof::new();
///
/// // Mint a coin, then check who owns what
/// let blocks = vec![Block::new(vec![Transaction::coinbase(vec![
///     TransactionOutput { value: 500, lock: "alice".to_string() },
/// ])])];
///
/// let utxo_set = wallet.reconstruct_ledger(&blocks).unwrap();
/// assert_eq!(utxo_set.utxo_count(), 1);
///
/// let (balance, _) = wallet.owned_utxos(&utxo_set, "alice").unwrap();
/// assert_eq!(balance, 500);
/// ```
pub struct WalletProof {
    hasher: Box<dyn TransactionHasher>,
}

impl WalletProof {
    /// Create a wallet using the default SHA-256 identity hasher
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::WalletProof;
    ///
    /// let wallet = WalletProof::new();
    /// ```
    pub fn new() -> Self {
        Self { hasher: Box::new(Sha256Hasher::new()) }
    }

    /// Create a wallet with a caller-supplied identity hasher
    ///
    /// All parties reading one chain must use the same hasher or their
    /// ledgers diverge.
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::{Result, TransactionHasher, WalletProof};
    /// use wallet_proof::types::*;
    ///
    /// struct HeightHasher;
    ///
    /// impl TransactionHasher for HeightHasher {
    ///     fn hash_transaction(&self, _tx: &Transaction, height: Natural) -> Result<Hash> {
    ///         let mut hash = [0u8; 32];
    ///         hash[..8].copy_from_slice(&height.to_le_bytes());
    ///         Ok(hash)
    ///     }
    /// }
    ///
    /// let wallet = WalletProof::with_hasher(Box::new(HeightHasher));
    /// let blocks = vec![Block::new(vec![Transaction::coinbase(vec![
    ///     TransactionOutput { value: 100, lock: "alice".to_string() },
    /// ])])];
    ///
    /// let utxo_set = wallet.reconstruct_ledger(&blocks).unwrap();
    /// assert!(utxo_set.contains(&[0u8; 32], 0));
    /// ```
    pub fn with_hasher(hasher: Box<dyn TransactionHasher>) -> Self {
        Self { hasher }
    }

    /// Fold ordered blocks into the live UTXO set
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::WalletProof;
    /// use wallet_proof::types::*;
    ///
    /// let wallet = WalletProof::new();
    /// let blocks = vec![
    ///     Block::new(vec![Transaction::coinbase(vec![
    ///         TransactionOutput { value: 100, lock: "alice".to_string() },
    ///     ])]),
    ///     Block::new(vec![Transaction::coinbase(vec![
    ///         TransactionOutput { value: 200, lock: "bob".to_string() },
    ///     ])]),
    /// ];
    ///
    /// let utxo_set = wallet.reconstruct_ledger(&blocks).unwrap();
    /// assert_eq!(utxo_set.utxo_count(), 2);
    /// assert_eq!(utxo_set.total_value().unwrap(), 300);
    /// ```
    pub fn reconstruct_ledger(&self, blocks: &[Block]) -> Result<UtxoSet> {
        ledger::reconstruct_ledger(blocks, self.hasher.as_ref())
    }

    /// Project one credential's live outputs and their total value
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::WalletProof;
    /// use wallet_proof::types::*;
    ///
    /// let wallet = WalletProof::new();
    /// let blocks = vec![Block::new(vec![Transaction::coinbase(vec![
    ///     TransactionOutput { value: 100, lock: "alice".to_string() },
    ///     TransactionOutput { value: 200, lock: "bob".to_string() },
    /// ])])];
    ///
    /// let utxo_set = wallet.reconstruct_ledger(&blocks).unwrap();
    /// let (balance, owned) = wallet.owned_utxos(&utxo_set, "bob").unwrap();
    ///
    /// assert_eq!(balance, 200);
    /// assert_eq!(owned.utxo_count(), 1);
    /// ```
    pub fn owned_utxos(&self, utxo_set: &UtxoSet, credential: &str) -> Result<(Natural, UtxoSet)> {
        ownership::owned_utxos(utxo_set, credential)
    }

    /// Assemble a spend from an owned subset
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::WalletProof;
    /// use wallet_proof::types::*;
    ///
    /// let wallet = WalletProof::new();
    /// let blocks = vec![Block::new(vec![Transaction::coinbase(vec![
    ///     TransactionOutput { value: 1000, lock: "alice".to_string() },
    /// ])])];
    ///
    /// let utxo_set = wallet.reconstruct_ledger(&blocks).unwrap();
    /// let (balance, owned) = wallet.owned_utxos(&utxo_set, "alice").unwrap();
    ///
    /// let tx = wallet.build_spend(&owned, balance, 600, "bob", 50, "alice").unwrap();
    ///
    /// assert_eq!(tx.vin.len(), 1);
    /// assert_eq!(tx.vout.len(), 2); // payment plus change
    /// assert_eq!(tx.vout[1].value, 350);
    /// ```
    pub fn build_spend(
        &self,
        owned: &UtxoSet,
        balance: Natural,
        amount: Natural,
        recipient: &str,
        fee: Natural,
        credential: &str,
    ) -> Result<Transaction> {
        spend::build_spend(owned, balance, amount, recipient, fee, credential)
    }

    /// Derive the ledger identity of a transaction at a height
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::WalletProof;
    /// use wallet_proof::types::*;
    ///
    /// let wallet = WalletProof::new();
    /// let tx = Transaction::coinbase(vec![TransactionOutput {
    ///     value: 100,
    ///     lock: "alice".to_string(),
    /// }]);
    ///
    /// let first = wallet.hash_transaction(&tx, 0).unwrap();
    /// let again = wallet.hash_transaction(&tx, 0).unwrap();
    /// assert_eq!(first, again);
    /// ```
    pub fn hash_transaction(&self, tx: &Transaction, height: Natural) -> Result<Hash> {
        self.hasher.hash_transaction(tx, height)
    }
}

impl Default for WalletProof {
    /// Create a default wallet instance
    ///
    /// # Examples
    ///
    /// ```
    /// use wallet_proof::WalletProof;
    ///
    /// let wallet = WalletProof::default();
    /// ```
    fn default() -> Self {
        Self::new()
    }
}
