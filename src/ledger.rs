//! Ledger reconstruction: folding ordered blocks into the live UTXO set

use bitcoin_hashes::hex::ToHex;
use log::{debug, trace};

use crate::error::{Result, WalletError};
use crate::hasher::TransactionHasher;
use crate::types::{Block, Hash, Natural, Transaction};
use crate::utxo::UtxoSet;

/// ReconstructLedger: ℬ* → 𝒰𝒮
///
/// For blocks b_0..b_n and empty initial set us:
/// 1. For each block b_h (height h is the position in the sequence):
///    - For each transaction tx ∈ b_h in order:
///      - txid = TxId(tx, h)
///      - us = ApplyTransaction(tx, txid, us)
/// 2. Return us
///
/// Any unknown input reference or duplicate live identity aborts the whole
/// reconstruction; a half-applied ledger is never returned.
pub fn reconstruct_ledger(
    blocks: &[Block],
    hasher: &dyn TransactionHasher,
) -> Result<UtxoSet> {
    let mut utxo_set = UtxoSet::new();

    for (height, block) in blocks.iter().enumerate() {
        trace!(
            "applying block at height {} with {} transactions",
            height,
            block.transactions.len()
        );

        for tx in &block.transactions {
            let txid = hasher.hash_transaction(tx, height as Natural)?;
            utxo_set = apply_transaction(tx, txid, utxo_set)?;
        }
    }

    debug!("reconstructed ledger holds {} live outputs", utxo_set.utxo_count());
    Ok(utxo_set)
}

/// ApplyTransaction: 𝒯𝒳 × ℍ × 𝒰𝒮 → 𝒰𝒮
///
/// For transaction tx with identity txid and UTXO set us:
/// 1. Remove every (input.tx_hash, input.index) from us. An absent key is
///    a consistency violation: the reference is unknown or already consumed.
/// 2. Insert each output of tx.vout under (txid, position). An identity
///    that still has live outputs in us is a consistency violation.
/// 3. Return us.
///
/// All removals happen against the pre-transaction state, so a transaction
/// referencing its own identity fails at step 1. A coinbase transaction
/// (empty vin) skips straight to step 2.
pub fn apply_transaction(
    tx: &Transaction,
    txid: Hash,
    mut utxo_set: UtxoSet,
) -> Result<UtxoSet> {
    // 1. Consume inputs
    for input in &tx.vin {
        if utxo_set.remove(&input.tx_hash, input.index).is_none() {
            return Err(WalletError::Consistency(format!(
                "input {}:{} is not an unspent output",
                input.tx_hash.to_hex(),
                input.index
            )));
        }
    }

    // 2. Mint outputs under a fresh identity
    if utxo_set.contains_tx(&txid) {
        return Err(WalletError::Consistency(format!(
            "transaction identity {} already has live outputs",
            txid.to_hex()
        )));
    }

    for (index, output) in tx.vout.iter().enumerate() {
        utxo_set.insert(txid, index as Natural, output.clone());
    }

    Ok(utxo_set)
}
