//! Ownership filtering over a reconstructed ledger

use crate::error::{Result, WalletError};
use crate::types::Natural;
use crate::utxo::UtxoSet;

/// OwnedUtxos: 𝒰𝒮 × 𝕊 → ℕ × 𝒰𝒮
///
/// Projects the subset of live outputs whose lock equals the credential,
/// keyed exactly as in the full set, together with their total value.
/// A pure read: the input set is never modified, and lock comparison is
/// plain string equality with no credential interpretation.
pub fn owned_utxos(utxo_set: &UtxoSet, credential: &str) -> Result<(Natural, UtxoSet)> {
    let mut owned = UtxoSet::new();
    let mut balance: Natural = 0;

    for (tx_hash, index, output) in utxo_set.iter() {
        if output.lock == credential {
            balance = balance
                .checked_add(output.value)
                .ok_or_else(|| WalletError::Overflow("owned balance sum".to_string()))?;
            owned.insert(*tx_hash, index, output.clone());
        }
    }

    Ok((balance, owned))
}
