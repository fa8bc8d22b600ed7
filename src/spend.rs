//! Spend assembly: input selection and output construction

use log::debug;

use crate::error::{Result, WalletError};
use crate::types::{Natural, Transaction, TransactionInput, TransactionOutput};
use crate::utxo::UtxoSet;

/// BuildSpend: 𝒰𝒮 × ℕ × ℕ × 𝕊 × ℕ × 𝕊 → 𝒯𝒳
///
/// For owned subset os with reported balance bal, amount amt, fee f:
/// 1. If bal < amt: insufficient funds, nothing is built.
/// 2. Select greedily from a working copy of os in ascending key order,
///    removing each selected output, until the selected total covers amt.
///    An exhausted working copy below amt is insufficient funds.
/// 3. vin = one input per selected output, each carrying the credential
///    as its solution.
/// 4. vout = (amt, recipient), plus change (total - amt - f, credential)
///    iff total > amt + f.
///
/// The fee is implicit: it is the gap between consumed and produced value
/// and never appears as an output. The caller's subset is not modified.
pub fn build_spend(
    owned: &UtxoSet,
    balance: Natural,
    amount: Natural,
    recipient: &str,
    fee: Natural,
    credential: &str,
) -> Result<Transaction> {
    // 1. Balance precondition
    if balance < amount {
        return Err(WalletError::InsufficientFunds { balance, requested: amount });
    }

    // 2. Greedy selection from a working copy
    let mut working = owned.clone();
    let mut vin: Vec<TransactionInput> = Vec::new();
    let mut sending: Natural = 0;

    while sending < amount {
        let (tx_hash, index, value) = match working.iter().next() {
            Some((tx_hash, index, output)) => (*tx_hash, index, output.value),
            None => {
                // Subset exhausted below the requested amount
                return Err(WalletError::InsufficientFunds {
                    balance: sending,
                    requested: amount,
                });
            }
        };

        sending = sending
            .checked_add(value)
            .ok_or_else(|| WalletError::Overflow("selected input sum".to_string()))?;

        vin.push(TransactionInput {
            tx_hash,
            index,
            solution: credential.to_string(),
        });
        working.remove(&tx_hash, index);
    }

    debug!("selected {} inputs totalling {}", vin.len(), sending);

    // 3. Payment output, then change when the selection overshoots the fee
    let mut vout = vec![TransactionOutput {
        value: amount,
        lock: recipient.to_string(),
    }];

    let spent = amount
        .checked_add(fee)
        .ok_or_else(|| WalletError::Overflow("amount plus fee".to_string()))?;

    if sending > spent {
        vout.push(TransactionOutput {
            value: sending - spent,
            lock: credential.to_string(),
        });
    }

    Ok(Transaction { vin, vout })
}
