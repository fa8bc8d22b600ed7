//! UTXO set container: live outputs keyed by transaction identity and position

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use bitcoin_hashes::hex::{FromHex, ToHex};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};
use crate::types::{Hash, Natural, TransactionOutput};

/// UTXO Set: 𝒰𝒮 = ℍ → (ℕ → 𝒯)
///
/// Ordered maps on both levels, so iteration, selection, and serialization
/// are deterministic in ascending (tx_hash, index) order. A transaction with
/// no live outputs left has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoSet(pub BTreeMap<Hash, BTreeMap<Natural, TransactionOutput>>);

impl UtxoSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Number of live outputs across all transactions
    pub fn utxo_count(&self) -> usize {
        self.0.values().map(|outputs| outputs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any output of the given transaction is live
    pub fn contains_tx(&self, tx_hash: &Hash) -> bool {
        self.0.contains_key(tx_hash)
    }

    pub fn contains(&self, tx_hash: &Hash, index: Natural) -> bool {
        self.0.get(tx_hash).map_or(false, |outputs| outputs.contains_key(&index))
    }

    pub fn get(&self, tx_hash: &Hash, index: Natural) -> Option<&TransactionOutput> {
        self.0.get(tx_hash).and_then(|outputs| outputs.get(&index))
    }

    /// Insert an output under (tx_hash, index), returning any displaced output
    pub fn insert(
        &mut self,
        tx_hash: Hash,
        index: Natural,
        output: TransactionOutput,
    ) -> Option<TransactionOutput> {
        self.0.entry(tx_hash).or_default().insert(index, output)
    }

    /// Remove and return the output at (tx_hash, index)
    ///
    /// A transaction left without outputs is dropped entirely, so
    /// `contains_tx` never reports an empty entry.
    pub fn remove(&mut self, tx_hash: &Hash, index: Natural) -> Option<TransactionOutput> {
        let outputs = self.0.get_mut(tx_hash)?;
        let removed = outputs.remove(&index);
        if outputs.is_empty() {
            self.0.remove(tx_hash);
        }
        removed
    }

    /// Sum of all live output values
    pub fn total_value(&self) -> Result<Natural> {
        let mut total: Natural = 0;
        for (_, _, output) in self.iter() {
            total = total
                .checked_add(output.value)
                .ok_or_else(|| WalletError::Overflow("UTXO set value sum".to_string()))?;
        }
        Ok(total)
    }

    /// Iterate live outputs in ascending (tx_hash, index) order
    pub fn iter(&self) -> impl Iterator<Item = (&Hash, Natural, &TransactionOutput)> + '_ {
        self.0.iter().flat_map(|(tx_hash, outputs)| {
            outputs.iter().map(move |(index, output)| (tx_hash, *index, output))
        })
    }
}

impl Serialize for UtxoSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (tx_hash, outputs) in &self.0 {
            map.serialize_entry(&tx_hash.to_hex(), outputs)?;
        }

        map.end()
    }
}

struct UtxoSetVisitor {
    marker: PhantomData<fn() -> UtxoSet>,
}

impl UtxoSetVisitor {
    fn new() -> Self {
        UtxoSetVisitor { marker: PhantomData }
    }
}

impl<'de> Visitor<'de> for UtxoSetVisitor {
    type Value = UtxoSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from hex transaction identities to output maps")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map: BTreeMap<Hash, BTreeMap<Natural, TransactionOutput>> = BTreeMap::new();

        while let Some((key, outputs)) =
            access.next_entry::<String, BTreeMap<Natural, TransactionOutput>>()?
        {
            let tx_hash = Hash::from_hex(&key).map_err(serde::de::Error::custom)?;
            map.insert(tx_hash, outputs);
        }

        Ok(UtxoSet(map))
    }
}

impl<'de> Deserialize<'de> for UtxoSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(UtxoSetVisitor::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(value: Natural, lock: &str) -> TransactionOutput {
        TransactionOutput { value, lock: lock.to_string() }
    }

    #[test]
    fn test_insert_and_get() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(100, "alice"));

        assert!(set.contains(&[1; 32], 0));
        assert!(set.contains_tx(&[1; 32]));
        assert_eq!(set.get(&[1; 32], 0).unwrap().value, 100);
        assert_eq!(set.utxo_count(), 1);
    }

    #[test]
    fn test_remove_returns_output() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(100, "alice"));

        let removed = set.remove(&[1; 32], 0).unwrap();
        assert_eq!(removed.value, 100);
        assert!(set.remove(&[1; 32], 0).is_none());
    }

    #[test]
    fn test_remove_prunes_empty_transaction_entry() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(100, "alice"));
        set.insert([1; 32], 1, output(200, "bob"));

        set.remove(&[1; 32], 0);
        assert!(set.contains_tx(&[1; 32]));

        set.remove(&[1; 32], 1);
        assert!(!set.contains_tx(&[1; 32]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_missing_index_keeps_entry() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(100, "alice"));

        assert!(set.remove(&[1; 32], 5).is_none());
        assert!(set.contains(&[1; 32], 0));
    }

    #[test]
    fn test_iter_is_ordered_by_hash_then_index() {
        let mut set = UtxoSet::new();
        set.insert([2; 32], 0, output(1, "a"));
        set.insert([1; 32], 1, output(2, "a"));
        set.insert([1; 32], 0, output(3, "a"));
        set.insert([3; 32], 2, output(4, "a"));

        let keys: Vec<(Hash, Natural)> =
            set.iter().map(|(tx_hash, index, _)| (*tx_hash, index)).collect();

        assert_eq!(
            keys,
            vec![([1; 32], 0), ([1; 32], 1), ([2; 32], 0), ([3; 32], 2)]
        );
    }

    #[test]
    fn test_total_value() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(100, "alice"));
        set.insert([2; 32], 0, output(250, "bob"));

        assert_eq!(set.total_value().unwrap(), 350);
    }

    #[test]
    fn test_total_value_overflow() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(u64::MAX, "alice"));
        set.insert([2; 32], 0, output(1, "bob"));

        assert!(set.total_value().is_err());
    }

    #[test]
    fn test_serialize_uses_hex_keys() {
        let mut set = UtxoSet::new();
        set.insert([0xab; 32], 0, output(100, "alice"));

        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains(&"ab".repeat(32)));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut set = UtxoSet::new();
        set.insert([1; 32], 0, output(100, "alice"));
        set.insert([1; 32], 3, output(50, "bob"));
        set.insert([9; 32], 1, output(7, "carol"));

        let json = serde_json::to_string(&set).unwrap();
        let back: UtxoSet = serde_json::from_str(&json).unwrap();

        assert_eq!(back, set);
    }

    #[test]
    fn test_deserialize_rejects_bad_hex_key() {
        let result = serde_json::from_str::<UtxoSet>(r#"{"zz": {}}"#);
        assert!(result.is_err());
    }
}
