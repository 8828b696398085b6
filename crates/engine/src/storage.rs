//! Persistence of the ledger into a key-value string store.
//!
//! The whole record list lives in one slot as a JSON array. Reading is
//! forgiving: a missing, unreadable or unparsable slot yields an empty list
//! and a warning, and a single bad record is dropped without losing the
//! others. Writing is strict and synchronous.

use std::{
    collections::{HashMap, HashSet},
    fmt, fs,
    path::PathBuf,
};

use serde_json::Value;

use crate::{EngineError, ResultEngine, Totals, Transaction, util::normalize_required_text};

/// Default slot name for the record list.
pub const DEFAULT_KEY: &str = "transactions";

/// A string-keyed store of string values.
pub trait KeyValueStore: fmt::Debug {
    fn get(&self, key: &str) -> ResultEngine<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()>;
}

/// Process-local store, handy for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot, e.g. with data written by an earlier session.
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: each slot is a `<key>.json` file under `root`.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Serializes the records as the JSON array stored in the slot.
pub fn encode(records: &[Transaction]) -> ResultEngine<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parses a stored JSON array, keeping every record that satisfies the
/// ledger invariants.
///
/// A record that cannot be read, has a non-positive amount or a blank
/// description, repeats an earlier id, or would push the totals out of range
/// is skipped with a warning and the rest of the slot is kept. Only a slot
/// that is not a JSON array at all is an error.
pub fn decode(raw: &str) -> ResultEngine<Vec<Transaction>> {
    let values: Vec<Value> = serde_json::from_str(raw)?;
    let mut records = Vec::with_capacity(values.len());
    let mut seen = HashSet::with_capacity(values.len());
    let mut totals = Totals::default();
    for (index, value) in values.into_iter().enumerate() {
        match check_record(value, &seen, totals) {
            Ok((tx, next)) => {
                seen.insert(tx.id);
                totals = next;
                records.push(tx);
            }
            Err(err) => tracing::warn!(index, "skipping stored transaction: {err}"),
        }
    }
    Ok(records)
}

fn check_record(
    value: Value,
    seen: &HashSet<i64>,
    totals: Totals,
) -> ResultEngine<(Transaction, Totals)> {
    let mut tx: Transaction = serde_json::from_value(value)?;
    if seen.contains(&tx.id) {
        return Err(EngineError::CorruptData(format!("duplicate id {}", tx.id)));
    }
    if !tx.amount.is_positive() {
        return Err(EngineError::CorruptData(format!(
            "non-positive amount for id {}",
            tx.id
        )));
    }
    tx.description = normalize_required_text(&tx.description)
        .map_err(|_| EngineError::CorruptData(format!("blank description for id {}", tx.id)))?;
    let totals = totals
        .with(&tx)
        .map_err(|_| EngineError::CorruptData(format!("totals overflow at id {}", tx.id)))?;
    Ok((tx, totals))
}

/// Reads the record list from `key`, degrading to an empty list on any
/// problem.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Vec<Transaction> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored transactions, starting empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(key, "failed to read stored transactions: {err}");
            return Vec::new();
        }
    };
    match decode(&raw) {
        Ok(records) => {
            tracing::info!(key, count = records.len(), "loaded transactions");
            records
        }
        Err(err) => {
            tracing::warn!(key, "ignoring invalid stored transactions: {err}");
            Vec::new()
        }
    }
}

/// Writes the full record list to `key`.
pub fn save(store: &mut dyn KeyValueStore, key: &str, records: &[Transaction]) -> ResultEngine<()> {
    let payload = encode(records)?;
    store.set(key, &payload)?;
    tracing::debug!(key, count = records.len(), "saved transactions");
    Ok(())
}
