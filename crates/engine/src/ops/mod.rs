use crate::{
    Currency, EngineError, Ledger, ResultEngine,
    storage::{self, DEFAULT_KEY, KeyValueStore, MemoryStore},
};

mod export;
mod transactions;
mod view;

pub use transactions::Deletion;

/// The ledger plus the store it is persisted to.
///
/// Every mutating call runs against a copy of the ledger, writes the result
/// to the store, and only then replaces the in-memory state, so memory and
/// store never disagree after a failed write.
#[derive(Debug)]
pub struct Engine {
    ledger: Ledger,
    store: Box<dyn KeyValueStore>,
    key: String,
    currency: Currency,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Run `op` on a copy of the ledger and commit it.
    ///
    /// `op` returns its output and whether the records changed; unchanged
    /// records skip the write but still keep mode changes.
    fn apply<T, F>(&mut self, op: F) -> ResultEngine<T>
    where
        F: FnOnce(&mut Ledger) -> ResultEngine<(T, bool)>,
    {
        let mut next = self.ledger.clone();
        let (output, changed) = op(&mut next).inspect_err(|err| {
            if err.is_validation() {
                tracing::warn!("rejected transaction: {err}");
            }
        })?;
        if changed {
            storage::save(self.store.as_mut(), &self.key, next.transactions())?;
        }
        self.ledger = next;
        Ok(output)
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    store: Option<Box<dyn KeyValueStore>>,
    key: String,
    currency: Currency,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            store: None,
            key: DEFAULT_KEY.to_string(),
            currency: Currency::default(),
        }
    }
}

impl EngineBuilder {
    /// Pass the store the ledger is loaded from and saved to.
    ///
    /// Defaults to an empty [`MemoryStore`].
    pub fn store<S>(mut self, store: S) -> EngineBuilder
    where
        S: KeyValueStore + 'static,
    {
        self.store = Some(Box::new(store));
        self
    }

    /// Slot name inside the store.
    pub fn key(mut self, key: &str) -> EngineBuilder {
        self.key = key.to_string();
        self
    }

    /// Currency used for display.
    pub fn currency(mut self, currency: Currency) -> EngineBuilder {
        self.currency = currency;
        self
    }

    /// Construct `Engine`, loading any stored records.
    pub fn build(self) -> ResultEngine<Engine> {
        let key = self.key.trim();
        if key.is_empty() {
            return Err(EngineError::InvalidValue(
                "storage key must not be empty".to_string(),
            ));
        }
        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>);
        let ledger = Ledger::from_transactions(storage::load(store.as_ref(), key));
        Ok(Engine {
            ledger,
            store,
            key: key.to_string(),
            currency: self.currency,
        })
    }
}
