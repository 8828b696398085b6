//! Core of the tally finance tracker.
//!
//! The crate holds the transaction store ([`Ledger`]), the totals calculator
//! ([`Totals`]), the persistence adapter ([`storage`]) and the [`Engine`]
//! that ties them together. Presentation lives behind the [`Render`] and
//! [`Confirm`] traits.

pub use currency::Currency;
pub use error::EngineError;
pub use ledger::{EditMode, Ledger, Submitted};
pub use money::Money;
pub use ops::{Deletion, Engine, EngineBuilder};
pub use render::{Confirm, Render, Snapshot, View};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use totals::Totals;
pub use transactions::{Filter, Transaction, TransactionDraft, TransactionKind};

mod currency;
mod error;
mod ledger;
mod money;
mod ops;
mod render;
pub mod storage;
mod totals;
mod transactions;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
