//! Seams towards the presentation layer.
//!
//! The engine never talks to a terminal. It hands a [`View`] to a [`Render`]
//! implementation and asks a [`Confirm`] implementation before destructive
//! changes.

use crate::{Currency, Filter, ResultEngine, Totals, Transaction};

/// Everything needed to draw the list and the summary cards.
#[derive(Clone, Debug, PartialEq)]
pub struct View<'a> {
    pub filter: Filter,
    /// Records matching `filter`, in insertion order.
    pub transactions: Vec<&'a Transaction>,
    /// Totals over all records, independent of `filter`.
    pub totals: Totals,
    pub currency: Currency,
}

impl View<'_> {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Draws a [`View`].
pub trait Render {
    fn render(&mut self, view: &View<'_>) -> ResultEngine<()>;
}

/// Asks the user to confirm deleting a record.
pub trait Confirm {
    fn confirm(&mut self, transaction: &Transaction) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&Transaction) -> bool,
{
    fn confirm(&mut self, transaction: &Transaction) -> bool {
        self(transaction)
    }
}

/// A renderer that keeps the last view it was given, for tests and
/// embedders that only need the data.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub filter: Filter,
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub renders: usize,
}

impl Render for Snapshot {
    fn render(&mut self, view: &View<'_>) -> ResultEngine<()> {
        self.filter = view.filter;
        self.transactions = view.transactions.iter().map(|tx| (*tx).clone()).collect();
        self.totals = view.totals;
        self.renders += 1;
        Ok(())
    }
}
