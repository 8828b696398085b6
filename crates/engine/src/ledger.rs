//! The in-memory transaction store.
//!
//! A [`Ledger`] is a plain owned value: every operation takes `&mut self` and
//! either mutates fully or returns an error with the ledger untouched. It does
//! no I/O; the [`Engine`](crate::Engine) persists it after each mutation.

use chrono::{DateTime, Utc};

use crate::{
    EngineError, Filter, Money, ResultEngine, Totals, Transaction, TransactionDraft,
    TransactionKind, util::next_id,
};

/// Whether the next form submission inserts or updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(i64),
}

/// Outcome of [`Ledger::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    Added(Transaction),
    Updated(Transaction),
    /// The record being edited was removed before the submission.
    Stale(i64),
}

impl Submitted {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Stale(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    mode: EditMode,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from already validated records, keeping their order.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            mode: EditMode::Idle,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All records in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Appends a new record stamped with the current time.
    pub fn add(
        &mut self,
        description: &str,
        amount: Money,
        kind: TransactionKind,
    ) -> ResultEngine<Transaction> {
        self.add_at(TransactionDraft::new(description, amount, kind), Utc::now())
    }

    /// Appends a new record created at `now`.
    pub fn add_at(
        &mut self,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        let draft = draft.validate()?;
        let id = next_id(&self.transactions, now.timestamp_millis());
        let tx = draft.into_transaction(id);
        self.totals()?.with(&tx)?;
        self.transactions.push(tx.clone());
        tracing::debug!(id, kind = tx.kind.as_str(), "transaction added");
        Ok(tx)
    }

    /// Replaces the fields of the record matching `id`, keeping its id and
    /// position. Returns `false` when no such record exists.
    pub fn update(
        &mut self,
        id: i64,
        description: &str,
        amount: Money,
        kind: TransactionKind,
    ) -> ResultEngine<bool> {
        self.update_with(id, TransactionDraft::new(description, amount, kind))
            .map(|updated| updated.is_some())
    }

    fn update_with(
        &mut self,
        id: i64,
        draft: TransactionDraft,
    ) -> ResultEngine<Option<Transaction>> {
        let draft = draft.validate()?;
        let Some(index) = self.transactions.iter().position(|tx| tx.id == id) else {
            tracing::debug!(id, "update ignored, transaction not found");
            return Ok(None);
        };
        let updated = draft.into_transaction(id);
        Totals::from_records(
            self.transactions
                .iter()
                .enumerate()
                .map(|(i, tx)| if i == index { &updated } else { tx }),
        )?;
        self.transactions[index] = updated.clone();
        tracing::debug!(id, "transaction updated");
        Ok(Some(updated))
    }

    /// Removes the record matching `id`, returning it if it existed.
    ///
    /// Removing the record that is being edited also leaves edit mode.
    pub fn remove(&mut self, id: i64) -> Option<Transaction> {
        let index = self.transactions.iter().position(|tx| tx.id == id)?;
        if self.mode == EditMode::Editing(id) {
            self.mode = EditMode::Idle;
        }
        tracing::debug!(id, "transaction removed");
        Some(self.transactions.remove(index))
    }

    /// Records in insertion order, restricted by `filter`.
    pub fn list(&self, filter: Filter) -> Vec<&Transaction> {
        self.iter(filter).collect()
    }

    pub fn iter(&self, filter: Filter) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |tx| filter.matches(tx))
    }

    /// Totals over every record, regardless of any display filter.
    ///
    /// Records added through the ledger never make this fail.
    pub fn totals(&self) -> ResultEngine<Totals> {
        Totals::from_records(&self.transactions)
    }

    /// Enters edit mode for `id`, returning the record to pre-fill a form.
    pub fn begin_edit(&mut self, id: i64) -> ResultEngine<&Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        self.mode = EditMode::Editing(id);
        Ok(&self.transactions[index])
    }

    /// Leaves edit mode without changing any record.
    pub fn cancel_edit(&mut self) {
        self.mode = EditMode::Idle;
    }

    /// Inserts or updates depending on the current [`EditMode`].
    ///
    /// On a validation error both the records and the mode are unchanged, so
    /// the user can correct the form and submit again.
    pub fn submit(&mut self, draft: TransactionDraft) -> ResultEngine<Submitted> {
        self.submit_at(draft, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> ResultEngine<Submitted> {
        match self.mode {
            EditMode::Idle => self.add_at(draft, now).map(Submitted::Added),
            EditMode::Editing(id) => {
                let outcome = match self.update_with(id, draft)? {
                    Some(tx) => Submitted::Updated(tx),
                    None => Submitted::Stale(id),
                };
                self.mode = EditMode::Idle;
                Ok(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn draft(description: &str, minor: i64, kind: TransactionKind) -> TransactionDraft {
        TransactionDraft::new(description, Money::new(minor), kind)
    }

    #[test]
    fn new_ledger_is_empty_and_idle() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.mode(), EditMode::Idle);
        assert_eq!(ledger.totals().unwrap(), Totals::default());
    }

    #[test]
    fn add_uses_creation_time_as_id() {
        let mut ledger = Ledger::new();
        let tx = ledger
            .add_at(draft("Salary", 100_000, TransactionKind::Income), at(1_000))
            .unwrap();
        assert_eq!(tx.id, 1_000);
        assert_eq!(ledger.get(1_000), Some(&tx));
    }

    #[test]
    fn add_in_same_millisecond_gets_distinct_ids() {
        let mut ledger = Ledger::new();
        let a = ledger
            .add_at(draft("A", 1, TransactionKind::Income), at(5))
            .unwrap();
        let b = ledger
            .add_at(draft("B", 1, TransactionKind::Income), at(5))
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn invalid_add_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();
        ledger.add("Rent", Money::new(50_000), TransactionKind::Expense).unwrap();
        let before = ledger.clone();

        assert!(ledger.add("", Money::new(100), TransactionKind::Income).is_err());
        assert!(ledger.add("Refund", Money::ZERO, TransactionKind::Income).is_err());
        assert!(ledger.add("Refund", Money::new(-5), TransactionKind::Income).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn add_or_update_that_would_overflow_totals_is_rejected() {
        let capacity = i64::MAX / Money::MAX.minor();
        let mut ledger = Ledger::from_transactions(
            (1..=capacity)
                .map(|id| Transaction {
                    id,
                    description: format!("Jackpot {id}"),
                    amount: Money::MAX,
                    kind: TransactionKind::Income,
                })
                .collect(),
        );
        let small = ledger
            .add_at(draft("Tip", 1, TransactionKind::Income), at(capacity + 1))
            .unwrap();
        let before = ledger.clone();

        let err = ledger
            .add("Jackpot", Money::MAX, TransactionKind::Income)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(
            ledger
                .update(small.id, "Tip", Money::MAX, TransactionKind::Income)
                .unwrap_err()
                .is_validation()
        );
        assert_eq!(ledger, before);
        assert!(ledger.totals().is_ok());

        // Spending is summed separately, so large expenses still fit.
        assert!(
            ledger
                .update(small.id, "Tip", Money::MAX, TransactionKind::Expense)
                .unwrap()
        );
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut ledger = Ledger::new();
        let first = ledger.add_at(draft("A", 100, TransactionKind::Income), at(1)).unwrap();
        ledger.add_at(draft("B", 200, TransactionKind::Expense), at(2)).unwrap();

        let updated = ledger
            .update(first.id, " A2 ", Money::new(150), TransactionKind::Expense)
            .unwrap();
        assert!(updated);
        assert_eq!(ledger.len(), 2);
        let tx = &ledger.transactions()[0];
        assert_eq!(tx.id, first.id);
        assert_eq!(tx.description, "A2");
        assert_eq!(tx.amount, Money::new(150));
        assert_eq!(tx.kind, TransactionKind::Expense);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add_at(draft("A", 100, TransactionKind::Income), at(1)).unwrap();
        let before = ledger.clone();
        assert!(!ledger.update(99, "X", Money::new(1), TransactionKind::Income).unwrap());
        assert_eq!(ledger, before);
    }

    #[test]
    fn invalid_update_is_rejected() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_at(draft("A", 100, TransactionKind::Income), at(1)).unwrap();
        let before = ledger.clone();
        assert_eq!(
            ledger.update(tx.id, "  ", Money::new(1), TransactionKind::Income),
            Err(EngineError::EmptyDescription)
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn remove_existing_and_missing() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_at(draft("A", 100, TransactionKind::Income), at(1)).unwrap();
        assert_eq!(ledger.remove(42), None);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.remove(tx.id), Some(tx));
        assert!(ledger.is_empty());
    }

    #[test]
    fn list_filters_and_keeps_order() {
        let mut ledger = Ledger::new();
        ledger.add_at(draft("Salary", 100, TransactionKind::Income), at(1)).unwrap();
        ledger.add_at(draft("Rent", 50, TransactionKind::Expense), at(2)).unwrap();
        ledger.add_at(draft("Bonus", 20, TransactionKind::Income), at(3)).unwrap();

        let income: Vec<&str> = ledger
            .list(Filter::Income)
            .into_iter()
            .map(|tx| tx.description.as_str())
            .collect();
        assert_eq!(income, ["Salary", "Bonus"]);
        assert_eq!(ledger.list(Filter::Expense).len(), 1);
        assert_eq!(ledger.list(Filter::All).len(), 3);
    }

    #[test]
    fn submit_adds_when_idle() {
        let mut ledger = Ledger::new();
        let outcome = ledger
            .submit_at(draft("Salary", 100, TransactionKind::Income), at(7))
            .unwrap();
        assert!(matches!(outcome, Submitted::Added(ref tx) if tx.id == 7));
        assert_eq!(ledger.mode(), EditMode::Idle);
    }

    #[test]
    fn submit_updates_when_editing_then_returns_to_idle() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_at(draft("Salary", 100, TransactionKind::Income), at(1)).unwrap();

        let prefill = TransactionDraft::from(ledger.begin_edit(tx.id).unwrap());
        assert_eq!(prefill.description, "Salary");
        assert_eq!(ledger.mode(), EditMode::Editing(tx.id));

        let outcome = ledger
            .submit_at(draft("Salary", 120, TransactionKind::Income), at(9))
            .unwrap();
        assert!(matches!(outcome, Submitted::Updated(ref u) if u.id == tx.id));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(tx.id).unwrap().amount, Money::new(120));
        assert_eq!(ledger.mode(), EditMode::Idle);
    }

    #[test]
    fn invalid_submit_keeps_edit_mode() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_at(draft("Salary", 100, TransactionKind::Income), at(1)).unwrap();
        ledger.begin_edit(tx.id).unwrap();
        assert!(ledger.submit(draft("Salary", 0, TransactionKind::Income)).is_err());
        assert_eq!(ledger.mode(), EditMode::Editing(tx.id));
        assert_eq!(ledger.get(tx.id).unwrap().amount, Money::new(100));
    }

    #[test]
    fn begin_edit_unknown_id_fails() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.begin_edit(3).map(|tx| tx.id),
            Err(EngineError::KeyNotFound("3".to_string()))
        );
        assert_eq!(ledger.mode(), EditMode::Idle);
    }

    #[test]
    fn cancel_edit_and_remove_reset_mode() {
        let mut ledger = Ledger::new();
        let tx = ledger.add_at(draft("A", 1, TransactionKind::Income), at(1)).unwrap();

        ledger.begin_edit(tx.id).unwrap();
        ledger.cancel_edit();
        assert_eq!(ledger.mode(), EditMode::Idle);

        ledger.begin_edit(tx.id).unwrap();
        ledger.remove(tx.id);
        assert_eq!(ledger.mode(), EditMode::Idle);
    }

    #[test]
    fn submit_for_removed_record_is_stale() {
        let mut ledger = Ledger::from_transactions(vec![Transaction {
            id: 1,
            description: "A".to_string(),
            amount: Money::new(1),
            kind: TransactionKind::Income,
        }]);
        ledger.begin_edit(1).unwrap();
        // Removal from another path that bypasses `remove`.
        ledger.transactions.clear();
        let outcome = ledger.submit(draft("A", 2, TransactionKind::Income)).unwrap();
        assert_eq!(outcome, Submitted::Stale(1));
        assert!(!outcome.changed());
        assert_eq!(ledger.mode(), EditMode::Idle);
    }
}
