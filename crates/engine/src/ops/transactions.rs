use crate::{
    Confirm, Money, ResultEngine, Submitted, Transaction, TransactionDraft, TransactionKind,
};

use super::Engine;

/// Outcome of [`Engine::delete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Deletion {
    Deleted(Transaction),
    /// The user did not confirm; nothing changed.
    Declined,
    NotFound,
}

impl Engine {
    /// Append a new record and persist it.
    pub fn add(
        &mut self,
        description: &str,
        amount: Money,
        kind: TransactionKind,
    ) -> ResultEngine<Transaction> {
        self.apply(|ledger| {
            let tx = ledger.add(description, amount, kind)?;
            Ok((tx, true))
        })
    }

    /// Replace the fields of `id`; `Ok(false)` if it does not exist.
    pub fn update(
        &mut self,
        id: i64,
        description: &str,
        amount: Money,
        kind: TransactionKind,
    ) -> ResultEngine<bool> {
        self.apply(|ledger| {
            let updated = ledger.update(id, description, amount, kind)?;
            Ok((updated, updated))
        })
    }

    /// Remove `id` without asking; see [`Engine::delete`] for the confirmed
    /// variant.
    pub fn remove(&mut self, id: i64) -> ResultEngine<Option<Transaction>> {
        self.apply(|ledger| {
            let removed = ledger.remove(id);
            let changed = removed.is_some();
            Ok((removed, changed))
        })
    }

    /// Remove `id` after `confirm` agrees.
    pub fn delete<C>(&mut self, id: i64, confirm: &mut C) -> ResultEngine<Deletion>
    where
        C: Confirm + ?Sized,
    {
        let Some(tx) = self.ledger.get(id) else {
            return Ok(Deletion::NotFound);
        };
        if !confirm.confirm(tx) {
            tracing::debug!(id, "deletion declined");
            return Ok(Deletion::Declined);
        }
        Ok(match self.remove(id)? {
            Some(tx) => Deletion::Deleted(tx),
            None => Deletion::NotFound,
        })
    }

    /// Enter edit mode for `id` and return a draft pre-filled from it.
    pub fn begin_edit(&mut self, id: i64) -> ResultEngine<TransactionDraft> {
        self.apply(|ledger| {
            let draft = TransactionDraft::from(ledger.begin_edit(id)?);
            Ok((draft, false))
        })
    }

    pub fn cancel_edit(&mut self) {
        self.ledger.cancel_edit();
    }

    /// Insert or update depending on the edit mode, and persist.
    pub fn submit(&mut self, draft: TransactionDraft) -> ResultEngine<Submitted> {
        self.apply(|ledger| {
            let outcome = ledger.submit(draft)?;
            let changed = outcome.changed();
            Ok((outcome, changed))
        })
    }
}
