use serde::Serialize;

use crate::{EngineError, Money, ResultEngine, Transaction, TransactionKind};

/// Income, expense and balance derived from a set of records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    /// `income - expense`; negative when spending exceeds earnings.
    pub balance: Money,
}

impl Totals {
    /// Sums `records`, failing if a sum leaves the `i64` cent range.
    pub fn from_records<'a, I>(records: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records.into_iter().try_fold(Self::default(), Self::with)
    }

    /// These totals with `tx` counted in.
    pub fn with(self, tx: &Transaction) -> ResultEngine<Self> {
        let (mut income, mut expense) = (self.income, self.expense);
        let sum = match tx.kind {
            TransactionKind::Income => &mut income,
            TransactionKind::Expense => &mut expense,
        };
        *sum = sum.checked_add(tx.amount).ok_or_else(overflow)?;
        Ok(Self {
            income,
            expense,
            balance: income.checked_sub(expense).ok_or_else(overflow)?,
        })
    }
}

fn overflow() -> EngineError {
    EngineError::InvalidAmount("totals would exceed the supported range".to_string())
}
