//! Transaction primitives.
//!
//! A `Transaction` is one income or expense record. Records are created by
//! the [`Ledger`](crate::Ledger), which guarantees the invariants below.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, util::normalize_required_text};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidValue(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionKind::try_from(s)
    }
}

/// A stored record.
///
/// Invariants: `amount > 0`, `description` is trimmed and non-empty, `id` is
/// unique within its ledger.
///
/// The serde field names are the ones used by the persisted slot
/// (`id`, `desc`, `amount`, `type`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Creation timestamp in epoch milliseconds.
    pub id: i64,
    #[serde(rename = "desc")]
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// The user-editable fields of a transaction, as captured by a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    pub fn new(description: impl Into<String>, amount: Money, kind: TransactionKind) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
        }
    }

    /// Checks presence and range, returning the draft with its description
    /// trimmed. Amounts must lie in `0.01..=Money::MAX`.
    pub fn validate(self) -> ResultEngine<Self> {
        let description = normalize_required_text(&self.description)?;
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if self.amount > Money::MAX {
            return Err(EngineError::InvalidAmount(format!(
                "amount must not exceed {}",
                Money::MAX
            )));
        }
        Ok(Self {
            description,
            amount: self.amount,
            kind: self.kind,
        })
    }

    pub(crate) fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
        }
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(tx: &Transaction) -> Self {
        Self {
            description: tx.description.clone(),
            amount: tx.amount,
            kind: tx.kind,
        }
    }
}

/// Display-time restriction of the transaction list by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Income,
    Expense,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => tx.kind == TransactionKind::Income,
            Self::Expense => tx.kind == TransactionKind::Expense,
        }
    }
}

impl From<TransactionKind> for Filter {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl FromStr for Filter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            other => TransactionKind::try_from(other)
                .map(Self::from)
                .map_err(|_| EngineError::InvalidValue(format!("invalid filter: {other}"))),
        }
    }
}
