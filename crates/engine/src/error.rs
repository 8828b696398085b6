//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`EmptyDescription`] and [`InvalidAmount`] thrown when a transaction
//!   fails validation. Both block the operation without touching state.
//! - [`KeyNotFound`] thrown when a transaction id does not exist.
//! - [`CorruptData`] thrown when a persisted slot cannot be trusted.
//!
//!  [`EmptyDescription`]: EngineError::EmptyDescription
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`CorruptData`]: EngineError::CorruptData
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Description must not be empty")]
    EmptyDescription,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Corrupt data: {0}")]
    CorruptData(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Export(#[from] csv::Error),
}

impl EngineError {
    /// Returns `true` for errors caused by user input rather than I/O.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyDescription | Self::InvalidAmount(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmptyDescription, Self::EmptyDescription) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidValue(a), Self::InvalidValue(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::CorruptData(a), Self::CorruptData(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            (Self::Export(a), Self::Export(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
