use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Headline shown for any rejected description/amount.
pub const VALIDATION_HEADLINE: &str = "Please enter valid description and amount";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Engine(#[from] engine::EngineError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transaction #{0} not found")]
    NotFound(i64),
}

impl AppError {
    /// Message printed to the user before exiting.
    pub fn user_message(&self) -> String {
        match self {
            Self::Engine(err) if err.is_validation() => format!("{VALIDATION_HEADLINE}: {err}"),
            other => format!("Error: {other}"),
        }
    }
}
