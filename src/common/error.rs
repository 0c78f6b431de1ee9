#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Expected, recoverable outcomes of a ledger call. Returned to the caller
/// as values; none of them leaves a partial write behind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount can only be a positive number")]
    NegativeAmount,
    #[error("You cannot spend more than you have")]
    InsufficientBalance,
    #[error("Note cannot be longer than {limit} symbols")]
    NoteTooLong { limit: usize },
    #[error("Transaction index is not valid")]
    InvalidIndex,
    #[error("Key [ {index} ] not found in storage. ( storage [ {footprint} bytes ] )")]
    EntryNotFound { index: String, footprint: usize },
    #[error("Amount overflows the account balance")]
    AmountOverflow,
}

impl LedgerError {
    /// Stable tag a caller can branch on without parsing the message.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::NegativeAmount => "negative_amount",
            LedgerError::InsufficientBalance => "insufficient_balance",
            LedgerError::NoteTooLong { .. } => "note_too_long",
            LedgerError::InvalidIndex => "invalid_index",
            LedgerError::EntryNotFound { .. } => "entry_not_found",
            LedgerError::AmountOverflow => "amount_overflow",
        }
    }
}
