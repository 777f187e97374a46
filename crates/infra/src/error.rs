use thiserror::Error;

use stockledger_core::DomainError;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Business rule rejection (not found, insufficient stock, invalid argument).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The SQLite store failed. Any open transaction has been rolled back.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A stored row could not be turned back into a domain value.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl LedgerError {
    /// Domain failures are reported to the operator and the session carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::Domain(_))
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            LedgerError::Domain(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}
