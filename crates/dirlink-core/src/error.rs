//! Error types for directory operations.

use crate::result::{OperationResult, ResultCode};
use thiserror::Error;

/// Main error type for directory operations.
///
/// Failures that originate on the server carry the exact [`OperationResult`]
/// the server reported. Failures synthesized on the client (a single-entry
/// search that matched nothing, or too much) carry a result built around a
/// client-side [`ResultCode`], so every error can still report a code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The server rejected the operation.
    #[error("operation rejected by server: {0}")]
    Rejected(OperationResult),

    /// A search expected to match exactly one entry matched none.
    #[error("no entry matched the search: {0}")]
    EntryNotFound(OperationResult),

    /// A search expected to match exactly one entry matched several, or was
    /// truncated so that the true count is unknown.
    #[error("more than one entry matched the search: {0}")]
    MultipleEntriesFound(OperationResult),

    /// The operation future was cancelled before a result arrived.
    #[error("operation cancelled before completion")]
    Cancelled,

    /// No result arrived within the caller-imposed deadline.
    #[error("timed out waiting for operation result: {0}")]
    Timeout(String),
}

/// Specialized result type for directory operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds the client-side failure for a single-entry search that
    /// returned no entries.
    #[must_use]
    pub fn entry_not_found() -> Self {
        Self::EntryNotFound(
            OperationResult::new(ResultCode::NoResultsReturned)
                .with_diagnostic_message("the search returned no entries"),
        )
    }

    /// Builds the client-side failure for a single-entry search that
    /// returned more entries than expected.
    #[must_use]
    pub fn multiple_entries_found() -> Self {
        Self::MultipleEntriesFound(
            OperationResult::new(ResultCode::UnexpectedResults)
                .with_diagnostic_message("the search returned more than one entry"),
        )
    }

    /// Returns the operation result carried by this error, when one exists.
    #[must_use]
    pub const fn result(&self) -> Option<&OperationResult> {
        match self {
            Self::Rejected(result)
            | Self::EntryNotFound(result)
            | Self::MultipleEntriesFound(result) => Some(result),
            Self::Cancelled | Self::Timeout(_) => None,
        }
    }

    /// Returns the result code for this error.
    #[must_use]
    pub const fn result_code(&self) -> ResultCode {
        match self {
            Self::Rejected(result)
            | Self::EntryNotFound(result)
            | Self::MultipleEntriesFound(result) => result.result_code(),
            Self::Cancelled => ResultCode::Canceled,
            Self::Timeout(_) => ResultCode::ClientTimeout,
        }
    }
}
