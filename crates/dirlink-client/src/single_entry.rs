//! Outcome classification for searches expected to match exactly one entry.

use dirlink_core::{Entry, Error, OperationResult, Result, ResultCode};

/// Policy applied when a single-entry search is truncated by the server
/// (`sizeLimitExceeded`).
///
/// A truncated search cannot distinguish "exactly one match, coincidentally
/// at the limit" from "more matches exist", so the conservative default
/// always reports ambiguity. Deployments whose servers use the size limit
/// differently can opt into trusting a single collected entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Always classify a truncated search as [`Error::MultipleEntriesFound`],
    /// even when exactly one entry was collected.
    #[default]
    ReportAmbiguous,
    /// Return the entry when a truncated search collected exactly one;
    /// propagate the server's rejection when it collected none.
    AcceptSingleEntry,
}

/// Classifies the terminal outcome of a single-entry search.
///
/// Given the search's terminal outcome and the entries collected before
/// termination, decides the externally visible result:
///
/// 1. a truncated search (`sizeLimitExceeded`) is resolved by `policy`,
///    taking precedence over the entry count;
/// 2. any other exceptional terminal propagates unchanged;
/// 3. a successful terminal succeeds only when exactly one entry was
///    collected; zero entries is [`Error::EntryNotFound`], several are
///    [`Error::MultipleEntriesFound`].
///
/// The caller must sample `entries` only after the search future settled;
/// both adapter paths in [`DirectoryClient`](crate::DirectoryClient) do so
/// from terminal completion.
///
/// # Errors
///
/// Returns the typed failure described above.
pub fn classify_single_result(
    terminal: Result<OperationResult>,
    mut entries: Vec<Entry>,
    policy: TruncationPolicy,
) -> Result<Entry> {
    match terminal {
        Err(error) if error.result_code() == ResultCode::SizeLimitExceeded => match policy {
            TruncationPolicy::ReportAmbiguous => Err(Error::multiple_entries_found()),
            TruncationPolicy::AcceptSingleEntry => match entries.len() {
                1 => Ok(entries.remove(0)),
                0 => Err(error),
                _ => Err(Error::multiple_entries_found()),
            },
        },
        Err(error) => Err(error),
        Ok(_) => match entries.len() {
            0 => Err(Error::entry_not_found()),
            1 => Ok(entries.remove(0)),
            _ => Err(Error::multiple_entries_found()),
        },
    }
}
