//! Streaming accumulation of search entries.

use crate::connection::EntryHandler;
use dirlink_core::Entry;
use std::sync::{Arc, Mutex, PoisonError};

/// Ordered accumulator for entries delivered by an in-flight search.
///
/// The sink hands out an [`EntryHandler`] that appends every delivered entry
/// in delivery order. The collected sequence is meaningful only once the
/// owning search future has settled; entries delivered before a mid-stream
/// failure are kept, not rolled back.
#[derive(Debug, Clone, Default)]
pub struct EntrySink {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl EntrySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handler that appends delivered entries to this sink.
    #[must_use]
    pub fn handler(&self) -> EntryHandler {
        let entries = Arc::clone(&self.entries);
        Arc::new(move |entry| {
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(entry);
        })
    }

    /// Takes the accumulated entries, leaving the sink empty.
    #[must_use]
    pub fn drain(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the number of entries accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when no entry has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
