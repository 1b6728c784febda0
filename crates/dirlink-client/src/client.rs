//! Blocking and non-blocking directory operation adapters.

use crate::accumulator::EntrySink;
use crate::connection::{Connection, EntryHandler, IntermediateHandler};
use crate::single_entry::{classify_single_result, TruncationPolicy};
use dirlink_core::request::{
    AbandonRequest, AddRequest, BindRequest, CompareRequest, DeleteRequest, ExtendedRequest,
    ModifyDnRequest, ModifyRequest, SearchRequest,
};
use dirlink_core::{
    BindResult, CompareResult, Entry, Error, ExtendedResult, OpFuture, OperationResult, Result,
};
use tracing::debug;

/// Directory client layered over an asynchronous [`Connection`].
///
/// Every operation kind is exposed twice: a non-blocking method that
/// delegates to the connection and returns the operation future
/// immediately, and a blocking method that submits the same request and
/// suspends until the future settles. The blocking methods add no
/// kind-specific logic; a rejected operation always surfaces as
/// [`Error::Rejected`] carrying the server's exact result, and a successful
/// one returns the kind-specific value unmodified.
pub struct DirectoryClient {
    connection: Box<dyn Connection>,
    truncation_policy: TruncationPolicy,
}

impl DirectoryClient {
    /// Creates a client over the given connection.
    #[must_use]
    pub fn new(connection: Box<dyn Connection>) -> Self {
        Self {
            connection,
            truncation_policy: TruncationPolicy::default(),
        }
    }

    /// Overrides the policy applied when a single-entry search is truncated
    /// by the server.
    #[must_use]
    pub const fn with_truncation_policy(mut self, policy: TruncationPolicy) -> Self {
        self.truncation_policy = policy;
        self
    }

    /// Returns true once the underlying connection has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.connection.is_closed()
    }

    /// Closes the underlying connection.
    pub fn close(&self) {
        self.connection.close();
    }

    /// Submits an abandon request without waiting for its outcome.
    #[must_use]
    pub fn abandon_async(&self, request: &AbandonRequest) -> OpFuture<()> {
        self.connection.abandon_async(request)
    }

    /// Submits an add request without waiting for its outcome.
    #[must_use]
    pub fn add_async(
        &self,
        request: &AddRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.connection.add_async(request, intermediate)
    }

    /// Submits a bind request without waiting for its outcome.
    #[must_use]
    pub fn bind_async(
        &self,
        request: &BindRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<BindResult> {
        self.connection.bind_async(request, intermediate)
    }

    /// Submits a compare request without waiting for its outcome.
    #[must_use]
    pub fn compare_async(
        &self,
        request: &CompareRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<CompareResult> {
        self.connection.compare_async(request, intermediate)
    }

    /// Submits a delete request without waiting for its outcome.
    #[must_use]
    pub fn delete_async(
        &self,
        request: &DeleteRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.connection.delete_async(request, intermediate)
    }

    /// Submits an extended operation request without waiting for its
    /// outcome.
    #[must_use]
    pub fn extended_async(
        &self,
        request: &ExtendedRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<ExtendedResult> {
        self.connection.extended_async(request, intermediate)
    }

    /// Submits a modify request without waiting for its outcome.
    #[must_use]
    pub fn modify_async(
        &self,
        request: &ModifyRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.connection.modify_async(request, intermediate)
    }

    /// Submits a modify DN (rename) request without waiting for its
    /// outcome.
    #[must_use]
    pub fn modify_dn_async(
        &self,
        request: &ModifyDnRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.connection.modify_dn_async(request, intermediate)
    }

    /// Submits a search request without waiting for its outcome.
    ///
    /// `on_entry` is invoked once per matching entry while the returned
    /// future is pending.
    #[must_use]
    pub fn search_async(
        &self,
        request: &SearchRequest,
        intermediate: Option<IntermediateHandler>,
        on_entry: EntryHandler,
    ) -> OpFuture<OperationResult> {
        self.connection.search_async(request, intermediate, on_entry)
    }

    /// Performs an abandon request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn abandon(&self, request: &AbandonRequest) -> Result<()> {
        await_operation("abandon", self.connection.abandon_async(request))
            .await
    }

    /// Performs an add request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn add(&self, request: &AddRequest) -> Result<OperationResult> {
        await_operation("add", self.connection.add_async(request, None))
            .await
    }

    /// Performs a bind request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn bind(&self, request: &BindRequest) -> Result<BindResult> {
        await_operation("bind", self.connection.bind_async(request, None))
            .await
    }

    /// Performs a compare request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn compare(&self, request: &CompareRequest) -> Result<CompareResult> {
        await_operation("compare", self.connection.compare_async(request, None))
            .await
    }

    /// Performs a delete request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn delete(&self, request: &DeleteRequest) -> Result<OperationResult> {
        await_operation("delete", self.connection.delete_async(request, None))
            .await
    }

    /// Performs an extended operation request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn extended(&self, request: &ExtendedRequest) -> Result<ExtendedResult> {
        await_operation("extended", self.connection.extended_async(request, None))
            .await
    }

    /// Performs a modify request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn modify(&self, request: &ModifyRequest) -> Result<OperationResult> {
        await_operation("modify", self.connection.modify_async(request, None))
            .await
    }

    /// Performs a modify DN (rename) request, waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the
    /// operation fails.
    pub async fn modify_dn(&self, request: &ModifyDnRequest) -> Result<OperationResult> {
        await_operation("modifyDN", self.connection.modify_dn_async(request, None))
            .await
    }

    /// Performs a search, appending delivered entries to `entries` in
    /// delivery order.
    ///
    /// Entries delivered before a mid-stream failure are appended all the
    /// same; the partial sequence stays visible to the caller alongside the
    /// returned error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the search
    /// fails.
    pub async fn search(
        &self,
        request: &SearchRequest,
        entries: &mut Vec<Entry>,
    ) -> Result<OperationResult> {
        let sink = EntrySink::new();
        let outcome = await_operation(
            "search",
            self.connection.search_async(request, None, sink.handler()),
        )
        .await;
        entries.extend(sink.drain());
        outcome
    }

    /// Performs a search, streaming each delivered entry to `on_entry`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rejected`] with the server's result when the search
    /// fails.
    pub async fn search_with_handler(
        &self,
        request: &SearchRequest,
        on_entry: EntryHandler,
    ) -> Result<OperationResult> {
        await_operation(
            "search",
            self.connection.search_async(request, None, on_entry),
        )
        .await
    }

    /// Performs a search expected to match exactly one entry, waiting for
    /// its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryNotFound`] when the search matched nothing,
    /// [`Error::MultipleEntriesFound`] when it matched several entries or
    /// was truncated, and [`Error::Rejected`] for any other server failure.
    pub async fn search_single_entry(&self, request: &SearchRequest) -> Result<Entry> {
        let sink = EntrySink::new();
        let terminal = await_operation(
            "searchSingleEntry",
            self.connection.search_async(request, None, sink.handler()),
        )
        .await;
        classify_single_result(terminal, sink.drain(), self.truncation_policy)
    }

    /// Submits a search expected to match exactly one entry and returns a
    /// derived future for the entry.
    ///
    /// The derived future settles when the underlying search settles, after
    /// classification, and supports the full future surface
    /// (`resolve`/`on_success`/`on_failure`/`cancel`).
    #[must_use]
    pub fn search_single_entry_async(&self, request: &SearchRequest) -> OpFuture<Entry> {
        let sink = EntrySink::new();
        let inner = self.connection.search_async(request, None, sink.handler());
        let (derived, completer) = OpFuture::pending();
        let policy = self.truncation_policy;

        let on_success = {
            let sink = sink.clone();
            let completer = completer.clone();
            move |result: &OperationResult| {
                completer.settle(classify_single_result(
                    Ok(result.clone()),
                    sink.drain(),
                    policy,
                ));
            }
        };
        let on_failure = move |error: &Error| {
            completer.settle(classify_single_result(
                Err(error.clone()),
                sink.drain(),
                policy,
            ));
        };
        inner.on_success(on_success).on_failure(on_failure);
        derived
    }
}

/// Generic blocking bridge: awaits the future of an already-submitted
/// operation. Identical for every operation kind.
async fn await_operation<V: Clone + Send + 'static>(
    operation: &'static str,
    future: OpFuture<V>,
) -> Result<V> {
    debug!(operation, "awaiting directory operation");
    let outcome = future.resolve().await;
    if let Err(error) = &outcome {
        debug!(operation, %error, "directory operation failed");
    }
    outcome
}

impl std::fmt::Debug for DirectoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryClient")
            .field("truncation_policy", &self.truncation_policy)
            .finish_non_exhaustive()
    }
}
