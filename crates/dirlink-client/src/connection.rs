//! The asynchronous connection capability consumed by the adapter layer.

use dirlink_core::request::{
    AbandonRequest, AddRequest, BindRequest, CompareRequest, DeleteRequest, ExtendedRequest,
    ModifyDnRequest, ModifyRequest, SearchRequest,
};
use dirlink_core::{
    BindResult, CompareResult, Entry, ExtendedResult, IntermediateResponse, OpFuture,
    OperationResult,
};
use std::sync::Arc;

/// Callback invoked once per entry delivered by an in-flight search.
///
/// Entries arrive zero or more times before the search future settles,
/// possibly from a different task than the submitter.
pub type EntryHandler = Arc<dyn Fn(Entry) + Send + Sync>;

/// Callback invoked for each intermediate response delivered while an
/// operation is in flight. Passed through to the transport unmodified.
pub type IntermediateHandler = Arc<dyn Fn(IntermediateResponse) + Send + Sync>;

/// Asynchronous directory connection.
///
/// Implementations own the transport: wire encoding, connection
/// establishment and security are entirely their concern. Every submit
/// method returns an [`OpFuture`] immediately, without waiting for the
/// terminal result; a purely local implementation may settle the future
/// before returning it.
#[cfg_attr(test, mockall::automock)]
pub trait Connection: Send + Sync {
    /// Submits an abandon request for an outstanding operation.
    fn abandon_async(&self, request: &AbandonRequest) -> OpFuture<()>;

    /// Submits an add request.
    fn add_async(
        &self,
        request: &AddRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult>;

    /// Submits a bind request.
    fn bind_async(
        &self,
        request: &BindRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<BindResult>;

    /// Submits a compare request.
    fn compare_async(
        &self,
        request: &CompareRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<CompareResult>;

    /// Submits a delete request.
    fn delete_async(
        &self,
        request: &DeleteRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult>;

    /// Submits an extended operation request.
    fn extended_async(
        &self,
        request: &ExtendedRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<ExtendedResult>;

    /// Submits a modify request.
    fn modify_async(
        &self,
        request: &ModifyRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult>;

    /// Submits a modify DN (rename) request.
    fn modify_dn_async(
        &self,
        request: &ModifyDnRequest,
        intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult>;

    /// Submits a search request.
    ///
    /// The entry handler is invoked once per matching entry before the
    /// returned future settles; the future's own value is the terminal
    /// result, never the entries.
    fn search_async(
        &self,
        request: &SearchRequest,
        intermediate: Option<IntermediateHandler>,
        on_entry: EntryHandler,
    ) -> OpFuture<OperationResult>;

    /// Returns true once the connection has been closed.
    fn is_closed(&self) -> bool;

    /// Closes the connection, releasing transport resources.
    fn close(&self);
}
