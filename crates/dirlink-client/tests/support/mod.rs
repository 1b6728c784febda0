//! Stub connection shared by the adapter contract tests.
//!
//! Configured with one result code and a fixed set of search entries, it
//! answers every operation kind the same way: deliver the entries (searches
//! only), then hand back a future settled according to the code. This is
//! the "purely local" connection shape — futures are terminal before the
//! submit method even returns.

use dirlink_client::{Connection, EntryHandler, IntermediateHandler};
use dirlink_core::request::{
    AbandonRequest, AddRequest, BindRequest, CompareRequest, DeleteRequest, ExtendedRequest,
    ModifyDnRequest, ModifyRequest, SearchRequest,
};
use dirlink_core::{
    BindResult, CompareResult, Entry, Error, ExtendedResult, OpFuture, OperationResult, ResultCode,
};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct StubConnection {
    code: ResultCode,
    entries: Vec<Entry>,
    closed: AtomicBool,
}

impl StubConnection {
    pub fn new(code: ResultCode) -> Self {
        Self {
            code,
            entries: Vec::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    fn future_for<T: Clone + Send + 'static>(&self, value: T) -> OpFuture<T> {
        if self.code.is_exceptional() {
            OpFuture::failed(Error::Rejected(OperationResult::new(self.code)))
        } else {
            OpFuture::completed(value)
        }
    }

    fn operation_result(&self) -> OpFuture<OperationResult> {
        self.future_for(OperationResult::new(self.code))
    }
}

impl Connection for StubConnection {
    fn abandon_async(&self, _request: &AbandonRequest) -> OpFuture<()> {
        self.future_for(())
    }

    fn add_async(
        &self,
        _request: &AddRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.operation_result()
    }

    fn bind_async(
        &self,
        _request: &BindRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<BindResult> {
        self.future_for(BindResult::new(self.code))
    }

    fn compare_async(
        &self,
        _request: &CompareRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<CompareResult> {
        self.future_for(CompareResult::new(self.code))
    }

    fn delete_async(
        &self,
        _request: &DeleteRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.operation_result()
    }

    fn extended_async(
        &self,
        _request: &ExtendedRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<ExtendedResult> {
        self.future_for(ExtendedResult::new(self.code))
    }

    fn modify_async(
        &self,
        _request: &ModifyRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.operation_result()
    }

    fn modify_dn_async(
        &self,
        _request: &ModifyDnRequest,
        _intermediate: Option<IntermediateHandler>,
    ) -> OpFuture<OperationResult> {
        self.operation_result()
    }

    fn search_async(
        &self,
        _request: &SearchRequest,
        _intermediate: Option<IntermediateHandler>,
        on_entry: EntryHandler,
    ) -> OpFuture<OperationResult> {
        for entry in &self.entries {
            on_entry(entry.clone());
        }
        self.operation_result()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
