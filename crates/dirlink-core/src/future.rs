//! Single-assignment futures for in-flight directory operations.
//!
//! An [`OpFuture`] is the observable half of one submitted operation: it
//! settles exactly once, runs registered continuations exactly once, and can
//! be awaited cooperatively any number of times. The [`Completer`] is the
//! producer half handed to whatever drives the transport.

use crate::error::{Error, Result};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

type SuccessHandler<V> = Box<dyn FnOnce(&V) + Send>;
type FailureHandler = Box<dyn FnOnce(&Error) + Send>;

/// A continuation registered before the future settled. Success and failure
/// registrations share one queue so invocation order follows registration
/// order exactly.
enum Callback<V> {
    Success(SuccessHandler<V>),
    Failure(FailureHandler),
}

enum State<V> {
    Pending { callbacks: Vec<Callback<V>> },
    Settled(Result<V>),
}

struct Shared<V> {
    state: Mutex<State<V>>,
    done: Notify,
}

impl<V> Shared<V> {
    fn lock_state(&self) -> MutexGuard<'_, State<V>> {
        // A poisoned lock still holds a coherent state word.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Shared<V> {
    /// Moves the future to its terminal state. Returns false without any
    /// side effect when another settle already won.
    fn settle(&self, outcome: Result<V>) -> bool {
        let callbacks = {
            let mut state = self.lock_state();
            match &mut *state {
                State::Settled(_) => return false,
                State::Pending { callbacks } => {
                    let callbacks = std::mem::take(callbacks);
                    *state = State::Settled(outcome.clone());
                    callbacks
                }
            }
        };

        // Continuations run outside the lock so they may touch the future.
        for callback in callbacks {
            match (&outcome, callback) {
                (Ok(value), Callback::Success(handler)) => handler(value),
                (Err(error), Callback::Failure(handler)) => handler(error),
                _ => {}
            }
        }

        self.done.notify_waiters();
        true
    }
}

/// Observable handle to the outcome of one in-flight directory operation.
///
/// Handles are cheap to clone; every clone observes the same single
/// assignment.
pub struct OpFuture<V> {
    shared: Arc<Shared<V>>,
}

impl<V> Clone for OpFuture<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V> std::fmt::Debug for OpFuture<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.shared.lock_state() {
            State::Pending { .. } => "pending",
            State::Settled(Ok(_)) => "ok",
            State::Settled(Err(_)) => "err",
        };
        f.debug_struct("OpFuture").field("state", &state).finish()
    }
}

impl<V: Clone + Send + 'static> OpFuture<V> {
    /// Creates a pending future together with its producer half.
    #[must_use]
    pub fn pending() -> (Self, Completer<V>) {
        let shared = Arc::new(Shared {
            state: Mutex::new(State::Pending {
                callbacks: Vec::new(),
            }),
            done: Notify::new(),
        });
        (
            Self {
                shared: Arc::clone(&shared),
            },
            Completer { shared },
        )
    }

    /// Creates a future already settled with the given value.
    ///
    /// Used by local or mock-like connections whose outcome is known at
    /// submission time.
    #[must_use]
    pub fn completed(value: V) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::Settled(Ok(value))),
                done: Notify::new(),
            }),
        }
    }

    /// Creates a future already settled with the given failure.
    #[must_use]
    pub fn failed(error: Error) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::Settled(Err(error))),
                done: Notify::new(),
            }),
        }
    }

    /// Suspends the caller until the future settles, then returns the
    /// outcome.
    ///
    /// Waiting never polls; the task parks until the settling side wakes it.
    /// Calling this on an already-settled future returns the identical
    /// outcome again without re-running any continuation.
    ///
    /// # Errors
    ///
    /// Returns the failure the future settled with.
    pub async fn resolve(&self) -> Result<V> {
        loop {
            let notified = self.shared.done.notified();
            tokio::pin!(notified);
            // Join the waiter list before checking state, so a completion
            // landing in between cannot be missed.
            notified.as_mut().enable();
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            notified.await;
        }
    }

    /// Like [`resolve`](Self::resolve), bounded by a caller-imposed
    /// deadline.
    ///
    /// The core itself mandates no timeout; this is the hook for a higher
    /// layer that wants one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when no result arrived in time, otherwise
    /// the failure the future settled with.
    pub async fn resolve_within(&self, limit: Duration) -> Result<V> {
        match tokio::time::timeout(limit, self.resolve()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::Timeout(format!("no result within {limit:?}"))),
        }
    }

    /// Registers a continuation invoked exactly once with the success value.
    ///
    /// Registration after the future settled invokes the continuation
    /// immediately.
    pub fn on_success(&self, handler: impl FnOnce(&V) + Send + 'static) -> &Self {
        let mut state = self.shared.lock_state();
        match &mut *state {
            State::Pending { callbacks } => {
                callbacks.push(Callback::Success(Box::new(handler)));
            }
            State::Settled(outcome) => {
                let outcome = outcome.clone();
                drop(state);
                if let Ok(value) = &outcome {
                    handler(value);
                }
            }
        }
        self
    }

    /// Registers a continuation invoked exactly once with the failure.
    ///
    /// Registration after the future settled invokes the continuation
    /// immediately.
    pub fn on_failure(&self, handler: impl FnOnce(&Error) + Send + 'static) -> &Self {
        let mut state = self.shared.lock_state();
        match &mut *state {
            State::Pending { callbacks } => {
                callbacks.push(Callback::Failure(Box::new(handler)));
            }
            State::Settled(outcome) => {
                let outcome = outcome.clone();
                drop(state);
                if let Err(error) = &outcome {
                    handler(error);
                }
            }
        }
        self
    }

    /// Cancels the operation, best effort.
    ///
    /// A future that already settled is left untouched and `false` is
    /// returned. Cancellation settles the future with [`Error::Cancelled`],
    /// firing failure continuations; entries already delivered by a search
    /// stay delivered.
    pub fn cancel(&self) -> bool {
        self.shared.settle(Err(Error::Cancelled))
    }

    /// Returns the outcome when the future has settled.
    #[must_use]
    pub fn outcome(&self) -> Option<Result<V>> {
        match &*self.shared.lock_state() {
            State::Pending { .. } => None,
            State::Settled(outcome) => Some(outcome.clone()),
        }
    }

    /// Returns true when the future has settled.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(&*self.shared.lock_state(), State::Settled(_))
    }
}

impl<V: Clone + Send + 'static> IntoFuture for OpFuture<V> {
    type Output = Result<V>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<V>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.resolve().await })
    }
}

/// Producer half of an [`OpFuture`].
///
/// Exactly one settle wins; every later attempt, including a racing
/// cancellation, is a no-op.
pub struct Completer<V> {
    shared: Arc<Shared<V>>,
}

impl<V> Clone for Completer<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V> std::fmt::Debug for Completer<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completer").finish_non_exhaustive()
    }
}

impl<V: Clone + Send + 'static> Completer<V> {
    /// Settles the future with a success value. Returns false when the
    /// future was already terminal.
    pub fn succeed(&self, value: V) -> bool {
        self.shared.settle(Ok(value))
    }

    /// Settles the future with a failure. Returns false when the future was
    /// already terminal.
    pub fn fail(&self, error: Error) -> bool {
        self.shared.settle(Err(error))
    }

    /// Settles the future with the given outcome. Returns false when the
    /// future was already terminal.
    pub fn settle(&self, outcome: Result<V>) -> bool {
        self.shared.settle(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{OperationResult, ResultCode};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn rejection() -> Error {
        Error::Rejected(OperationResult::new(ResultCode::UnwillingToPerform))
    }

    #[tokio::test]
    async fn completed_future_resolves_immediately() {
        let future = OpFuture::completed(7_u32);
        assert_eq!(future.resolve().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let future = OpFuture::completed("once".to_string());
        let first = future.resolve().await;
        let second = future.resolve().await;
        assert_eq!(first, second);
        assert_eq!(second.unwrap(), "once");
    }

    #[tokio::test]
    async fn failed_future_resolves_to_error() {
        let future: OpFuture<u32> = OpFuture::failed(rejection());
        let err = future.resolve().await.unwrap_err();
        assert_eq!(err.result_code(), ResultCode::UnwillingToPerform);
    }

    #[tokio::test]
    async fn resolve_wakes_when_settled_from_another_task() {
        let (future, completer) = OpFuture::pending();
        tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            completer.succeed(42_u32);
        });
        assert_eq!(future.resolve().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn await_syntax_resolves() {
        let future = OpFuture::completed(5_u32);
        assert_eq!(future.await.unwrap(), 5);
    }

    #[tokio::test]
    async fn handlers_fire_once_in_registration_order() {
        let (future, completer) = OpFuture::pending();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            future.on_success(move |value: &u32| {
                order.lock().unwrap().push((tag, *value));
            });
        }
        completer.succeed(9_u32);

        assert_eq!(
            *order.lock().unwrap(),
            vec![("first", 9), ("second", 9), ("third", 9)]
        );
    }

    #[tokio::test]
    async fn late_success_registration_fires_immediately() {
        let future = OpFuture::completed(3_u32);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        future.on_success(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_handler_fires_and_success_handler_does_not() {
        let (future, completer) = OpFuture::<u32>::pending();
        let successes = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(AtomicUsize::new(0));

        let s = Arc::clone(&successes);
        let f = Arc::clone(&failures);
        future
            .on_success(move |_| {
                s.fetch_add(1, Ordering::SeqCst);
            })
            .on_failure(move |_| {
                f.fetch_add(1, Ordering::SeqCst);
            });
        completer.fail(rejection());

        assert_eq!(successes.load(Ordering::SeqCst), 0);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_settles_pending_future() {
        let (future, _completer) = OpFuture::<u32>::pending();
        assert!(future.cancel());
        assert!(!future.cancel());
        assert_eq!(future.resolve().await.unwrap_err(), Error::Cancelled);
    }

    #[tokio::test]
    async fn cancel_after_completion_is_a_noop() {
        let (future, completer) = OpFuture::pending();
        assert!(completer.succeed(11_u32));
        assert!(!future.cancel());
        assert_eq!(future.resolve().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn first_settle_wins() {
        let (future, completer) = OpFuture::pending();
        assert!(completer.succeed(1_u32));
        assert!(!completer.fail(rejection()));
        assert!(!completer.succeed(2_u32));
        assert_eq!(future.resolve().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn resolve_within_maps_elapsed_deadline_to_timeout() {
        let (future, _completer) = OpFuture::<u32>::pending();
        let err = future
            .resolve_within(Duration::from_millis(10))
            .await
            .unwrap_err();
        assert_eq!(err.result_code(), ResultCode::ClientTimeout);
    }

    #[tokio::test]
    async fn resolve_within_returns_settled_outcome() {
        let future = OpFuture::completed(8_u32);
        let value = future
            .resolve_within(Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(value, 8);
    }
}
