//! Pipeline behaviors and the dispatch continuation.
//!
//! A behavior wraps handler execution the way middleware wraps a request:
//! it receives the request, a [`Next`] continuation representing the rest of
//! the pipeline, and the cancellation token. It may run logic before calling
//! [`Next::run`], transform the result afterwards, or short-circuit by not
//! calling it at all.
//!
//! Behaviors compose in an onion: the first-registered behavior is the
//! outermost wrapper, so with behaviors `[A, B]` the execution order is
//! A-before, B-before, handler, B-after, A-after.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::cancellation::CancellationToken;
use crate::error::DispatchError;
use crate::request::Request;

/// The boxed single-shot callable behind [`Next`].
type Continuation<'a, Res> =
    Box<dyn FnOnce() -> BoxFuture<'a, Result<Res, DispatchError>> + Send + 'a>;

/// The rest of the pipeline for one dispatch.
///
/// A `Next` is an ephemeral, single-use continuation: invoking it runs every
/// remaining behavior and, innermost, the handler. It exists only for the
/// duration of one dispatch and is consumed by [`Next::run`], so a behavior
/// can forward control at most once. Dropping it without running it
/// short-circuits the rest of the chain.
pub struct Next<'a, Res> {
    continuation: Continuation<'a, Res>,
}

impl<'a, Res> Next<'a, Res> {
    /// Build a continuation from a single-shot closure.
    pub fn new<F>(continuation: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'a, Result<Res, DispatchError>> + Send + 'a,
    {
        Self {
            continuation: Box::new(continuation),
        }
    }

    /// Run the rest of the pipeline and produce the response.
    ///
    /// # Errors
    ///
    /// Returns whatever the remaining behaviors or the handler fail with,
    /// unchanged.
    pub async fn run(self) -> Result<Res, DispatchError> {
        (self.continuation)().await
    }
}

impl<Res> std::fmt::Debug for Next<'_, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Next(<continuation>)")
    }
}

/// A cross-cutting wrapper around handler execution.
///
/// Implementations are registered per request type and run in registration
/// order on the way in, reverse registration order on the way out.
///
/// # Example
///
/// A behavior that times the rest of the pipeline:
///
/// ```ignore
/// struct Timing;
///
/// #[async_trait]
/// impl PipelineBehavior<Greet> for Timing {
///     async fn handle(
///         &self,
///         _request: &Greet,
///         next: Next<'_, Greeting>,
///         _token: &CancellationToken,
///     ) -> Result<Greeting, DispatchError> {
///         let started = std::time::Instant::now();
///         let response = next.run().await;
///         tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "handled");
///         response
///     }
/// }
/// ```
#[async_trait]
pub trait PipelineBehavior<R: Request>: Send + Sync {
    /// Run this link of the pipeline.
    ///
    /// Call `next.run().await` at most once to forward control; skip it to
    /// short-circuit with this behavior's own result.
    ///
    /// # Errors
    ///
    /// Returns the failure of the rest of the pipeline, or this behavior's
    /// own error when it short-circuits.
    async fn handle(
        &self,
        request: &R,
        next: Next<'_, R::Response>,
        token: &CancellationToken,
    ) -> Result<R::Response, DispatchError>;
}
