//! Ready-made request, handler, and behavior fixtures.
//!
//! One observable pipeline: [`EchoRequest`] flows through any number of
//! [`RecordingBehavior`]s into an [`EchoHandler`], and every step leaves a
//! trace. The handler prefixes the message with `Handled: `; each recording
//! behavior appends `:{name}` to the result on the way out, so the final
//! response string encodes the unwind order.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use courier_core::{
    BoxError, CancellationToken, DispatchError, Next, PipelineBehavior, Request, RequestHandler,
};
use thiserror::Error;

use crate::execution_log::ExecutionLog;

/// A request carrying a message to echo back.
#[derive(Debug, Clone)]
pub struct EchoRequest {
    /// The message the handler echoes.
    pub message: String,
}

impl EchoRequest {
    /// Create a request with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Request for EchoRequest {
    type Response = EchoResponse;
}

/// The echo handler's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoResponse {
    /// The echoed result, decorated by any behaviors on the way out.
    pub result: String,
}

/// Handler that echoes the request message, counting its invocations.
///
/// Clones share the invocation counter, so a test can keep one clone and
/// register the other:
///
/// ```ignore
/// let handler = EchoHandler::new();
/// let mediator = Mediator::builder()
///     .register_handler(handler.clone())
///     .build()?;
/// // ... dispatch ...
/// assert!(handler.was_invoked());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EchoHandler {
    invocations: Arc<AtomicUsize>,
}

impl EchoHandler {
    /// Create a handler with a zeroed invocation counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many requests this handler (and its clones) handled.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Whether the handler ran at least once.
    #[must_use]
    pub fn was_invoked(&self) -> bool {
        self.invocations() > 0
    }
}

#[async_trait]
impl RequestHandler<EchoRequest> for EchoHandler {
    async fn handle(
        &self,
        request: &EchoRequest,
        _token: &CancellationToken,
    ) -> Result<EchoResponse, BoxError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        Ok(EchoResponse {
            result: format!("Handled: {}", request.message),
        })
    }
}

/// Error produced by [`FailingHandler`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("echo rejected: {reason}")]
pub struct EchoRejected {
    /// Why the handler refused the request.
    pub reason: String,
}

/// Handler that always fails with [`EchoRejected`].
#[derive(Debug, Clone)]
pub struct FailingHandler {
    reason: String,
}

impl FailingHandler {
    /// Create a handler that fails with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RequestHandler<EchoRequest> for FailingHandler {
    async fn handle(
        &self,
        _request: &EchoRequest,
        _token: &CancellationToken,
    ) -> Result<EchoResponse, BoxError> {
        Err(Box::new(EchoRejected {
            reason: self.reason.clone(),
        }))
    }
}

/// Behavior that records `Name:Start` / `Name:End` around the rest of the
/// pipeline and appends `:Name` to the result on the way out.
///
/// Registering `[RecordingBehavior("A"), RecordingBehavior("B")]` therefore
/// yields the trace `A:Start, B:Start, B:End, A:End` and a result suffixed
/// `:B:A`.
#[derive(Debug, Clone)]
pub struct RecordingBehavior {
    name: &'static str,
    log: ExecutionLog,
}

impl RecordingBehavior {
    /// Create a behavior recording under `name` into `log`.
    #[must_use]
    pub fn new(name: &'static str, log: ExecutionLog) -> Self {
        Self { name, log }
    }
}

#[async_trait]
impl PipelineBehavior<EchoRequest> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &EchoRequest,
        next: Next<'_, EchoResponse>,
        _token: &CancellationToken,
    ) -> Result<EchoResponse, DispatchError> {
        self.log.record(format!("{}:Start", self.name));

        let mut response = next.run().await?;
        response.result.push_str(&format!(":{}", self.name));

        self.log.record(format!("{}:End", self.name));
        Ok(response)
    }
}

/// Behavior that never calls `next`: the rest of the pipeline (handler
/// included) is skipped and the caller receives this behavior's canned
/// response.
#[derive(Debug, Clone)]
pub struct ShortCircuitBehavior {
    log: ExecutionLog,
}

impl ShortCircuitBehavior {
    /// Create a short-circuiting behavior recording into `log`.
    #[must_use]
    pub fn new(log: ExecutionLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl PipelineBehavior<EchoRequest> for ShortCircuitBehavior {
    async fn handle(
        &self,
        _request: &EchoRequest,
        next: Next<'_, EchoResponse>,
        _token: &CancellationToken,
    ) -> Result<EchoResponse, DispatchError> {
        self.log.record("ShortCircuit");
        drop(next);

        Ok(EchoResponse {
            result: "short-circuited".to_owned(),
        })
    }
}
