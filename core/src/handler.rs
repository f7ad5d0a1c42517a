//! The handler contract.

use async_trait::async_trait;

use crate::cancellation::CancellationToken;
use crate::error::BoxError;
use crate::request::Request;

/// The single authoritative implementation for one request type.
///
/// Exactly one handler is registered per request type; the registry rejects
/// duplicates at startup and dispatch fails fast when none is present.
///
/// A handler borrows the request, does its work (possibly awaiting I/O), and
/// produces the response the request's type declares. Domain errors are
/// returned behind [`BoxError`] and reach the caller unchanged.
///
/// Handlers are shared across concurrent dispatches, so implementations must
/// not keep per-call mutable state in `&self`.
///
/// # Example
///
/// ```
/// use courier_core::{async_trait, BoxError, CancellationToken, Request, RequestHandler};
///
/// struct Ping;
///
/// impl Request for Ping {
///     type Response = &'static str;
/// }
///
/// struct PingHandler;
///
/// #[async_trait]
/// impl RequestHandler<Ping> for PingHandler {
///     async fn handle(
///         &self,
///         _request: &Ping,
///         _token: &CancellationToken,
///     ) -> Result<&'static str, BoxError> {
///         Ok("pong")
///     }
/// }
/// ```
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    /// Handle one request and produce its response.
    ///
    /// The token is the caller's cancellation signal; honor it where work
    /// can be abandoned early.
    ///
    /// # Errors
    ///
    /// Returns the handler's domain error. It is carried to the caller of
    /// `send` verbatim, as the source of the resulting dispatch error.
    async fn handle(
        &self,
        request: &R,
        token: &CancellationToken,
    ) -> Result<R::Response, BoxError>;
}
