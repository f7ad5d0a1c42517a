//! Per-dispatch chain composition.
//!
//! Each dispatch folds its behaviors around the handler call into one
//! [`Next`] continuation. The base continuation is the handler invocation;
//! behaviors are folded on in reverse registration order, which makes the
//! first-registered behavior the outermost wrapper: its before-logic runs
//! first and its after-logic runs last.
//!
//! The composed chain borrows the request and token from the `send` frame
//! and is consumed before that frame returns; nothing built here survives
//! the dispatch.

use std::sync::Arc;

use courier_core::{
    CancellationToken, DispatchError, Next, PipelineBehavior, Request, RequestHandler,
};
use futures::future::BoxFuture;

use crate::registry::BehaviorChain;

/// Compose the full dispatch chain for one request.
///
/// With behaviors `[A, B]` (registration order), the returned continuation
/// runs A-before, B-before, handler, B-after, A-after. With no behaviors it
/// is exactly the handler call.
pub(crate) fn compose<'a, R: Request>(
    handler: Arc<dyn RequestHandler<R>>,
    behaviors: BehaviorChain<R>,
    request: &'a R,
    token: &'a CancellationToken,
) -> Next<'a, R::Response> {
    let mut next = handler_continuation(handler, request, token);

    for behavior in behaviors.into_iter().rev() {
        next = wrap(behavior, request, next, token);
    }

    next
}

/// The innermost link: invoke the handler, carrying its error verbatim.
fn handler_continuation<'a, R: Request>(
    handler: Arc<dyn RequestHandler<R>>,
    request: &'a R,
    token: &'a CancellationToken,
) -> Next<'a, R::Response> {
    Next::new(move || {
        let fut: BoxFuture<'a, Result<R::Response, DispatchError>> = Box::pin(async move {
            handler
                .handle(request, token)
                .await
                .map_err(DispatchError::from)
        });
        fut
    })
}

/// Wrap one behavior around an already-composed inner continuation.
fn wrap<'a, R: Request>(
    behavior: Arc<dyn PipelineBehavior<R>>,
    request: &'a R,
    inner: Next<'a, R::Response>,
    token: &'a CancellationToken,
) -> Next<'a, R::Response> {
    Next::new(move || {
        let fut: BoxFuture<'a, Result<R::Response, DispatchError>> =
            Box::pin(async move { behavior.handle(request, inner, token).await });
        fut
    })
}
