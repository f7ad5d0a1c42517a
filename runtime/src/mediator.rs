//! The dispatcher.
//!
//! [`Mediator`] is the public entry point of the crate: callers hand it a
//! typed request and await the typed response, never naming the handler.
//! It holds nothing but a shared reference to the immutable [`Registry`],
//! so it is cheap to clone and safe to share across arbitrarily many
//! concurrent `send` calls; the chain built for one call is private to that
//! call's stack frame.

use std::any::type_name;
use std::sync::Arc;

use courier_core::{CancellationToken, DispatchError, Request};

use crate::chain;
use crate::registry::{Registry, RegistryBuilder, RegistryError};

/// The request dispatcher.
///
/// Construct one at startup from a built [`Registry`] (or via
/// [`Mediator::builder`]) and share it wherever requests are sent from.
///
/// # Example
///
/// ```ignore
/// let mediator = Mediator::builder()
///     .register_handler(GreetHandler)
///     .build()?;
///
/// let greeting = mediator
///     .send(Greet { name: "World".into() }, &CancellationToken::new())
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct Mediator {
    registry: Arc<Registry>,
}

impl Mediator {
    /// Create a mediator over a built registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Start building a mediator and its registry in one go.
    #[must_use]
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// The registry this mediator dispatches against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch one request through its pipeline to its handler.
    ///
    /// Resolution fails fast: when no handler is registered for `R`, the
    /// error is returned before any behavior runs. Otherwise the behaviors
    /// registered for `R` wrap the handler call in registration order
    /// (first registered outermost) and the composed chain is awaited to
    /// completion. The token is passed through to every link unchanged; the
    /// dispatcher itself never acts on it.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::HandlerNotFound`] when `R` has no registered
    ///   handler.
    /// - [`DispatchError::Handler`] carrying, verbatim, whatever a behavior
    ///   or the handler failed with.
    // The request is taken by value: it lives in this frame and every link
    // borrows it until the chain resolves.
    #[allow(clippy::needless_pass_by_value)]
    #[tracing::instrument(skip_all, fields(request_type = type_name::<R>()))]
    pub async fn send<R: Request>(
        &self,
        request: R,
        token: &CancellationToken,
    ) -> Result<R::Response, DispatchError> {
        let handler = match self.registry.handler::<R>() {
            Ok(handler) => handler,
            Err(error) => {
                metrics::counter!("courier.dispatch.unroutable").increment(1);
                tracing::warn!("no handler registered");
                return Err(error);
            }
        };

        let behaviors = self.registry.behaviors::<R>();
        tracing::debug!(behaviors = behaviors.len(), "dispatch chain composed");

        let result = chain::compose(handler, behaviors, &request, token).run().await;

        match &result {
            Ok(_) => {
                metrics::counter!("courier.dispatch.completed").increment(1);
            }
            Err(error) => {
                metrics::counter!("courier.dispatch.failed").increment(1);
                tracing::warn!(%error, "dispatch failed");
            }
        }

        result
    }
}

/// Builder that registers handlers and behaviors and yields a [`Mediator`].
///
/// A thin wrapper over [`RegistryBuilder`] for hosts that have no use for
/// the registry as a standalone value.
#[derive(Debug, Default)]
pub struct MediatorBuilder {
    registry: RegistryBuilder,
}

impl MediatorBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `R`.
    #[must_use]
    pub fn register_handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: courier_core::RequestHandler<R> + 'static,
    {
        self.registry = self.registry.register_handler(handler);
        self
    }

    /// Append a pipeline behavior for request type `R`.
    #[must_use]
    pub fn register_behavior<R, B>(mut self, behavior: B) -> Self
    where
        R: Request,
        B: courier_core::PipelineBehavior<R> + 'static,
    {
        self.registry = self.registry.register_behavior(behavior);
        self
    }

    /// Validate the registrations and produce the mediator.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AmbiguousHandler`] when more than one
    /// handler was registered for the same request type.
    pub fn build(self) -> Result<Mediator, RegistryError> {
        Ok(Mediator::new(self.registry.build()?))
    }
}
