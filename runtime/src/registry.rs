//! Type-indexed handler and behavior registry.
//!
//! The registry maps a request type to exactly one handler and to an ordered
//! list of pipeline behaviors. It is populated once at startup through
//! [`RegistryBuilder`] and never mutated afterwards, so concurrent dispatches
//! read it without any locking.
//!
//! Lookup is keyed by [`TypeId`]: registration records the request type's id
//! alongside a type-erased `Arc` of the implementation, and resolution
//! downcasts back to the typed trait object. There is no scanning or runtime
//! discovery; everything the registry knows was registered explicitly.
//!
//! Registering two handlers for the same request type is a programmer error.
//! The builder surfaces it at [`RegistryBuilder::build`] rather than letting
//! one registration silently shadow the other.

#![allow(clippy::module_name_repetitions)] // RegistryBuilder/RegistryError are the natural names

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use courier_core::{DispatchError, PipelineBehavior, Request, RequestHandler};
use smallvec::SmallVec;
use thiserror::Error;

/// The behaviors resolved for one request type, in registration order.
///
/// Most request types carry a handful of behaviors at most, so the list
/// stays inline and only spills to the heap beyond four.
pub type BehaviorChain<R> = SmallVec<[Arc<dyn PipelineBehavior<R>>; 4]>;

/// Errors surfaced while building a [`Registry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// More than one handler was registered for the same request type.
    ///
    /// Ambiguity is never resolved by picking one: it fails the build so the
    /// mistake surfaces at startup instead of at dispatch time.
    #[error("multiple handlers registered for request type `{request_type}`")]
    AmbiguousHandler {
        /// Fully qualified name of the doubly-registered request type.
        request_type: &'static str,
    },
}

/// One registered handler, erased to its request's [`TypeId`].
struct HandlerEntry {
    request_type: &'static str,
    /// `Arc<dyn RequestHandler<R>>` behind `Any`, keyed by `TypeId::of::<R>()`.
    handler: Box<dyn Any + Send + Sync>,
}

/// One registered behavior, erased like [`HandlerEntry`].
struct BehaviorEntry {
    /// `Arc<dyn PipelineBehavior<R>>` behind `Any`.
    behavior: Box<dyn Any + Send + Sync>,
}

/// Immutable mapping from request types to their handler and behaviors.
///
/// Built once at startup via [`Registry::builder`]; read-only from then on.
pub struct Registry {
    handlers: HashMap<TypeId, HandlerEntry>,
    behaviors: HashMap<TypeId, Vec<BehaviorEntry>>,
}

impl Registry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve the handler for `R`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HandlerNotFound`] when no handler is
    /// registered for `R`.
    pub fn handler<R: Request>(&self) -> Result<Arc<dyn RequestHandler<R>>, DispatchError> {
        self.handlers
            .get(&TypeId::of::<R>())
            .and_then(|entry| entry.handler.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .map(Arc::clone)
            .ok_or_else(|| DispatchError::HandlerNotFound {
                request_type: type_name::<R>(),
            })
    }

    /// Resolve the behaviors for `R`, in registration order.
    ///
    /// Empty when none are registered.
    #[must_use]
    pub fn behaviors<R: Request>(&self) -> BehaviorChain<R> {
        let Some(entries) = self.behaviors.get(&TypeId::of::<R>()) else {
            return BehaviorChain::new();
        };

        entries
            .iter()
            .filter_map(|entry| {
                entry
                    .behavior
                    .downcast_ref::<Arc<dyn PipelineBehavior<R>>>()
            })
            .map(Arc::clone)
            .collect()
    }

    /// Number of request types with a registered handler.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry has no handlers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("handlers", &self.handlers.len())
            .field(
                "behaviors",
                &self.behaviors.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

/// Builder for [`Registry`].
///
/// Registration happens once, at startup, on a single thread; the builder
/// records every call and validates the whole set in [`RegistryBuilder::build`].
/// Behaviors run in the order they were registered here.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: Vec<(TypeId, HandlerEntry)>,
    behaviors: HashMap<TypeId, Vec<BehaviorEntry>>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `R`.
    ///
    /// Each request type takes exactly one handler; a second registration
    /// for the same type fails the eventual [`build`](Self::build).
    #[must_use]
    pub fn register_handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let entry = HandlerEntry {
            request_type: type_name::<R>(),
            handler: Box::new(Arc::new(handler) as Arc<dyn RequestHandler<R>>),
        };
        self.handlers.push((TypeId::of::<R>(), entry));
        self
    }

    /// Append a pipeline behavior for request type `R`.
    ///
    /// The first behavior registered for a type becomes the outermost
    /// wrapper at dispatch time.
    #[must_use]
    pub fn register_behavior<R, B>(mut self, behavior: B) -> Self
    where
        R: Request,
        B: PipelineBehavior<R> + 'static,
    {
        self.behaviors
            .entry(TypeId::of::<R>())
            .or_default()
            .push(BehaviorEntry {
                behavior: Box::new(Arc::new(behavior) as Arc<dyn PipelineBehavior<R>>),
            });
        self
    }

    /// Validate the registrations and produce the immutable [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AmbiguousHandler`] when more than one
    /// handler was registered for the same request type.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut handlers = HashMap::with_capacity(self.handlers.len());

        for (key, entry) in self.handlers {
            let request_type = entry.request_type;
            if handlers.insert(key, entry).is_some() {
                return Err(RegistryError::AmbiguousHandler { request_type });
            }
        }

        Ok(Registry {
            handlers,
            behaviors: self.behaviors,
        })
    }
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("handlers", &self.handlers.len())
            .field(
                "behaviors",
                &self.behaviors.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;
    use async_trait::async_trait;
    use courier_core::{BoxError, CancellationToken, Next};

    #[derive(Debug)]
    struct TestRequest;

    impl Request for TestRequest {
        type Response = ();
    }

    struct TestHandler;

    #[async_trait]
    impl RequestHandler<TestRequest> for TestHandler {
        async fn handle(
            &self,
            _request: &TestRequest,
            _token: &CancellationToken,
        ) -> Result<(), BoxError> {
            Ok(())
        }
    }

    struct PassThrough;

    #[async_trait]
    impl PipelineBehavior<TestRequest> for PassThrough {
        async fn handle(
            &self,
            _request: &TestRequest,
            next: Next<'_, ()>,
            _token: &CancellationToken,
        ) -> Result<(), DispatchError> {
            next.run().await
        }
    }

    #[test]
    fn build_rejects_duplicate_handlers() {
        let error = Registry::builder()
            .register_handler::<TestRequest, _>(TestHandler)
            .register_handler::<TestRequest, _>(TestHandler)
            .build()
            .unwrap_err();

        assert!(matches!(
            error,
            RegistryError::AmbiguousHandler { request_type } if request_type.contains("TestRequest")
        ));
    }

    #[test]
    fn handler_lookup_fails_when_unregistered() {
        let registry = Registry::builder().build().unwrap();

        let error = registry.handler::<TestRequest>().err().unwrap();
        assert!(error.is_handler_not_found());
    }

    #[test]
    fn behaviors_default_to_empty() {
        let registry = Registry::builder()
            .register_handler::<TestRequest, _>(TestHandler)
            .build()
            .unwrap();

        assert!(registry.behaviors::<TestRequest>().is_empty());
    }

    #[test]
    fn behaviors_are_kept_per_request_type() {
        let registry = Registry::builder()
            .register_handler::<TestRequest, _>(TestHandler)
            .register_behavior::<TestRequest, _>(PassThrough)
            .register_behavior::<TestRequest, _>(PassThrough)
            .build()
            .unwrap();

        assert_eq!(registry.behaviors::<TestRequest>().len(), 2);
    }

    #[test]
    fn registered_handlers_are_countable() {
        let empty = Registry::builder().build().unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.handler_count(), 0);

        let registry = Registry::builder()
            .register_handler::<TestRequest, _>(TestHandler)
            .build()
            .unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.handler_count(), 1);
    }
}
