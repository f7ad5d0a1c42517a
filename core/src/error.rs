//! Error taxonomy for dispatch.
//!
//! A dispatch can fail in exactly two ways: the registry has no handler for
//! the request's type, or a handler/behavior raised during execution. The
//! first is always fatal to that dispatch and is reported before any
//! behavior runs. The second is carried to the caller verbatim: the original
//! error stays reachable through [`std::error::Error::source`] and is never
//! retried, re-wrapped, or suppressed along the way.

use thiserror::Error;

/// Boxed error type produced by handlers and behaviors.
///
/// Handlers return their domain errors behind this alias; the dispatch
/// machinery carries the box through to the caller unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by `Mediator::send`.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler is registered for the request's type.
    ///
    /// Raised before any pipeline behavior runs.
    #[error("no handler registered for request type `{request_type}`")]
    HandlerNotFound {
        /// Fully qualified name of the request type that could not be routed.
        request_type: &'static str,
    },

    /// A handler or pipeline behavior failed during execution.
    ///
    /// The original error is the [`source`](std::error::Error::source) of
    /// this variant.
    #[error("handler or pipeline behavior failed: {0}")]
    Handler(#[from] BoxError),
}

impl DispatchError {
    /// Wrap a handler or behavior failure.
    ///
    /// Convenience for behaviors that short-circuit with their own error:
    ///
    /// ```ignore
    /// return Err(DispatchError::failure(RateLimited { retry_after }));
    /// ```
    pub fn failure(error: impl Into<BoxError>) -> Self {
        Self::Handler(error.into())
    }

    /// Whether this error means the request type had no registered handler.
    #[must_use]
    pub const fn is_handler_not_found(&self) -> bool {
        matches!(self, Self::HandlerNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("widget {id} is jammed")]
    struct WidgetJammed {
        id: u32,
    }

    #[test]
    fn handler_not_found_names_the_request_type() {
        let error = DispatchError::HandlerNotFound {
            request_type: "my_app::LookupUser",
        };

        assert!(error.is_handler_not_found());
        assert_eq!(
            error.to_string(),
            "no handler registered for request type `my_app::LookupUser`"
        );
    }

    #[test]
    fn failure_preserves_the_original_error_as_source() {
        let error = DispatchError::failure(WidgetJammed { id: 7 });

        assert!(!error.is_handler_not_found());

        let source = std::error::Error::source(&error).unwrap();
        let jammed = source.downcast_ref::<WidgetJammed>().unwrap();
        assert_eq!(jammed, &WidgetJammed { id: 7 });
        assert!(error.to_string().contains("widget 7 is jammed"));
    }
}
