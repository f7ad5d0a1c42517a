//! Ergonomic testing utilities for dispatches
//!
//! This module provides a fluent API for exercising a mediator with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // DispatchTest is the natural name

use courier_core::{CancellationToken, DispatchError, Request};
use courier_runtime::Mediator;

/// Type alias for response assertion functions
type ResponseAssertion<Res> = Box<dyn FnOnce(&Res) + Send>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&DispatchError) + Send>;

/// Fluent API for testing one dispatch with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use courier_testing::DispatchTest;
///
/// DispatchTest::new(mediator)
///     .when_request(EchoRequest::new("Hello World"))
///     .then_response(|response| {
///         assert_eq!(response.result, "Handled: Hello World");
///     })
///     .run()
///     .await;
/// ```
pub struct DispatchTest<R: Request> {
    mediator: Mediator,
    token: CancellationToken,
    request: Option<R>,
    response_assertions: Vec<ResponseAssertion<R::Response>>,
    error_assertions: Vec<ErrorAssertion>,
}

impl<R: Request> DispatchTest<R> {
    /// Create a dispatch test against the given mediator
    #[must_use]
    pub fn new(mediator: Mediator) -> Self {
        Self {
            mediator,
            token: CancellationToken::new(),
            request: None,
            response_assertions: Vec::new(),
            error_assertions: Vec::new(),
        }
    }

    /// Use a specific cancellation token (Given)
    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Set the request to dispatch (When)
    #[must_use]
    pub fn when_request(mut self, request: R) -> Self {
        self.request = Some(request);
        self
    }

    /// Add an assertion about the successful response (Then)
    #[must_use]
    pub fn then_response<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::Response) + Send + 'static,
    {
        self.response_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the dispatch error (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&DispatchError) + Send + 'static,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Dispatch the request and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no request was set, if the dispatch succeeded while error
    /// assertions were registered (or vice versa), or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub async fn run(self) {
        let request = self
            .request
            .expect("Request must be set with when_request()");

        let result = self.mediator.send(request, &self.token).await;

        match result {
            Ok(response) => {
                assert!(
                    self.error_assertions.is_empty(),
                    "Expected dispatch to fail, but it produced a response"
                );

                for assertion in self.response_assertions {
                    assertion(&response);
                }
            }
            Err(error) => {
                assert!(
                    self.response_assertions.is_empty(),
                    "Expected dispatch to succeed, but it failed: {error}"
                );

                for assertion in self.error_assertions {
                    assertion(&error);
                }
            }
        }
    }
}
