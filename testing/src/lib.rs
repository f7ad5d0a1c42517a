//! # Courier Testing
//!
//! Testing utilities and fixtures for the Courier mediator.
//!
//! This crate provides the pieces a dispatch test needs over and over:
//!
//! - [`ExecutionLog`]: a shared, ordered trace that behaviors and handlers
//!   record into, for asserting execution order
//! - Echo fixtures ([`EchoRequest`], [`EchoHandler`], [`RecordingBehavior`],
//!   [`ShortCircuitBehavior`], [`FailingHandler`]): a ready-made request
//!   pipeline whose every step is observable
//! - [`DispatchTest`]: a fluent Given-When-Then runner for single dispatches
//!
//! ## Example
//!
//! ```ignore
//! use courier_runtime::Mediator;
//! use courier_testing::{DispatchTest, EchoHandler, EchoRequest};
//!
//! let mediator = Mediator::builder()
//!     .register_handler(EchoHandler::new())
//!     .build()?;
//!
//! DispatchTest::new(mediator)
//!     .when_request(EchoRequest::new("Hello World"))
//!     .then_response(|response| {
//!         assert_eq!(response.result, "Handled: Hello World");
//!     })
//!     .run()
//!     .await;
//! ```

pub mod dispatch_test;
pub mod execution_log;
pub mod fixtures;

pub use dispatch_test::DispatchTest;
pub use execution_log::ExecutionLog;
pub use fixtures::{
    EchoHandler, EchoRejected, EchoRequest, EchoResponse, FailingHandler, RecordingBehavior,
    ShortCircuitBehavior,
};
