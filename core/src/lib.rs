//! # Courier Core
//!
//! Core traits and types for the Courier mediator.
//!
//! This crate provides the fundamental abstractions for in-process request
//! dispatch: callers hand a typed request to a mediator and receive a typed
//! response, without knowing which component handles it.
//!
//! ## Core Concepts
//!
//! - **Request**: An immutable value tagged with the response type it expects
//! - **Handler**: The single authoritative implementation for one request type
//! - **Pipeline behavior**: A middleware-like wrapper around handler execution,
//!   composed in an onion pattern
//! - **Continuation**: The per-dispatch callable representing "the rest of the
//!   pipeline"
//! - **Cancellation token**: A cooperative signal threaded through every link
//!
//! ## Architecture Principles
//!
//! - One handler per request type, resolved at dispatch time
//! - First-registered behavior is the outermost wrapper: its before-logic runs
//!   first and its after-logic runs last
//! - The chain is rebuilt fresh for every dispatch; no mutable state is shared
//!   between calls
//! - Failures surface to the caller unchanged; the dispatch machinery never
//!   retries or swallows
//!
//! ## Example
//!
//! ```ignore
//! use courier_core::{async_trait, BoxError, CancellationToken, Request, RequestHandler};
//!
//! struct Greet {
//!     name: String,
//! }
//!
//! impl Request for Greet {
//!     type Response = String;
//! }
//!
//! struct GreetHandler;
//!
//! #[async_trait]
//! impl RequestHandler<Greet> for GreetHandler {
//!     async fn handle(
//!         &self,
//!         request: &Greet,
//!         _token: &CancellationToken,
//!     ) -> Result<String, BoxError> {
//!         Ok(format!("Hello, {}!", request.name))
//!     }
//! }
//! ```

// Re-export the attribute macro so downstream crates can implement the
// handler and behavior traits without a direct async-trait dependency.
pub use async_trait::async_trait;

pub mod behavior;
pub mod cancellation;
pub mod error;
pub mod handler;
pub mod request;

pub use behavior::{Next, PipelineBehavior};
pub use cancellation::CancellationToken;
pub use error::{BoxError, DispatchError};
pub use handler::RequestHandler;
pub use request::Request;
