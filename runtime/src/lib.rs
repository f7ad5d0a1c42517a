//! # Courier Runtime
//!
//! Registry and dispatcher runtime for the Courier mediator.
//!
//! This crate provides the running parts of the mediator: the
//! immutable-after-startup [`Registry`] that maps request types to their
//! handler and pipeline behaviors, and the [`Mediator`] that composes and
//! awaits the dispatch chain for each `send`.
//!
//! ## Core Components
//!
//! - **Registry**: type-indexed handler and behavior lookup, populated once
//!   at startup through [`RegistryBuilder`]
//! - **Mediator**: the public dispatch entry point; stateless and cheap to
//!   clone, safe to share across concurrent callers
//! - **Chain composition**: per-dispatch folding of behaviors around the
//!   handler so the first-registered behavior is the outermost wrapper
//!
//! ## Example
//!
//! ```ignore
//! use courier_core::CancellationToken;
//! use courier_runtime::Mediator;
//!
//! let mediator = Mediator::builder()
//!     .register_handler(GreetHandler)
//!     .register_behavior::<Greet, _>(Timing)
//!     .build()?;
//!
//! let response = mediator
//!     .send(Greet { name: "World".into() }, &CancellationToken::new())
//!     .await?;
//! ```

mod chain;

/// Type-indexed handler and behavior registry.
pub mod registry;

/// The dispatcher.
pub mod mediator;

pub use mediator::{Mediator, MediatorBuilder};
pub use registry::{BehaviorChain, Registry, RegistryBuilder, RegistryError};
