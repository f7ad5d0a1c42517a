//! Cooperative cancellation.
//!
//! One [`CancellationToken`] is threaded, unchanged, through every pipeline
//! behavior and into the handler of a dispatch. The dispatch machinery only
//! propagates the signal; it never polls it. Behaviors and handlers that can
//! abandon work early check [`CancellationToken::is_cancelled`] (or await
//! [`CancellationToken::cancelled`]) themselves, and those that cannot simply
//! ignore the token.
//!
//! Clones share the underlying signal: cancelling any clone cancels all of
//! them. This is the same watch-channel signalling the runtime uses for
//! completion tracking, exposed as a value that can be passed positionally.

#![allow(clippy::module_name_repetitions)] // CancellationToken is the natural name

use std::sync::Arc;
use tokio::sync::watch;

/// A cloneable cooperative-cancellation signal.
///
/// # Example
///
/// ```
/// use courier_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
///
/// assert!(!observer.is_cancelled());
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    signal: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);

        Self {
            signal: Arc::new(signal),
        }
    }

    /// Cancel the token.
    ///
    /// Idempotent: cancelling an already-cancelled token has no further
    /// effect. All clones observe the cancellation.
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    /// Whether the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow()
    }

    /// Wait until the token is cancelled.
    ///
    /// Returns immediately if the token is already cancelled. Intended for
    /// use in `tokio::select!` arms alongside the actual work:
    ///
    /// ```ignore
    /// tokio::select! {
    ///     () = token.cancelled() => Err(DispatchError::failure(Interrupted)),
    ///     result = do_work() => result,
    /// }
    /// ```
    pub async fn cancelled(&self) {
        let mut rx = self.signal.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
