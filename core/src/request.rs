//! The request contract.
//!
//! A request is an immutable value created by the caller and tagged, through
//! an associated type, with the response it expects back. The dispatch
//! machinery identifies a request by its concrete type: the handler and the
//! behavior chain for a dispatch are looked up from the request type alone,
//! and the response type rides along as [`Request::Response`].

/// A dispatchable request.
///
/// Implement this for any type that should be routable through a mediator.
/// The implementation carries no behavior; it only declares the response
/// type so that `send` can be fully typed end to end.
///
/// Requests are borrowed, never mutated, by the dispatch machinery: every
/// behavior and the handler observe the same `&R` for the duration of one
/// dispatch, and the value is dropped when the call completes.
///
/// # Example
///
/// ```
/// use courier_core::Request;
///
/// struct LookupUser {
///     id: u64,
/// }
///
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// impl Request for LookupUser {
///     type Response = User;
/// }
/// ```
pub trait Request: Send + Sync + 'static {
    /// The response produced by this request's handler.
    type Response: Send + 'static;
}
