//! Typed request objects routed through the dispatcher.

/// An immutable value identifying an intended operation or inquiry.
///
/// Each request kind is associated at compile time with exactly one response
/// type and, at registration time, with exactly one handler. The `NAME` tag
/// keys the dispatcher's registration table and is also used to derive the
/// structured error type for validation failures.
pub trait Request: Send + Sync + 'static {
    /// The response produced by this request's handler.
    type Response: Send + 'static;

    /// Stable kind tag, unique per request type.
    const NAME: &'static str;
}

/// Marker for requests that change state.
pub trait Command: Request {}

/// Marker for requests that read state without side effects.
pub trait Query: Request {}
