use thiserror::Error;

/// Configuration errors detected while building the dispatcher.
///
/// These are startup-time defects, not request-time failures: a dispatcher
/// is only constructed once its registration table is consistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// More than one handler was registered for the same request kind.
    #[error("duplicate handler registered for request '{0}'")]
    DuplicateHandler(&'static str),
}
