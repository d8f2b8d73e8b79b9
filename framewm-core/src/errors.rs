use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Error kinds surfaced by the core.
///
/// Commands return these to their caller; event handlers never do. An event
/// handler either completes or logs and returns, so the event loop never
/// sees an error from the core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0} not found")]
    NotFound(String),
    /// The rules engine asked for the window to be left unmanaged.
    #[error("window rejected by rules")]
    RuleReject,
    /// An internal invariant was broken. Diagnosed, then repaired with the
    /// simplest possible fix; never fatal.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
    #[error("x request failed: {0}")]
    XRequestFailed(String),
}

impl CoreError {
    /// Exit code for the textual command surface. Zero is success, positive
    /// integers are reserved for argument errors and lookup misses.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::InvalidArgument(_) => 2,
            CoreError::NotFound(_) => 3,
            CoreError::RuleReject => 4,
            CoreError::InconsistentState(_) => 5,
            CoreError::XRequestFailed(_) => 6,
        }
    }
}
