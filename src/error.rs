use crate::{store::StoreError, sunset::SunsetError, timespec::TimeSpecError};

/// Failures of the hub's core operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Caller supplied a malformed time or duration.
    #[error("{0}")]
    Validation(String),

    #[error("sunset lookup failed: {0}")]
    Sunset(#[from] SunsetError),

    /// A decision was requested before the hub has both a settings record
    /// and at least one sensor reading.
    #[error("not enough data: {0}")]
    NotReady(&'static str),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<TimeSpecError> for HubError {
    fn from(e: TimeSpecError) -> Self {
        Self::Validation(e.to_string())
    }
}

pub type HubResult<T> = Result<T, HubError>;
