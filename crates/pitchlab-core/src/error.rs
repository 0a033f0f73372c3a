//! Error type shared by the core and the browser glue.
use thiserror::Error;

/// Every failure in pitchlab is recoverable: callers log it and carry on.
#[derive(Debug, Error)]
pub enum PitchLabError {
    /// No tab matched the URL allow-list.
    #[error("no matching media tab found")]
    NoMatchingTab,
    /// The selected tab carried no identifier to address it by.
    #[error("matching tab has no id")]
    MissingTabId,
    /// The message could not be delivered (e.g. no listener in the tab).
    #[error("delivery failed: {0}")]
    Delivery(String),
    /// A rate arrived that is not a finite number.
    #[error("invalid rate: {0}")]
    InvalidRate(f64),
    /// A message or persisted blob failed to decode.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    /// Local storage was unavailable or rejected the write.
    #[error("storage: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PitchLabError>;
