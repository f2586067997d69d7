use thiserror::Error;

/// Failures surfaced by the height sensor pipeline.
///
/// Nothing in the crate recovers from these locally: a failed read aborts the
/// whole measurement and the error reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum HeightError {
    #[error("hardware read failed: {0}")]
    HardwareRead(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
