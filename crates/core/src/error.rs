/// Result alias that carries the custom [`KidCamError`] type.
pub type Result<T> = std::result::Result<T, KidCamError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum KidCamError {
    /// The vision collaborator failed to start. Per-tick capture misses are
    /// not errors; only startup failure is surfaced through this variant.
    #[error("vision startup failed: {0}")]
    VisionStartup(String),
    /// A selection string did not name a known game mode.
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl KidCamError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for KidCamError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for KidCamError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
