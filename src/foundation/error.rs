/// Convenience result type used across lpuvis.
pub type LpuvisResult<T> = Result<T, LpuvisError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant aborts the run. Style attributes a drawable does not support are not errors:
/// they are filtered out by a capability query before anything is applied.
#[derive(thiserror::Error, Debug)]
pub enum LpuvisError {
    /// Ambiguous or invalid source/panel configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No usable video encoder binary was found on the host.
    #[error("encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// Invalid user-provided values (shapes, ranges, sizes).
    #[error("validation error: {0}")]
    Validation(String),

    /// Source data or topology could not be read, or lacks attributes a panel needs.
    #[error("data error: {0}")]
    Data(String),

    /// Errors while rasterizing a frame or streaming it to a sink.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LpuvisError {
    /// Build a [`LpuvisError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`LpuvisError::EncoderUnavailable`] value.
    pub fn encoder_unavailable(msg: impl Into<String>) -> Self {
        Self::EncoderUnavailable(msg.into())
    }

    /// Build a [`LpuvisError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LpuvisError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`LpuvisError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
