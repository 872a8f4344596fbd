/// Convenience result type used across Montage.
pub type MontageResult<T> = Result<T, MontageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is recoverable from the compositor's point of view: the host
/// surfaces the message and the scene model is left in its pre-operation
/// state.
#[derive(thiserror::Error, Debug)]
pub enum MontageError {
    /// Invalid user-provided or model data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image blob could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The automated-placement collaborator violated its contract.
    #[error("placement error: {0}")]
    Placement(String),

    /// Errors while rasterizing or encoding output frames.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MontageError {
    /// Build a [`MontageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MontageError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MontageError::Placement`] value.
    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    /// Build a [`MontageError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
