/// Convenience result type used across gridclock.
pub type GridClockResult<T> = Result<T, GridClockError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only construction can fail: once a [`crate::ClockFace`] exists, ticking,
/// querying and rendering are total.
#[derive(thiserror::Error, Debug)]
pub enum GridClockError {
    /// Invalid caller-provided data (glyph ids, display values, font data).
    #[error("validation error: {0}")]
    Validation(String),

    /// Grid geometry that cannot host the digit region or exceeds capacity.
    #[error("layout error: {0}")]
    Layout(String),

    /// Configuration that cannot be normalized into usable timing.
    #[error("config error: {0}")]
    Config(String),

    /// Errors raised by a drawing surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridClockError {
    /// Build a [`GridClockError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridClockError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`GridClockError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GridClockError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GridClockError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GridClockError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
