/// Convenience result type used across the compositor.
pub type CountryballResult<T> = Result<T, CountryballError>;

/// Top-level error taxonomy used by compositor and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum CountryballError {
    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A single asset could not be loaded or decoded. Callers treat the layer as absent.
    #[error("asset error: '{path}': {reason}")]
    Asset {
        /// Relative path of the asset that failed.
        path: String,
        /// Human readable failure reason.
        reason: String,
    },

    /// The asset source as a whole is unreachable.
    #[error("connectivity lost: {0}")]
    Connectivity(String),

    /// Errors while compiling or executing a render plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CountryballError {
    /// Build a [`CountryballError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CountryballError::Asset`] value.
    pub fn asset(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Asset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`CountryballError::Connectivity`] value.
    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::Connectivity(msg.into())
    }

    /// Build a [`CountryballError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CountryballError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error should raise the persistent connectivity notice.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
