/// Convenience result type used across cardsmith.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the generation and rendering pipelines.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Missing or malformed field in a character row. The row is skipped.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image, font or asset directory could not be loaded.
    #[error("asset missing: {0}")]
    AssetMissing(String),

    /// Reading or writing a sheet, descriptor or output card failed.
    #[error("io failure: {0}")]
    Io(String),

    /// Keyword tables, name pools or other configuration data are unusable.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::AssetMissing`] value.
    pub fn asset_missing(msg: impl Into<String>) -> Self {
        Self::AssetMissing(msg.into())
    }

    /// Build a [`CardError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`CardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error only invalidates the current row, not the batch.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
