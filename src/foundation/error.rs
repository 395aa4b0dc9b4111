/// Convenience result alias used across Roundel.
pub type BadgeResult<T> = Result<T, BadgeError>;

/// Error type for configuration, decal loading and surface failures.
#[derive(thiserror::Error, Debug)]
pub enum BadgeError {
    /// Input rejected before rendering started.
    #[error("validation error: {0}")]
    Validation(String),

    /// The decal image for `url` could not be loaded or decoded.
    #[error("decal load failed for '{url}': {cause}")]
    DecalLoad {
        /// Url that was requested from the loader.
        url: String,
        /// Human-readable failure cause.
        cause: String,
    },

    /// The drawing surface could not execute a command.
    #[error("surface error: {0}")]
    Surface(String),

    /// No usable font face could be resolved for text drawing.
    #[error("font error: {0}")]
    Font(String),

    /// The render was cancelled while waiting on the decal.
    #[error("render cancelled")]
    Cancelled,

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeError {
    /// Build a [`BadgeError::Validation`] error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BadgeError::DecalLoad`] error.
    pub fn decal_load(url: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::DecalLoad {
            url: url.into(),
            cause: cause.to_string(),
        }
    }

    /// Build a [`BadgeError::Surface`] error.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`BadgeError::Font`] error.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
