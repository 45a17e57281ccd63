//! Error types for cave generation and meshing.

use thiserror::Error;

/// Errors that can occur anywhere in the grid → mesh → walls pipeline.
#[derive(Debug, Error)]
pub enum CaveError {
    /// Grid too small to hold a border plus an interior.
    #[error("Invalid dimension: {width}x{height} (both must be at least 2)")]
    InvalidDimension { width: usize, height: usize },

    /// A numeric parameter outside its accepted range.
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Triangle adjacency broke an invariant the triangulator guarantees.
    #[error("Internal inconsistency: {message}")]
    InternalInconsistency { message: String },

    /// Config file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config could not be written back out.
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl CaveError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates an internal inconsistency error.
    pub fn inconsistency(message: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            message: message.into(),
        }
    }
}

pub type CaveResult<T> = Result<T, CaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_parameter() {
        let err = CaveError::invalid_parameter("fill_percent", "must be in 0..=100, got 101");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `fill_percent`: must be in 0..=100, got 101"
        );

        let err = CaveError::InvalidDimension {
            width: 1,
            height: 8,
        };
        assert!(err.to_string().contains("1x8"));
    }
}
