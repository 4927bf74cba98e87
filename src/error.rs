//! Error types and handling for vn-address-rs.
//!
//! Normalization itself never fails: unresolved fields degrade to empty
//! strings. These errors cover the surrounding operations (configuration,
//! the distance collaborator, record validation and payload decoding).

/// Result type alias for vn-address-rs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for vn-address-rs operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Distance service failure or malformed distance response
    #[error("Distance error: {message}")]
    Distance {
        /// Error message
        message: String,
    },

    /// Address record failed a save rule
    #[error("Validation error: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// I/O errors
    #[error("I/O error: {source}")]
    Io {
        /// Source error
        #[from]
        source: std::io::Error,
    },

    /// Geocoder payload could not be decoded
    #[cfg(feature = "serde")]
    #[error("JSON error: {source}")]
    Json {
        /// Source error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration file could not be decoded
    #[cfg(feature = "serde")]
    #[error("TOML error: {source}")]
    Toml {
        /// Source error
        #[from]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new distance error
    pub fn distance_error(message: impl Into<String>) -> Self {
        Self::Distance {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
