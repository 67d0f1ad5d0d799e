//! Error types for gnbsim

use thiserror::Error;

use crate::bcd::BcdError;

/// Error types shared by the gnbsim crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A digit string does not fit the identity field it is destined for.
    #[error("Invalid {field}: {reason}")]
    InvalidDigits {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Key material that is not valid hex.
    #[error("Invalid hex in {field}: {source}")]
    InvalidHex {
        /// Name of the offending field
        field: &'static str,
        /// Underlying decoder error
        #[source]
        source: hex::FromHexError,
    },

    /// Key material of the wrong size.
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    KeyLength {
        /// Name of the offending field
        field: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Decoded length in bytes
        actual: usize,
    },

    /// BCD packing errors.
    #[error("BCD error: {0}")]
    Bcd(#[from] BcdError),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing errors.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
