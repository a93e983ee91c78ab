//! Common error types for Statline

use thiserror::Error;

/// Common result type for Statline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised inside the aggregation core and its configuration layer
///
/// None of these escape the public store/coordinator operations; those
/// reduce every outcome to a `bool` or an `Option`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error (wraps toml::de::Error)
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record could not be mapped into a sample
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected fault while updating or reading aggregate state
    #[error("Internal error: {0}")]
    Internal(String),
}
