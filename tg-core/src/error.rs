//! Error types shared by every tgbot crate.
//!
//! All failure categories are unified into a single `TgError` enum with
//! conversions from the underlying library errors.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience type alias for Results using TgError.
pub type TgResult<T> = Result<T, TgError>;

/// Unified error type for configuration, transport, decoding and media handling.
#[derive(Error, Debug)]
pub enum TgError {
    // -- Configuration errors --
    /// Failed to load, parse or validate configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    /// The requested bot name is not present in the configured bots.
    #[error("bot {0} not found")]
    CredentialNotFound(String),

    // -- Network errors --
    /// The remote endpoint could not be reached or the request failed mid-flight.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The response body is not valid JSON.
    #[error("decode error: {0}")]
    Decode(String),

    // -- Media errors --
    /// The sniffed content type is not accepted for this kind of media.
    #[error("unsupported media type {mime} for {kind}")]
    UnsupportedMediaType {
        /// Media kind, e.g. "photo".
        kind: &'static str,
        /// The sniffed MIME type, or "unknown".
        mime: String,
    },

    /// A local media path does not exist when read.
    #[error("local media not found: {}", .0.display())]
    LocalMediaNotFound(PathBuf),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of outgoing data failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for TgError {
    fn from(e: serde_json::Error) -> Self {
        TgError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for TgError {
    fn from(e: toml::de::Error) -> Self {
        TgError::Config(e.to_string())
    }
}

impl TgError {
    /// Whether the error came from the network layer rather than local input.
    pub fn is_transport(&self) -> bool {
        matches!(self, TgError::Transport(_) | TgError::Timeout(_))
    }
}
