//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "tgbot";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Bot API base. The API key and method name are appended directly.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org/bot";

/// Default request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Timeout multiplier applied to media downloads and multipart uploads.
pub const UPLOAD_TIMEOUT_MULTIPLIER: u64 = 10;

/// TCP connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 15;

/// Number of leading bytes inspected when sniffing a media type.
pub const SNIFF_WINDOW: usize = 512;

/// Largest webhook request body accepted by the listener.
pub const MAX_WEBHOOK_BODY_BYTES: usize = 1024 * 1024;

/// Prefix of staged upload file names.
pub const UPLOAD_FILE_PREFIX: &str = "upload-";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the rolling log file.
pub const LOG_FILE_NAME: &str = "tgbot.log";

/// Fallback MIME type for payloads the sniffer does not recognize.
pub const OCTET_STREAM: &str = "application/octet-stream";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_ends_with_bot_prefix() {
        assert!(DEFAULT_API_BASE.ends_with("/bot"));
    }

    #[test]
    fn test_upload_timeout_is_longer() {
        assert!(UPLOAD_TIMEOUT_MULTIPLIER > 1);
    }
}
