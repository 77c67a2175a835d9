//! tgbot core - configuration, error handling, logging and platform helpers.
//!
//! This crate provides the shared foundation used by the other tgbot crates:
//! - Application configuration (API base, timeouts, configured bots)
//! - The unified error type
//! - Structured logging with tracing
//! - Per-user directories, the User-Agent and common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::{ApiConfig, AppConfig, BotEntry};
pub use error::{TgError, TgResult};
pub use logging::init_logging;
pub use platform::AppDir;
