//! tgbot API - HTTP client for the Telegram Bot API.
//!
//! One method per remote endpoint, each funnelling into a query-string GET
//! or a multipart POST. Remote media is staged in a temporary file that is
//! removed after the upload, and the bot credential comes from a
//! [`BotResolver`] over the configured bots.

pub mod client;
pub mod endpoints;
pub mod markup;
pub mod media;
pub mod resolver;
pub mod response;
pub mod types;
pub mod webhook;

// Re-export key types
pub use client::ApiClient;
pub use endpoints::bot::GetUpdatesParams;
pub use endpoints::media::SendMediaOptions;
pub use endpoints::messages::{ReplyOptions, SendMessageOptions};
pub use markup::{ForceReply, ReplyKeyboardHide, ReplyKeyboardMarkup, ReplyMarkup};
pub use media::{InputMedia, MediaKind};
pub use resolver::BotResolver;
pub use response::ApiResponse;
pub use types::{ChatAction, ChatId, ParseMode};
pub use webhook::{decode_update, WebhookServer};
