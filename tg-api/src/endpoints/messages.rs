//! Message endpoints: text, forwarding, location and chat actions.

use serde::Serialize;
use tg_core::error::TgResult;
use crate::client::ApiClient;
use crate::markup::{self, ReplyMarkup};
use crate::types::{ChatAction, ChatId, ParseMode};

/// Optional parameters of `sendMessage`. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct SendMessageOptions {
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<ReplyMarkup>,
}

/// Optional parameters shared by `sendLocation` and the media endpoints.
#[derive(Debug, Clone, Default)]
pub struct ReplyOptions {
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<ReplyMarkup>,
}

#[derive(Serialize)]
struct SendMessageParams<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "markup::as_json_text")]
    reply_markup: Option<&'a ReplyMarkup>,
}

#[derive(Serialize)]
struct ForwardMessageParams<'a> {
    chat_id: &'a ChatId,
    from_chat_id: &'a ChatId,
    message_id: i64,
}

#[derive(Serialize)]
struct SendLocationParams<'a> {
    chat_id: &'a ChatId,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "markup::as_json_text")]
    reply_markup: Option<&'a ReplyMarkup>,
}

#[derive(Serialize)]
struct SendChatActionParams<'a> {
    chat_id: &'a ChatId,
    action: ChatAction,
}

impl SendMessageOptions {
    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }
}

impl ReplyOptions {
    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }
}

impl ApiClient {
    /// Send a text message.
    pub async fn send_message(
        &self,
        chat_id: impl Into<ChatId>,
        text: &str,
        options: &SendMessageOptions,
    ) -> TgResult<serde_json::Value> {
        let chat_id = chat_id.into();
        let params = SendMessageParams {
            chat_id: &chat_id,
            text,
            parse_mode: options.parse_mode,
            disable_web_page_preview: options.disable_web_page_preview,
            disable_notification: options.disable_notification,
            reply_to_message_id: options.reply_to_message_id,
            reply_markup: options.reply_markup.as_ref(),
        };
        self.request("sendMessage", &params).await
    }

    /// Forward a message of any kind.
    pub async fn forward_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> TgResult<serde_json::Value> {
        let chat_id = chat_id.into();
        let from_chat_id = from_chat_id.into();
        let params = ForwardMessageParams {
            chat_id: &chat_id,
            from_chat_id: &from_chat_id,
            message_id,
        };
        self.request("forwardMessage", &params).await
    }

    /// Send a point on the map.
    pub async fn send_location(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        options: &ReplyOptions,
    ) -> TgResult<serde_json::Value> {
        let chat_id = chat_id.into();
        let params = SendLocationParams {
            chat_id: &chat_id,
            latitude,
            longitude,
            reply_to_message_id: options.reply_to_message_id,
            reply_markup: options.reply_markup.as_ref(),
        };
        self.request("sendLocation", &params).await
    }

    /// Tell the user something is happening on the bot's side.
    pub async fn send_chat_action(
        &self,
        chat_id: impl Into<ChatId>,
        action: ChatAction,
    ) -> TgResult<serde_json::Value> {
        let chat_id = chat_id.into();
        self.request("sendChatAction", &SendChatActionParams { chat_id: &chat_id, action })
            .await
    }
}
