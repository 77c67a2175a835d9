//! Message commands: send, forward, location, action.

use clap::Args;

use tg_api::{ChatAction, ChatId, ParseMode, ReplyOptions, SendMessageOptions};
use tg_core::config::AppConfig;
use tg_core::error::{TgError, TgResult};
use super::markup::MarkupArgs;
use crate::OutputFormat;

#[derive(Args)]
pub struct SendArgs {
    /// Target chat id or @channel.
    pub chat: String,
    /// Message text.
    pub text: String,
    /// Parse mode (Markdown, MarkdownV2, HTML).
    #[arg(short, long)]
    pub parse_mode: Option<String>,
    /// Disable link previews.
    #[arg(long)]
    pub no_preview: bool,
    /// Send silently.
    #[arg(long)]
    pub silent: bool,
    /// Reply to this message id.
    #[arg(short, long)]
    pub reply_to: Option<i64>,
    #[command(flatten)]
    pub markup: MarkupArgs,
}

#[derive(Args)]
pub struct LocationArgs {
    /// Target chat id or @channel.
    pub chat: String,
    #[arg(allow_hyphen_values = true)]
    pub latitude: f64,
    #[arg(allow_hyphen_values = true)]
    pub longitude: f64,
    /// Reply to this message id.
    #[arg(short, long)]
    pub reply_to: Option<i64>,
    #[command(flatten)]
    pub markup: MarkupArgs,
}

pub async fn send(
    config: &AppConfig,
    bot: Option<&str>,
    args: SendArgs,
    format: OutputFormat,
) -> TgResult<()> {
    let api = super::create_client(config, bot)?;

    let parse_mode = args
        .parse_mode
        .as_deref()
        .map(str::parse::<ParseMode>)
        .transpose()?;
    let options = SendMessageOptions {
        parse_mode,
        disable_web_page_preview: args.no_preview.then_some(true),
        disable_notification: args.silent.then_some(true),
        reply_to_message_id: args.reply_to,
        reply_markup: args.markup.build()?,
    };

    let value = api.send_message(ChatId::from(args.chat), &args.text, &options).await?;
    super::print_response(value, format)
}

pub async fn forward(
    config: &AppConfig,
    bot: Option<&str>,
    chat: String,
    from_chat: String,
    message_id: i64,
    format: OutputFormat,
) -> TgResult<()> {
    let api = super::create_client(config, bot)?;
    let value = api
        .forward_message(ChatId::from(chat), ChatId::from(from_chat), message_id)
        .await?;
    super::print_response(value, format)
}

pub async fn location(
    config: &AppConfig,
    bot: Option<&str>,
    args: LocationArgs,
    format: OutputFormat,
) -> TgResult<()> {
    if !(-90.0..=90.0).contains(&args.latitude) || !(-180.0..=180.0).contains(&args.longitude) {
        return Err(TgError::Config(format!(
            "coordinates out of range: {}, {}",
            args.latitude, args.longitude
        )));
    }

    let api = super::create_client(config, bot)?;
    let options = ReplyOptions {
        reply_to_message_id: args.reply_to,
        reply_markup: args.markup.build()?,
    };
    let value = api
        .send_location(ChatId::from(args.chat), args.latitude, args.longitude, &options)
        .await?;
    super::print_response(value, format)
}

pub async fn action(
    config: &AppConfig,
    bot: Option<&str>,
    chat: String,
    action: &str,
    format: OutputFormat,
) -> TgResult<()> {
    let action: ChatAction = action.parse()?;
    let api = super::create_client(config, bot)?;
    let value = api.send_chat_action(ChatId::from(chat), action).await?;
    super::print_response(value, format)
}
