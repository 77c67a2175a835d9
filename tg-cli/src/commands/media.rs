//! Media command - send photos, audio, documents, stickers and videos.

use clap::Args;
use console::style;

use tg_api::{ChatId, InputMedia, MediaKind, SendMediaOptions};
use tg_core::config::AppConfig;
use tg_core::error::TgResult;
use super::markup::MarkupArgs;
use crate::OutputFormat;

#[derive(Args)]
pub struct MediaArgs {
    /// Media kind: photo, audio, document, sticker, video.
    pub kind: MediaKind,
    /// Target chat id or @channel.
    pub chat: String,
    /// Local path or http(s) URL. With --file-id, a Telegram file id.
    pub source: String,
    /// Treat the source as a file id already stored by Telegram.
    #[arg(long)]
    pub file_id: bool,
    /// Caption shown under the media.
    #[arg(long)]
    pub caption: Option<String>,
    /// Reply to this message id.
    #[arg(short, long)]
    pub reply_to: Option<i64>,
    #[command(flatten)]
    pub markup: MarkupArgs,
}

pub async fn run(
    config: &AppConfig,
    bot: Option<&str>,
    args: MediaArgs,
    format: OutputFormat,
) -> TgResult<()> {
    let api = super::create_client(config, bot)?;

    let media = if args.file_id {
        InputMedia::file_id(args.source)
    } else {
        InputMedia::classify(&args.source)
    };
    let options = SendMediaOptions {
        caption: args.caption,
        reply_to_message_id: args.reply_to,
        reply_markup: args.markup.build()?,
    };

    if let OutputFormat::Text = format {
        let origin = match &media {
            InputMedia::Url(url) => format!("downloading {}", url.host_str().unwrap_or_default()),
            InputMedia::Path(path) => format!("uploading {}", path.display()),
            InputMedia::FileId(_) => "resending stored file".to_string(),
        };
        println!("{} {} ({origin})", style("Sending").bold(), args.kind);
    }

    let value = api
        .send_media(args.kind, ChatId::from(args.chat), media, &options)
        .await?;
    super::print_response(value, format)
}
