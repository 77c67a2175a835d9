//! Media endpoints: photo, audio, document, sticker and video.
//!
//! Local files are uploaded as they are. Remote URLs are downloaded into a
//! staged file first, sniffed, renamed with the matching extension and
//! uploaded; the staged file is removed once the call returns. File ids are
//! sent as a plain parameter without any upload.

use reqwest::multipart::{Form, Part};
use tracing::info;

use tg_core::error::{TgError, TgResult};
use crate::client::ApiClient;
use crate::endpoints::messages::ReplyOptions;
use crate::markup::ReplyMarkup;
use crate::media::{self, InputMedia, MediaKind, StagedUpload};
use crate::types::ChatId;

/// Optional parameters of the media endpoints.
#[derive(Debug, Clone, Default)]
pub struct SendMediaOptions {
    pub caption: Option<String>,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMediaOptions {
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
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

    /// Scalar fields that are set, in wire order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(ref caption) = self.caption {
            fields.push(("caption", caption.clone()));
        }
        if let Some(reply_to) = self.reply_to_message_id {
            fields.push(("reply_to_message_id", reply_to.to_string()));
        }
        if let Some(ref markup) = self.reply_markup {
            fields.push(("reply_markup", markup.to_json()));
        }
        fields
    }
}

impl From<ReplyOptions> for SendMediaOptions {
    fn from(options: ReplyOptions) -> Self {
        Self {
            caption: None,
            reply_to_message_id: options.reply_to_message_id,
            reply_markup: options.reply_markup,
        }
    }
}

/// Multipart payload for one media part.
struct MediaPayload {
    bytes: Vec<u8>,
    file_name: String,
    mime: &'static str,
}

impl MediaPayload {
    fn into_part(self) -> TgResult<Part> {
        let mime = self.mime;
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(mime)
            .map_err(|e| TgError::Internal(format!("invalid mime type {mime}: {e}")))
    }
}

impl ApiClient {
    /// Send a photo.
    pub async fn send_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: impl Into<InputMedia>,
        options: &SendMediaOptions,
    ) -> TgResult<serde_json::Value> {
        self.send_media(MediaKind::Photo, chat_id.into(), photo.into(), options).await
    }

    /// Send an audio file.
    pub async fn send_audio(
        &self,
        chat_id: impl Into<ChatId>,
        audio: impl Into<InputMedia>,
        options: &SendMediaOptions,
    ) -> TgResult<serde_json::Value> {
        self.send_media(MediaKind::Audio, chat_id.into(), audio.into(), options).await
    }

    /// Send a general file. Any content type is accepted.
    pub async fn send_document(
        &self,
        chat_id: impl Into<ChatId>,
        document: impl Into<InputMedia>,
        options: &SendMediaOptions,
    ) -> TgResult<serde_json::Value> {
        self.send_media(MediaKind::Document, chat_id.into(), document.into(), options).await
    }

    /// Send a sticker.
    pub async fn send_sticker(
        &self,
        chat_id: impl Into<ChatId>,
        sticker: impl Into<InputMedia>,
        options: &SendMediaOptions,
    ) -> TgResult<serde_json::Value> {
        self.send_media(MediaKind::Sticker, chat_id.into(), sticker.into(), options).await
    }

    /// Send a video.
    pub async fn send_video(
        &self,
        chat_id: impl Into<ChatId>,
        video: impl Into<InputMedia>,
        options: &SendMediaOptions,
    ) -> TgResult<serde_json::Value> {
        self.send_media(MediaKind::Video, chat_id.into(), video.into(), options).await
    }

    /// Send media of any kind.
    pub async fn send_media(
        &self,
        kind: MediaKind,
        chat_id: ChatId,
        media: InputMedia,
        options: &SendMediaOptions,
    ) -> TgResult<serde_json::Value> {
        match media {
            InputMedia::FileId(file_id) => {
                let mut pairs = vec![
                    ("chat_id", chat_id.to_string()),
                    (kind.field_name(), file_id),
                ];
                pairs.extend(options.fields());
                self.request(kind.method(), &pairs).await
            }
            InputMedia::Path(path) => {
                let bytes = media::read_local(&path).await?;
                let head = &bytes[..bytes.len().min(tg_core::constants::SNIFF_WINDOW)];
                let resolved = media::resolve_type(kind, media::sniff_mime(head))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| kind.field_name().to_string());
                let payload = MediaPayload { bytes, file_name, mime: resolved.mime };
                let form = Self::media_form(kind, &chat_id, payload, options)?;
                self.upload(kind.method(), form).await
            }
            InputMedia::Url(url) => {
                // Dropping `staged` removes the file on every path out of this arm.
                let staged = self.stage_remote(kind, &url).await?;
                let payload = MediaPayload {
                    bytes: tokio::fs::read(staged.upload.path()).await?,
                    file_name: staged.upload.file_name(),
                    mime: staged.mime,
                };
                let form = Self::media_form(kind, &chat_id, payload, options)?;
                let result = self.upload(kind.method(), form).await;
                drop(staged);
                result
            }
        }
    }

    /// Download remote media into a staged file and resolve its type.
    async fn stage_remote(&self, kind: MediaKind, url: &reqwest::Url) -> TgResult<StagedRemote> {
        tokio::fs::create_dir_all(self.upload_dir()).await?;

        let mut upload = StagedUpload::reserve(self.upload_dir());
        let size = self.download_to(url, upload.path()).await?;
        let sniffed = media::sniff_mime(&media::read_head(upload.path()).await?);
        let resolved = media::resolve_type(kind, sniffed)?;
        if let Some(extension) = resolved.extension {
            upload.append_extension(extension).await?;
        }

        info!(
            "staged {kind} upload {} ({size} bytes, {})",
            upload.file_name(),
            resolved.mime
        );

        Ok(StagedRemote {
            upload,
            mime: resolved.mime,
        })
    }

    fn media_form(
        kind: MediaKind,
        chat_id: &ChatId,
        payload: MediaPayload,
        options: &SendMediaOptions,
    ) -> TgResult<Form> {
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part(kind.field_name(), payload.into_part()?);
        for (name, value) in options.fields() {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

struct StagedRemote {
    upload: StagedUpload,
    mime: &'static str,
}
