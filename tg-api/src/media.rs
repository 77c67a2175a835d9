//! Media references, content sniffing and upload staging.
//!
//! A media value is classified as a remote URL or a local path. Remote media
//! is downloaded into a [`StagedUpload`] whose file is removed when the guard
//! drops, whatever the outcome of the upload.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::Url;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};
use uuid::Uuid;

use tg_core::constants;
use tg_core::error::{TgError, TgResult};

/// The media-sending endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Audio,
    Document,
    Sticker,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Photo,
        MediaKind::Audio,
        MediaKind::Document,
        MediaKind::Sticker,
        MediaKind::Video,
    ];

    /// Remote method name.
    pub fn method(self) -> &'static str {
        match self {
            MediaKind::Photo => "sendPhoto",
            MediaKind::Audio => "sendAudio",
            MediaKind::Document => "sendDocument",
            MediaKind::Sticker => "sendSticker",
            MediaKind::Video => "sendVideo",
        }
    }

    /// Parameter / multipart field carrying the media.
    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
            MediaKind::Sticker => "sticker",
            MediaKind::Video => "video",
        }
    }

    /// Whether the sniffed type must be in the extension table.
    /// Documents accept arbitrary content.
    pub fn requires_known_type(self) -> bool {
        !matches!(self, MediaKind::Document)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for MediaKind {
    type Err = TgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.field_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TgError::Config(format!("unknown media kind {s}")))
    }
}

/// Where the media to send comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMedia {
    /// Remote file, downloaded and re-uploaded.
    Url(Url),
    /// Local file, uploaded directly.
    Path(PathBuf),
    /// File already stored by Telegram, sent by reference.
    FileId(String),
}

impl InputMedia {
    /// Classify a raw media string.
    ///
    /// An existing directory is local; an absolute http(s) URL with a host is
    /// remote; anything else is treated as a local path, which fails with
    /// `LocalMediaNotFound` at send time if nothing is there.
    pub fn classify(source: &str) -> Self {
        let path = Path::new(source);
        if path.is_dir() {
            return InputMedia::Path(path.to_path_buf());
        }
        match parse_remote_url(source) {
            Some(url) => InputMedia::Url(url),
            None => InputMedia::Path(path.to_path_buf()),
        }
    }

    /// Reference a file already stored on Telegram's servers.
    pub fn file_id(id: impl Into<String>) -> Self {
        InputMedia::FileId(id.into())
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, InputMedia::Url(_))
    }
}

impl From<&str> for InputMedia {
    fn from(source: &str) -> Self {
        InputMedia::classify(source)
    }
}

impl From<PathBuf> for InputMedia {
    fn from(path: PathBuf) -> Self {
        InputMedia::Path(path)
    }
}

impl From<Url> for InputMedia {
    fn from(url: Url) -> Self {
        InputMedia::Url(url)
    }
}

fn parse_remote_url(source: &str) -> Option<Url> {
    let url = Url::parse(source.trim()).ok()?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    (matches!(url.scheme(), "http" | "https") && has_host).then_some(url)
}

// --- Content sniffing ---

/// Infer a MIME type from leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    let starts = |magic: &[u8]| bytes.starts_with(magic);

    if starts(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if starts(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if starts(b"GIF87a") || starts(b"GIF89a") {
        Some("image/gif")
    } else if starts(b"RIFF") && bytes.get(8..12) == Some(b"WEBP".as_slice()) {
        Some("image/webp")
    } else if starts(b"II*\0") || starts(b"MM\0*") {
        Some("image/tiff")
    } else if starts(b"BM") && has_dib_header(bytes) {
        Some("image/bmp")
    } else if starts(b"OggS") {
        Some("audio/ogg")
    } else if bytes.get(4..8) == Some(b"ftyp".as_slice()) {
        bytes.get(8..12).and_then(iso_bmff_brand)
    } else if starts(b"%PDF-") {
        Some("application/pdf")
    } else if starts(b"PK\x03\x04") {
        Some("application/zip")
    } else {
        None
    }
}

/// MIME type for the major brand of an ISO-BMFF `ftyp` box.
fn iso_bmff_brand(brand: &[u8]) -> Option<&'static str> {
    match brand {
        b"isom" | b"iso2" | b"mp41" | b"mp42" | b"avc1" | b"dash" | b"M4V " => Some("video/mp4"),
        b"M4A " => Some("audio/mp4"),
        b"avif" | b"avis" => Some("image/avif"),
        b"heic" | b"heix" | b"mif1" => Some("image/heic"),
        b"qt  " => Some("video/quicktime"),
        _ => None,
    }
}

/// BMP files carry a DIB header whose size field (offset 14) is one of the
/// known header versions.
fn has_dib_header(bytes: &[u8]) -> bool {
    bytes
        .get(14..18)
        .and_then(|size| size.try_into().ok())
        .map(u32::from_le_bytes)
        .is_some_and(|size| matches!(size, 12 | 40 | 108 | 124))
}

/// File extension (with dot) for MIME types accepted as photo/audio/sticker/video.
pub fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/bmp" => Some(".bmp"),
        "image/tiff" => Some(".tif"),
        "audio/ogg" => Some(".ogg"),
        "video/mp4" => Some(".mp4"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// Content type resolved for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType {
    pub mime: &'static str,
    pub extension: Option<&'static str>,
}

/// Apply the media kind's type policy to a sniffed MIME type.
pub fn resolve_type(kind: MediaKind, sniffed: Option<&'static str>) -> TgResult<ResolvedType> {
    if let Some((mime, extension)) = sniffed.and_then(|m| extension_for(m).map(|e| (m, e))) {
        return Ok(ResolvedType {
            mime,
            extension: Some(extension),
        });
    }

    if kind.requires_known_type() {
        return Err(TgError::UnsupportedMediaType {
            kind: kind.field_name(),
            mime: sniffed.unwrap_or("unknown").to_string(),
        });
    }

    Ok(ResolvedType {
        mime: sniffed.unwrap_or(constants::OCTET_STREAM),
        extension: None,
    })
}

/// Read up to the sniff window from the start of a file.
pub(crate) async fn read_head(path: &Path) -> TgResult<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(constants::SNIFF_WINDOW);
    file.take(constants::SNIFF_WINDOW as u64)
        .read_to_end(&mut head)
        .await?;
    Ok(head)
}

/// Read a local media file, mapping a missing file to `LocalMediaNotFound`.
pub(crate) async fn read_local(path: &Path) -> TgResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TgError::LocalMediaNotFound(path.to_path_buf()),
        _ => TgError::Io(e),
    })
}

// --- Staging ---

/// Temporary file holding downloaded media. Deleted on drop.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    /// Reserve a uniquely named file in `dir`. Nothing is created yet.
    pub(crate) fn reserve(dir: &Path) -> Self {
        let name = format!("{}{}", constants::UPLOAD_FILE_PREFIX, Uuid::new_v4().simple());
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used for the multipart part.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string())
    }

    /// Rename the staged file so its name ends with `extension`.
    pub(crate) async fn append_extension(&mut self, extension: &str) -> TgResult<()> {
        let mut renamed = self.path.clone().into_os_string();
        renamed.push(extension);
        let renamed = PathBuf::from(renamed);
        tokio::fs::rename(&self.path, &renamed).await?;
        self.path = renamed;
        Ok(())
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("removed staged upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove staged upload {}: {e}", self.path.display()),
        }
    }
}
