//! Parameter types shared by several endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tg_core::error::TgError;

/// Target chat: a numeric id or a channel username (`@channelusername`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| ChatId::Username(value.to_string()))
    }
}

impl From<String> for ChatId {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(ChatId::Username(value))
    }
}

impl FromStr for ChatId {
    type Err = std::num::ParseIntError;

    /// Parses numeric ids only; use `From<&str>` to accept usernames as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(ChatId::Id)
    }
}

/// Text formatting mode for `sendMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::MarkdownV2 => "MarkdownV2",
            ParseMode::Html => "HTML",
        }
    }
}

impl FromStr for ParseMode {
    type Err = TgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" => Ok(ParseMode::Markdown),
            "markdownv2" => Ok(ParseMode::MarkdownV2),
            "html" => Ok(ParseMode::Html),
            other => Err(TgError::Config(format!(
                "invalid parse mode {other}, accepted: Markdown, MarkdownV2, HTML"
            ))),
        }
    }
}

/// Status shown to the chat partner while the bot prepares a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
}

impl ChatAction {
    pub const ALL: [ChatAction; 8] = [
        ChatAction::Typing,
        ChatAction::UploadPhoto,
        ChatAction::RecordVideo,
        ChatAction::UploadVideo,
        ChatAction::RecordAudio,
        ChatAction::UploadAudio,
        ChatAction::UploadDocument,
        ChatAction::FindLocation,
    ];

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatAction::Typing => "typing",
            ChatAction::UploadPhoto => "upload_photo",
            ChatAction::RecordVideo => "record_video",
            ChatAction::UploadVideo => "upload_video",
            ChatAction::RecordAudio => "record_audio",
            ChatAction::UploadAudio => "upload_audio",
            ChatAction::UploadDocument => "upload_document",
            ChatAction::FindLocation => "find_location",
        }
    }
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatAction {
    type Err = TgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatAction::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                let accepted: Vec<&str> = ChatAction::ALL.iter().map(|a| a.as_str()).collect();
                TgError::Config(format!(
                    "invalid chat action {s}, accepted: {}",
                    accepted.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_from_str() {
        assert_eq!(ChatId::from("-100123"), ChatId::Id(-100123));
        assert_eq!(ChatId::from("@news"), ChatId::Username("@news".into()));
        assert_eq!(ChatId::from("42".to_string()).to_string(), "42");
    }

    #[test]
    fn test_chat_id_owned_and_borrowed_agree() {
        for raw in [" 42", "42 ", "-100123", "@news", "12ab"] {
            assert_eq!(ChatId::from(raw), ChatId::from(raw.to_string()), "{raw:?}");
        }
        assert_eq!(ChatId::from(" 42".to_string()), ChatId::Id(42));
    }

    #[test]
    fn test_chat_id_serializes_untagged() {
        assert_eq!(serde_json::to_value(ChatId::Id(5)).unwrap(), serde_json::json!(5));
        assert_eq!(
            serde_json::to_value(ChatId::from("@news")).unwrap(),
            serde_json::json!("@news")
        );
    }

    #[test]
    fn test_parse_mode_wire_names() {
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), "HTML");
        assert_eq!("markdown".parse::<ParseMode>().unwrap(), ParseMode::Markdown);
        assert!("bbcode".parse::<ParseMode>().is_err());
    }

    #[test]
    fn test_chat_action_roundtrip_names() {
        for action in ChatAction::ALL {
            let wire = serde_json::to_value(action).unwrap();
            assert_eq!(wire, action.as_str());
            assert_eq!(action.as_str().parse::<ChatAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_chat_action_rejects_unknown() {
        let err = "dancing".parse::<ChatAction>().unwrap_err();
        assert!(err.to_string().contains("typing, upload_photo"));
    }
}
