//! Reply markup builders.
//!
//! Pure data shaping: these types only produce the JSON the Bot API expects
//! in the `reply_markup` parameter. No I/O happens here.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

/// Custom keyboard with reply options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    /// Rows of button labels.
    pub keyboard: Vec<Vec<String>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
    pub selective: bool,
}

/// Hide the current custom keyboard and show the default letter keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ReplyKeyboardHide {
    pub selective: bool,
}

/// Show a reply interface as if the user tapped "Reply" on the bot's message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ForceReply {
    pub selective: bool,
}

/// Any markup accepted in `reply_markup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Hide(ReplyKeyboardHide),
    ForceReply(ForceReply),
}

impl ReplyKeyboardMarkup {
    pub fn new(keyboard: Vec<Vec<String>>) -> Self {
        Self {
            keyboard,
            ..Self::default()
        }
    }

    pub fn resize(mut self, resize: bool) -> Self {
        self.resize_keyboard = resize;
        self
    }

    pub fn one_time(mut self, one_time: bool) -> Self {
        self.one_time_keyboard = one_time;
        self
    }

    pub fn selective(mut self, selective: bool) -> Self {
        self.selective = selective;
        self
    }
}

impl ReplyKeyboardHide {
    pub fn new(selective: bool) -> Self {
        Self { selective }
    }
}

impl ForceReply {
    pub fn new(selective: bool) -> Self {
        Self { selective }
    }
}

impl Serialize for ReplyKeyboardHide {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ReplyKeyboardHide", 2)?;
        state.serialize_field("hide_keyboard", &true)?;
        state.serialize_field("selective", &self.selective)?;
        state.end()
    }
}

impl Serialize for ForceReply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ForceReply", 2)?;
        state.serialize_field("force_reply", &true)?;
        state.serialize_field("selective", &self.selective)?;
        state.end()
    }
}

impl Serialize for ReplyMarkup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReplyMarkup::Keyboard(markup) => markup.serialize(serializer),
            ReplyMarkup::Hide(markup) => markup.serialize(serializer),
            ReplyMarkup::ForceReply(markup) => markup.serialize(serializer),
        }
    }
}

impl ReplyMarkup {
    /// JSON text for the `reply_markup` parameter.
    pub fn to_json(&self) -> String {
        // Plain structs of bools and strings always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(markup: ReplyKeyboardMarkup) -> Self {
        ReplyMarkup::Keyboard(markup)
    }
}

impl From<ReplyKeyboardHide> for ReplyMarkup {
    fn from(markup: ReplyKeyboardHide) -> Self {
        ReplyMarkup::Hide(markup)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(markup: ForceReply) -> Self {
        ReplyMarkup::ForceReply(markup)
    }
}

/// Serialize an optional value as its JSON text, for query and form fields.
pub(crate) fn as_json_text<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => {
            let text = serde_json::to_string(inner).map_err(S::Error::custom)?;
            serializer.serialize_str(&text)
        }
        None => serializer.serialize_none(),
    }
}
