//! Bot API response envelope.
//!
//! Operations return the decoded body untouched. Callers that want to tell
//! `ok: false` answers apart can lift the value into [`ApiResponse`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tg_core::error::{TgError, TgResult};

/// Standard Bot API response envelope.
///
/// ```json
/// { "ok": true, "result": { ... } }
/// { "ok": false, "error_code": 400, "description": "Bad Request: chat not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Result payload (type varies by method).
    pub result: Option<T>,
    /// Human-readable error description.
    #[serde(default)]
    pub description: Option<String>,
    /// Error code, mirrors the HTTP status.
    #[serde(default)]
    pub error_code: Option<i32>,
    /// Extra hints for failed requests.
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

/// Hints attached to some failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group was migrated to a supergroup with this id.
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating the request.
    pub retry_after: Option<u32>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Interpret a decoded body as an envelope.
    pub fn from_value(value: serde_json::Value) -> TgResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| TgError::Decode(format!("not a Bot API envelope: {e}")))
    }
}

impl<T> ApiResponse<T> {
    /// Whether the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Get the error message if this is an error response.
    pub fn error_message(&self) -> Option<String> {
        if self.ok {
            return None;
        }
        let description = self.description.as_deref().unwrap_or("unknown error");
        Some(match self.error_code {
            Some(code) => format!("{code}: {description}"),
            None => description.to_string(),
        })
    }
}
