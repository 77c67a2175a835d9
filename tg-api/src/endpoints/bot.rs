//! Bot identity, update polling and user profile endpoints.

use serde::Serialize;
use tg_core::error::TgResult;
use crate::client::ApiClient;

/// Query for `getUpdates`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetUpdatesParams {
    /// Identifier of the first update to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum number of updates (1-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Long polling timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Query for `getUserProfilePhotos`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProfilePhotosParams {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `getMe` takes no parameters.
#[derive(Serialize)]
struct NoParams {}

impl ApiClient {
    /// Basic information about the bot. Useful to check the API key.
    pub async fn get_me(&self) -> TgResult<serde_json::Value> {
        self.request("getMe", &NoParams {}).await
    }

    /// Receive incoming updates (a single `getUpdates` call, no polling loop).
    pub async fn get_updates(&self, params: &GetUpdatesParams) -> TgResult<serde_json::Value> {
        self.request("getUpdates", params).await
    }

    /// List profile pictures of a user.
    pub async fn get_user_profile_photos(
        &self,
        user_id: i64,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> TgResult<serde_json::Value> {
        let params = ProfilePhotosParams { user_id, offset, limit };
        self.request("getUserProfilePhotos", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_core::config::ApiConfig;

    fn client() -> ApiClient {
        let config = ApiConfig {
            upload_dir: "/tmp".into(),
            ..ApiConfig::default()
        };
        ApiClient::new("1:K", &config).unwrap()
    }

    #[test]
    fn test_get_updates_empty_query() {
        let request = client().build_request("getUpdates", &GetUpdatesParams::default()).unwrap();
        assert!(request.url().query().is_none() || request.url().query() == Some(""));
    }

    #[test]
    fn test_get_updates_param_order() {
        let params = GetUpdatesParams {
            offset: Some(10),
            limit: Some(5),
            timeout: Some(30),
        };
        let request = client().build_request("getUpdates", &params).unwrap();
        assert_eq!(request.url().query(), Some("offset=10&limit=5&timeout=30"));
    }

    #[test]
    fn test_profile_photos_partial() {
        let params = ProfilePhotosParams { user_id: 99, offset: None, limit: Some(3) };
        let request = client().build_request("getUserProfilePhotos", &params).unwrap();
        assert_eq!(request.url().query(), Some("user_id=99&limit=3"));
    }
}
