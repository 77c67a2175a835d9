//! HTTP client for the Telegram Bot API.
//!
//! Every operation funnels into one of two transport primitives: a
//! query-string GET ([`ApiClient::request`]) or a multipart POST
//! ([`ApiClient::upload`]). Both decode the response body as JSON and return
//! it untouched. There is no retry; each call is a single HTTP attempt.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Request, Response, Url};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use tg_core::config::ApiConfig;
use tg_core::constants;
use tg_core::error::{TgError, TgResult};
use tg_core::platform;

/// HTTP client bound to a single bot identity.
///
/// The API key is fixed at construction. Clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL the key is appended to (e.g. "https://api.telegram.org/bot").
    base_url: String,
    /// Bot API key.
    api_key: String,
    /// Timeout for plain requests.
    timeout: Duration,
    /// Timeout for media downloads and multipart uploads.
    upload_timeout: Duration,
    /// Directory where remote media is staged before upload.
    upload_dir: PathBuf,
}

impl ApiClient {
    /// Create a new client for `api_key` using the shared API configuration.
    pub fn new(api_key: impl Into<String>, config: &ApiConfig) -> TgResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TgError::MissingConfig("api_key".into()));
        }

        let timeout = Duration::from_millis(config.timeout_ms);
        let upload_timeout = timeout * constants::UPLOAD_TIMEOUT_MULTIPLIER as u32;

        let inner = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(constants::CONNECT_TIMEOUT_SECS))
            .user_agent(platform::user_agent())
            .build()
            .map_err(|e| TgError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url: config.base_url.clone(),
            api_key,
            timeout,
            upload_timeout,
            upload_dir: config.effective_upload_dir()?,
        })
    }

    /// Override the directory used for staged uploads.
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// The API key this client is bound to.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Directory where remote media is staged.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Full endpoint URL for a remote method: `<base_url><api_key>/<method>`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}{}/{}", self.base_url, self.api_key, method)
    }

    /// Build (without sending) the GET request for `method` with `params` as query string.
    pub fn build_request<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> TgResult<Request> {
        self.inner
            .get(self.method_url(method))
            .query(params)
            .timeout(self.timeout)
            .build()
            .map_err(Self::classify_error)
    }

    // --- Transport primitives ---

    /// Plain request: GET with query-string parameters, decode the JSON body.
    pub async fn request<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: &P,
    ) -> TgResult<serde_json::Value> {
        let request = self.build_request(method, params)?;
        debug!("GET {method}");

        let response = self
            .inner
            .execute(request)
            .await
            .map_err(Self::classify_error)?;

        Self::decode(method, response).await
    }

    /// Multipart upload: POST the form with the extended timeout, decode the JSON body.
    pub async fn upload(&self, method: &str, form: Form) -> TgResult<serde_json::Value> {
        debug!("POST (multipart) {method}");

        let response = self
            .inner
            .post(self.method_url(method))
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(Self::classify_error)?;

        Self::decode(method, response).await
    }

    /// Stream the body of `url` into `dest`. Returns the number of bytes written.
    ///
    /// Non-success statuses are transport failures: there is nothing to upload.
    pub(crate) async fn download_to(&self, url: &Url, dest: &Path) -> TgResult<u64> {
        debug!("downloading media from {}", url.host_str().unwrap_or_default());

        let mut response = self
            .inner
            .get(url.clone())
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(Self::classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TgError::Transport(format!("media download returned {status}")));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| TgError::Transport(format!("download stream error: {e}")))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    // --- Response helpers ---

    /// Decode a response body as JSON regardless of HTTP status.
    ///
    /// The Bot API answers errors with a JSON envelope and a 4xx status, which
    /// is handed back to the caller as-is.
    async fn decode(method: &str, response: Response) -> TgResult<serde_json::Value> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TgError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| TgError::Decode(format!("{method} returned {status} with invalid JSON: {e}")))
    }

    /// Classify a reqwest error into a TgError variant.
    fn classify_error(e: reqwest::Error) -> TgError {
        if e.is_timeout() {
            TgError::Timeout(e.without_url().to_string())
        } else if e.is_builder() {
            TgError::Serialization(e.without_url().to_string())
        } else if e.is_connect() {
            TgError::Transport(format!("connection failed: {}", e.without_url()))
        } else {
            TgError::Transport(e.without_url().to_string())
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_key(&self.api_key))
            .field("timeout", &self.timeout)
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

/// Mask an API key for display, keeping the bot id before the colon.
pub fn mask_key(key: &str) -> String {
    match key.split_once(':') {
        Some((bot_id, secret)) if !secret.is_empty() => format!("{bot_id}:***"),
        _ if key.chars().count() > 4 => format!("{}***", key.chars().take(4).collect::<String>()),
        _ => "***".to_string(),
    }
}
