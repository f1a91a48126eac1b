//! HTTP capability used by the client to reach the Bot API.

use async_trait::async_trait;
use dadabot_core::error::BotError;
use serde::Deserialize;
use serde_json::Value;

/// Form parameters in send order.
pub type Params = Vec<(&'static str, String)>;

/// Raw HTTP answer from the Bot API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as a `{ok, result, description}` envelope.
    pub fn envelope(&self) -> Result<Envelope, BotError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// JSON envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Missing `ok` is treated as success.
    #[serde(default = "default_ok")]
    pub ok: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_ok() -> bool {
    true
}

/// Request/response transport for Bot API methods.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET with `params` as the query string.
    async fn get(&self, method: &str, params: &Params) -> Result<ApiResponse, BotError>;

    /// Issue a POST with `params` as a form-encoded body.
    async fn post(&self, method: &str, params: &Params) -> Result<ApiResponse, BotError>;
}

/// [`Transport`] over `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// `api_base_url` is the scheme and host, e.g. `https://api.telegram.org`.
    pub fn new(api_base_url: &str, api_key: &str) -> Self {
        let base_url = format!("{}/bot{}", api_base_url.trim_end_matches('/'), api_key);
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn read(resp: reqwest::Response, method: &str) -> Result<ApiResponse, BotError> {
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| BotError::Http(format!("telegram {method} read failed: {e}")))?;
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, method: &str, params: &Params) -> Result<ApiResponse, BotError> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| BotError::Http(format!("telegram {method} failed: {e}")))?;
        Self::read(resp, method).await
    }

    async fn post(&self, method: &str, params: &Params) -> Result<ApiResponse, BotError> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .form(params)
            .send()
            .await
            .map_err(|e| BotError::Http(format!("telegram {method} failed: {e}")))?;
        Self::read(resp, method).await
    }
}
