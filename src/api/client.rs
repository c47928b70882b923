use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, ToolError};

/// Base URL of the public (API-key) endpoint family.
pub const PUBLIC_API_BASE: &str = "https://public-api.eu.bluedolphin.app/v1";
/// Base URL of the presentation (bearer-token) endpoint family used by the
/// web application.
pub const UI_API_BASE: &str = "https://bd-presentation-api.eu.bd-cloud.app/api";

/// Batch size used for paginated listings.
pub(crate) const BATCH_SIZE: usize = 50;

/// Pause inserted before every request to stay under the service rate limit
/// (HTTP 429).
const CALL_SPACING: Duration = Duration::from_millis(500);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and tenant context for both endpoint families.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub ui_access_token: String,
    pub tenant: String,
    pub workspace_id: String,
    pub b2c_authorization: Option<String>,
}

/// Blocking HTTP client for the catalogue service. All calls are spaced by
/// a fixed delay; pagination is driven by the per-resource modules.
pub struct ApiClient {
    http: Client,
    credentials: Credentials,
}

/// Response envelope wrapping every presentation-API payload.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct UiEnvelope<T> {
    pub(crate) data: T,
}

impl ApiClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, credentials })
    }

    pub fn workspace_id(&self) -> &str {
        &self.credentials.workspace_id
    }

    fn throttle(&self) {
        thread::sleep(CALL_SPACING);
    }

    fn public_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("x-api-key", &self.credentials.api_key)
            .header("tenant", &self.credentials.tenant)
    }

    fn ui_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .bearer_auth(&self.credentials.ui_access_token)
            .header("tenant", &self.credentials.tenant);
        match &self.credentials.b2c_authorization {
            Some(token) => request.header("b2cauthorization", token),
            None => request,
        }
    }

    /// GET against the public endpoint family.
    pub(crate) fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.throttle();
        let request = self
            .public_headers(self.http.get(format!("{PUBLIC_API_BASE}{path}")))
            .query(query);
        decode(path, request.send()?)
    }

    /// GET against the presentation endpoint family.
    pub(crate) fn get_ui<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.throttle();
        let request = self
            .ui_headers(self.http.get(format!("{UI_API_BASE}{path}")))
            .query(query);
        decode(path, request.send()?)
    }

    /// POST against the public endpoint family, discarding the body.
    pub(crate) fn post_public(&self, path: &str, body: &impl Serialize) -> Result<()> {
        self.throttle();
        let response = self
            .public_headers(self.http.post(format!("{PUBLIC_API_BASE}{path}")))
            .json(body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Api {
                path: path.to_string(),
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(ToolError::Api {
            path: path.to_string(),
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Fetches offset-paginated batches until a batch shorter than the batch
/// size signals the end of the listing.
pub(crate) fn fetch_offset_paged<T>(
    mut fetch_batch: impl FnMut(usize, usize) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let mut all = Vec::new();
    let mut start = 0;
    loop {
        let batch = fetch_batch(BATCH_SIZE, start)?;
        let batch_len = batch.len();
        all.extend(batch);
        if batch_len < BATCH_SIZE {
            break;
        }
        start += batch_len;
    }
    Ok(all)
}
