use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::types::PollCursor;

pub const CURSOR_PARAM: &str = "from_date";

/// Issues the timed `GET` against the status endpoint.
///
/// One request per call; retrying is the scheduler's business.
pub struct StatusFetcher {
    client: reqwest::Client,
    endpoint: String,
    authorization: String,
}

impl StatusFetcher {
    pub fn new(config: &WatchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WatchError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.api_token),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the entries updated since `cursor` as raw JSON.
    ///
    /// Network failures (including the timeout) become
    /// [`WatchError::Transport`]; any status other than 200 becomes
    /// [`WatchError::Server`]; a body that is not JSON at all is a
    /// [`WatchError::Schema`].
    pub async fn fetch(&self, cursor: PollCursor) -> Result<Value> {
        tracing::debug!(cursor = cursor.value(), endpoint = %self.endpoint, "polling status endpoint");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .query(&[(CURSOR_PARAM, cursor.value())])
            .send()
            .await
            .map_err(|source| self.transport(source))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WatchError::Server {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| self.transport(source))?;
        serde_json::from_slice(&body)
            .map_err(|e| WatchError::Schema(format!("response is not valid JSON: {e}")))
    }

    fn transport(&self, source: reqwest::Error) -> WatchError {
        WatchError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}
