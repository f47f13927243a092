//! HTTP client for the turntable service.
//!
//! The service exposes two endpoints: `GET /health` and `POST /timeline`.
//! Response bodies are returned as JSON values and never interpreted.

use crate::config::Config;
use crate::timeline::Timeline;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("turntable/", env!("CARGO_PKG_VERSION"));

/// Client for the turntable service.
#[derive(Debug, Clone)]
pub struct TurntableClient {
    http: Client,
    base_url: String,
}

impl TurntableClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RequestError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RequestError::Other(format!("Failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, RequestError> {
        Self::new(
            config.base_url(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<Value, RequestError> {
        let url = format!("{}/health", self.base_url);
        debug!(%url, "probing health");

        let response = self.http.get(&url).send().await?;
        read_response(response).await
    }

    /// Send an arbitrary JSON document to the timeline endpoint.
    pub async fn send_timeline(&self, body: &Value) -> Result<Value, RequestError> {
        let url = format!("{}/timeline", self.base_url);
        info!(%url, "sending timeline");

        let response = self.http.post(&url).json(body).send().await?;
        let result = read_response(response).await;
        match &result {
            Ok(data) => info!(response = %data, "timeline accepted"),
            Err(e) => warn!(error = %e, "timeline rejected"),
        }
        result
    }

    /// Send a preset timeline.
    pub async fn send_preset(&self, timeline: &Timeline) -> Result<Value, RequestError> {
        self.send_timeline(&timeline.to_json()).await
    }
}

async fn read_response(response: Response) -> Result<Value, RequestError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body = decode_body(&bytes);

    if status.is_success() {
        Ok(body.unwrap_or(Value::Null))
    } else {
        Err(RequestError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Decode a response body. Non-JSON text is kept as a string.
fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}

/// Errors from requests to the turntable service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// The service answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// Response body, if the service sent one.
        body: Option<Value>,
    },

    /// The request never produced a response.
    #[error("{message}")]
    Transport { message: String },

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl RequestError {
    /// Whether this error came from the HTTP layer.
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Transport { .. })
    }

    /// Response status code, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body, if the service answered with one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                body: None,
            };
        }
        Self::Transport {
            message: err.to_string(),
        }
    }
}
