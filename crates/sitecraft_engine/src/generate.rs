use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use sitecraft_logging::site_debug;

use crate::types::GenerateResponse;
use crate::{FailureKind, GenerateError, GenerateRequest};

pub const GENERATE_PATH: &str = "/api/designs/generate";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the request unbounded; the transport default applies.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

impl GenerateSettings {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Issues exactly one request; never retries.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerator {
    settings: GenerateSettings,
    client: reqwest::Client,
}

impl ReqwestGenerator {
    pub fn new(settings: GenerateSettings) -> Result<Self, GenerateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GenerateSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, GenerateError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Generator for ReqwestGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerateError> {
        let url = reqwest::Url::parse(&self.settings.endpoint())
            .map_err(|err| GenerateError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = serde_json::to_vec(request)
            .map_err(|err| GenerateError::new(FailureKind::MalformedBody, err.to_string()))?;

        site_debug!("POST {} prompt_len={}", url, request.prompt.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The error body only supplies the message; an unreadable one falls back.
            let message = self
                .read_body(response)
                .await
                .ok()
                .and_then(|bytes| server_error_message(&bytes))
                .unwrap_or_else(|| format!("Failed to generate design (HTTP {status})"));
            return Err(GenerateError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let bytes = self.read_body(response).await?;

        serde_json::from_slice::<GenerateResponse>(&bytes)
            .map(|parsed| parsed.data.design.html)
            .map_err(|err| {
                GenerateError::new(
                    FailureKind::MalformedBody,
                    format!("Malformed response, expected data.design.html: {err}"),
                )
            })
    }
}

/// Pulls a human-readable reason out of a JSON error body, if there is one.
fn server_error_message(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    ["/message", "/error", "/error/message"]
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> GenerateError {
    GenerateError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
