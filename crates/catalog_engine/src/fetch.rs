use std::time::Duration;

use catalog_core::Record;
use catalog_logging::{catalog_debug, catalog_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::wire::decode_records;
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://fetch-hiring.s3.amazonaws.com/";
pub const DEFAULT_ENDPOINT: &str = "hiring.json";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "application/json".to_string(),
                "text/json".to_string(),
                "text/plain".to_string(),
                "application/octet-stream".to_string(),
                "binary/octet-stream".to_string(),
            ],
        }
    }
}

impl FetchSettings {
    /// Defaults pointed at another server, e.g. a mock or a mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins `base_url` and `endpoint`, treating the base as a directory.
    pub fn endpoint_url(&self) -> Result<Url, FetchError> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base| base.join(self.endpoint.trim_start_matches('/')))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// Source of raw records. One call is one network request.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    url: Url,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let url = settings.endpoint_url()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            url,
            client,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        catalog_debug!("GET {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let body = self.read_body(response).await?;
        let records = decode_records(&body)?;
        catalog_info!(
            "Fetched {} records ({} bytes) from {}",
            records.len(),
            body.len(),
            self.url
        );
        Ok(records)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
