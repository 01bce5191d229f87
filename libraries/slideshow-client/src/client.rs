//! Main slideshow backend client.

use crate::error::{ClientError, Result};
use crate::resources::ResourcesClient;
use crate::settings::SettingsClient;
use crate::types::ClientConfig;
use crate::weather::WeatherClient;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the slideshow backend.
///
/// Cheap to share: wrap it in an `Arc` and hand it to a playback session as
/// its backend.
///
/// # Example
///
/// ```ignore
/// use slideshow_client::{ClientConfig, SlideshowClient};
///
/// let client = SlideshowClient::new(ClientConfig::new("http://frame.local:8080"))?;
/// let caption = client.resources().description(&"a1b2".into()).await?;
/// ```
pub struct SlideshowClient {
    http: Client,
    base_url: String,
}

impl SlideshowClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("SlideshowKiosk/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        info!(url = %base_url, timeout_secs = config.timeout.as_secs(), "Backend client ready");

        Ok(Self { http, base_url })
    }

    /// The normalized backend URL (no trailing slash).
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Resource endpoints (`/api/resources/...`).
    pub fn resources(&self) -> ResourcesClient<'_> {
        ResourcesClient::new(&self.http, &self.base_url)
    }

    /// Config endpoints (`/api/config/...`).
    pub fn settings(&self) -> SettingsClient<'_> {
        SettingsClient::new(&self.http, &self.base_url)
    }

    /// Weather endpoints (`/api/weather/...`).
    pub fn weather(&self) -> WeatherClient<'_> {
        WeatherClient::new(&self.http, &self.base_url)
    }
}

/// Build an endpoint URL below `base_url`, percent-encoding each segment.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{} cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request and turn transport failures and non-success statuses into
/// errors.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), message = %message, "Backend returned error status");
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

/// Read a plain-text body, trimmed.
pub(crate) async fn text(response: Response) -> Result<String> {
    Ok(response.text().await?.trim().to_string())
}

/// Parse `true`/`false` text as sent by the flag endpoints.
pub(crate) fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().trim_matches('"').to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ClientError::ParseError(format!(
            "expected true or false, got {:?}",
            other
        ))),
    }
}
