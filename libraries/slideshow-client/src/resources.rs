//! Resource endpoints: playlists, images, captions and hiding.

use crate::client::{endpoint, send, text};
use crate::error::{ClientError, Result};
use bytes::Bytes;
use reqwest::Client;
use slideshow_playback::ResourceId;
use tracing::debug;

/// Client for `/api/resources/...`.
pub struct ResourcesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> ResourcesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// This week's resources, in display order.
    pub async fn week(&self) -> Result<Vec<ResourceId>> {
        let url = endpoint(self.base_url, &["api", "resources", "week"])?;
        debug!(url = %url, "Fetching week playlist");

        let response = send(self.http.get(url)).await?;
        let ids: Vec<ResourceId> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse week playlist: {}", e))
        })?;

        debug!(count = ids.len(), "Fetched week playlist");
        Ok(ids)
    }

    /// Number of resources this week.
    pub async fn week_count(&self) -> Result<usize> {
        let url = endpoint(self.base_url, &["api", "resources", "week", "count"])?;
        debug!(url = %url, "Fetching week count");

        let body = text(send(self.http.get(url)).await?).await?;
        body.parse::<usize>().map_err(|e| {
            ClientError::ParseError(format!("Failed to parse week count {:?}: {}", body, e))
        })
    }

    /// Random resources, read as a playlist.
    pub async fn random_list(&self) -> Result<Vec<ResourceId>> {
        let ids = parse_random_body(&self.random_body().await?)?;
        debug!(count = ids.len(), "Fetched random playlist");
        Ok(ids)
    }

    /// One random resource; `None` when the backend has nothing.
    pub async fn random_single(&self) -> Result<Option<ResourceId>> {
        let ids = parse_random_body(&self.random_body().await?)?;
        Ok(ids.into_iter().next())
    }

    async fn random_body(&self) -> Result<String> {
        let url = endpoint(self.base_url, &["api", "resources", "random"])?;
        debug!(url = %url, "Fetching random resources");
        text(send(self.http.get(url)).await?).await
    }

    /// Image for `id`, resized by the backend to `width`×`height`.
    pub async fn image(&self, id: &ResourceId, width: u32, height: u32) -> Result<Bytes> {
        let (w, h) = (width.to_string(), height.to_string());
        let url = endpoint(
            self.base_url,
            &["api", "resources", id.as_str(), w.as_str(), h.as_str()],
        )?;
        debug!(url = %url, resource_id = %id, "Fetching image");

        let bytes = send(self.http.get(url)).await?.bytes().await?;
        debug!(resource_id = %id, size = bytes.len(), "Fetched image");
        Ok(bytes)
    }

    /// Request an image without reading it, so the backend caches the resize.
    pub async fn warm_image(&self, id: &ResourceId, width: u32, height: u32) -> Result<()> {
        let (w, h) = (width.to_string(), height.to_string());
        let url = endpoint(
            self.base_url,
            &["api", "resources", id.as_str(), w.as_str(), h.as_str()],
        )?;
        debug!(url = %url, resource_id = %id, "Preloading image");

        send(self.http.get(url)).await.map(|_| ())
    }

    /// Caption text for `id`.
    pub async fn description(&self, id: &ResourceId) -> Result<String> {
        let url = endpoint(
            self.base_url,
            &["api", "resources", id.as_str(), "description"],
        )?;
        debug!(url = %url, resource_id = %id, "Fetching description");

        Ok(send(self.http.get(url)).await?.text().await?)
    }

    /// Mark `id` as hidden.
    pub async fn hide(&self, id: &ResourceId) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "resources", "hide", id.as_str()])?;
        debug!(url = %url, resource_id = %id, "Hiding resource");

        send(self.http.post(url)).await.map(|_| ())
    }
}

/// Parse the body of `/api/resources/random`.
///
/// The backend may answer a JSON array of ids, a single JSON id, or the bare
/// id as plain text. An empty body or `null` means nothing is available.
pub fn parse_random_body(body: &str) -> Result<Vec<ResourceId>> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| {
                serde_json::from_value::<ResourceId>(item).map_err(|e| {
                    ClientError::ParseError(format!("Invalid resource id in random list: {}", e))
                })
            })
            .collect(),
        Ok(serde_json::Value::Null) => Ok(Vec::new()),
        Ok(serde_json::Value::String(id)) if id.trim().is_empty() => Ok(Vec::new()),
        Ok(serde_json::Value::String(id)) => Ok(vec![ResourceId::new(id)]),
        // Keep the digits as sent, `1e5` must not become `100000.0`
        Ok(serde_json::Value::Number(_)) => Ok(vec![ResourceId::new(body)]),
        Ok(other) => Err(ClientError::ParseError(format!(
            "Unexpected random resource body: {}",
            other
        ))),
        Err(_) => Ok(vec![ResourceId::new(body)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ResourceId> {
        raw.iter().map(|id| ResourceId::new(*id)).collect()
    }

    #[test]
    fn random_body_as_json_array() {
        assert_eq!(
            parse_random_body(r#"["a1", "b2", 17]"#).unwrap(),
            ids(&["a1", "b2", "17"])
        );
        assert!(parse_random_body("[]").unwrap().is_empty());
    }

    #[test]
    fn random_body_as_single_value() {
        assert_eq!(parse_random_body(r#""a1""#).unwrap(), ids(&["a1"]));
        assert_eq!(parse_random_body("4711").unwrap(), ids(&["4711"]));
    }

    #[test]
    fn random_body_as_plain_text() {
        assert_eq!(
            parse_random_body("9f86d081884c7d65\n").unwrap(),
            ids(&["9f86d081884c7d65"])
        );
    }

    #[test]
    fn random_body_empty_means_nothing() {
        assert!(parse_random_body("").unwrap().is_empty());
        assert!(parse_random_body("  \n").unwrap().is_empty());
        assert!(parse_random_body("null").unwrap().is_empty());
        assert!(parse_random_body(r#""""#).unwrap().is_empty());
    }

    #[test]
    fn random_body_object_is_rejected() {
        assert!(matches!(
            parse_random_body(r#"{"id": "a1"}"#),
            Err(ClientError::ParseError(_))
        ));
    }
}
