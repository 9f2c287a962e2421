//! HTTP client for the album metadata API
//!
//! Fetches `albums/{id}` from the configured base URL with bearer-token
//! auth and a market query parameter. Lookups are single-shot: no retries
//! and no caching here; the review service decides what a failure means
//! for the surrounding response.

use async_trait::async_trait;
use revue_core::{AlbumConfig, AlbumInfo, AlbumInfoGateway, Result, RevueError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct AlbumResponse {
    id: String,
    name: String,
    release_date: String,
    total_tracks: u32,
    #[serde(default)]
    artists: Vec<ArtistRef>,
    #[serde(default)]
    images: Vec<ImageRef>,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ImageRef {
    url: String,
}

impl From<AlbumResponse> for AlbumInfo {
    fn from(body: AlbumResponse) -> Self {
        AlbumInfo {
            id: body.id,
            name: body.name,
            artists: body.artists.into_iter().map(|a| a.name).collect(),
            release_date: body.release_date,
            total_tracks: body.total_tracks,
            image_url: body.images.into_iter().next().map(|i| i.url),
        }
    }
}

/// Album gateway over the remote metadata API
pub struct HttpAlbumGateway {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    market: String,
}

impl HttpAlbumGateway {
    pub fn from_config(config: &AlbumConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RevueError::AlbumGateway(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            market: config.market.clone(),
        })
    }
}

#[async_trait]
impl AlbumInfoGateway for HttpAlbumGateway {
    async fn album_info(&self, album_id: &str) -> Result<AlbumInfo> {
        let url = format!(
            "{}/albums/{}?market={}",
            self.base_url, album_id, self.market
        );

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RevueError::AlbumGateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RevueError::AlbumGateway(format!(
                "lookup for {album_id} returned {}",
                response.status()
            )));
        }

        let body: AlbumResponse = response
            .json()
            .await
            .map_err(|e| RevueError::AlbumGateway(e.to_string()))?;

        Ok(AlbumInfo::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_mapping() {
        let json = r#"{
            "id": "album-1",
            "name": "Kind of Blue",
            "release_date": "1959-08-17",
            "total_tracks": 5,
            "artists": [{"name": "Miles Davis"}],
            "images": [{"url": "https://img.example/cover.jpg"}]
        }"#;

        let body: AlbumResponse = serde_json::from_str(json).unwrap();
        let info = AlbumInfo::from(body);

        assert_eq!(info.name, "Kind of Blue");
        assert_eq!(info.artists, vec!["Miles Davis"]);
        assert_eq!(info.image_url.as_deref(), Some("https://img.example/cover.jpg"));
    }

    #[test]
    fn test_response_mapping_tolerates_missing_lists() {
        let json = r#"{
            "id": "album-2",
            "name": "Untitled",
            "release_date": "2020-01-01",
            "total_tracks": 1
        }"#;

        let body: AlbumResponse = serde_json::from_str(json).unwrap();
        let info = AlbumInfo::from(body);

        assert!(info.artists.is_empty());
        assert!(info.image_url.is_none());
    }
}
