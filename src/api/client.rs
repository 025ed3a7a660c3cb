//! Snap Map web API HTTP client.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{header, redirect, Client, Response};
use serde_json::{json, Value};

use crate::api::types::{PlaylistQuery, StoryElementsRequest, TileSetResponse};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Playlist endpoint path.
const PLAYLIST_PATH: &str = "/web/getPlaylist";

/// Tile set (epoch) endpoint path.
const TILE_SET_PATH: &str = "/web/getLatestTileSet";

/// Story elements (detail) endpoint path.
const STORY_ELEMENTS_PATH: &str = "/web/getStoryElements";

/// Origin the map web app sends its requests from.
const MAP_ORIGIN: &str = "https://map.snapchat.com";

/// Snap Map API client.
///
/// Holds three HTTP clients. API calls are bounded by a total timeout, media
/// downloads only by connect and idle-read timeouts, and short link expansion
/// runs with redirects disabled.
pub struct SnapApi {
    client: Client,
    media_client: Client,
    expansion_client: Client,
    base_url: String,
    short_link_hosts: Vec<String>,
}

impl SnapApi {
    /// Create a new API client.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(api_headers())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        // Media bodies can take far longer than `timeout` to arrive, so only
        // stalls are bounded here.
        let media_client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let expansion_client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(expansion_headers())
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            media_client,
            expansion_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            short_link_hosts: config.short_link_hosts.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check whether a URL points at a short link host.
    pub fn is_short_link(&self, url: &str) -> bool {
        let Ok(parsed) = url::Url::parse(url) else {
            return false;
        };

        parsed
            .host_str()
            .map(|host| {
                self.short_link_hosts
                    .iter()
                    .any(|h| host.eq_ignore_ascii_case(h))
            })
            .unwrap_or(false)
    }

    /// Request a short link without following it and return its `Location`.
    pub async fn expand_short_link(&self, url: &str) -> Result<Option<String>> {
        tracing::debug!("GET {} (redirects disabled)", url);

        let response = self.expansion_client.get(url).send().await?;
        tracing::debug!("Response status: {}", response.status());

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(location)
    }

    /// Get the current tile set epoch.
    pub async fn get_latest_epoch(&self) -> Result<i64> {
        tracing::info!("Attempting to retrieve epoch");

        let url = self.endpoint(TILE_SET_PATH);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(&json!({})).send().await?;
        let response = check_status(response, "tile set")?;
        let text = response.text().await?;

        let tile_sets: TileSetResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse tile set: {} - Response: {}",
                e,
                truncate(&text)
            ))
        })?;

        let epoch = tile_sets
            .epoch()
            .ok_or_else(|| Error::Api("Tile set response has no epoch".into()))?;

        tracing::info!("Successfully obtained epoch: {}", epoch);
        Ok(epoch)
    }

    /// Get the playlist around a point.
    ///
    /// Fetches a fresh epoch first unless one is supplied.
    pub async fn get_playlist(&self, query: &PlaylistQuery, epoch: Option<i64>) -> Result<Value> {
        let epoch = match epoch {
            Some(epoch) => {
                tracing::info!("Overriding default epoch obtainment, using {}", epoch);
                epoch
            }
            None => self.get_latest_epoch().await?,
        };

        tracing::info!("Fetching Snap Map playlist...");

        let url = self.endpoint(PLAYLIST_PATH);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&query.to_request(epoch))
            .send()
            .await?;
        let response = check_status(response, "playlist")?;
        let text = response.text().await?;
        tracing::debug!("Playlist response length: {} bytes", text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse playlist: {} - Response: {}",
                e,
                truncate(&text)
            ))
        })
    }

    /// Get story elements for a list of identifiers.
    ///
    /// One request per unique identifier. Identifiers that fail are logged and
    /// left out; the result has the bare `{"elements": [...]}` shape.
    pub async fn get_snaps_by_id(&self, snap_ids: &[String]) -> Value {
        let (unique, duplicates) = dedup_ids(snap_ids);
        if duplicates > 0 {
            tracing::warn!("Ignoring {} duplicate IDs", duplicates);
        }
        tracing::info!("Getting {} snaps by ID", unique.len());

        let mut elements = Vec::with_capacity(unique.len());
        let mut failed = 0usize;

        for snap_id in &unique {
            match self.get_story_element(snap_id).await {
                Ok(element) => elements.push(element),
                Err(e) => {
                    tracing::error!("Failed to find story info for {}: {}", snap_id, e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            tracing::warn!("{} of {} snaps could not be retrieved", failed, unique.len());
        }

        json!({ "elements": elements })
    }

    /// Get the first story element for one identifier.
    async fn get_story_element(&self, snap_id: &str) -> Result<Value> {
        let url = self.endpoint(STORY_ELEMENTS_PATH);
        tracing::debug!("POST {} ({})", url, snap_id);

        let body = StoryElementsRequest {
            snap_ids: vec![snap_id.to_string()],
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let text = response.text().await?;

        let mut parsed: Value = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse story elements: {} - Response: {}",
                e,
                truncate(&text)
            ))
        })?;

        match parsed.get_mut("elements").and_then(Value::as_array_mut) {
            Some(elements) if !elements.is_empty() => Ok(elements.swap_remove(0)),
            _ => Err(Error::Api("Response has no story elements".into())),
        }
    }

    /// Download a file from a URL.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self.media_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(response)
    }
}

/// Remove duplicate identifiers, keeping first-seen order.
///
/// Returns the unique identifiers and the number of duplicates removed.
pub fn dedup_ids(ids: &[String]) -> (Vec<String>, usize) {
    let mut seen = HashSet::new();
    let unique: Vec<String> = ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();
    let duplicates = ids.len() - unique.len();
    (unique, duplicates)
}

fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    tracing::debug!("Response status: {}", status);

    if !status.is_success() {
        return Err(Error::Api(format!(
            "Failed to get {}: HTTP {}",
            what, status
        )));
    }

    Ok(response)
}

fn truncate(text: &str) -> &str {
    let mut end = text.len().min(500);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn api_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US"),
    );
    headers.insert(header::ORIGIN, header::HeaderValue::from_static(MAP_ORIGIN));
    headers.insert(
        header::REFERER,
        header::HeaderValue::from_static("https://map.snapchat.com/"),
    );
    headers
}

fn expansion_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        header::COOKIE,
        header::HeaderValue::from_static("sc-language=en-US; EssentialSession=true"),
    );
    headers
}
