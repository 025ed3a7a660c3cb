//! API request and response type definitions.
//!
//! Only the small, stable envelopes are typed here. Playlist and story
//! payloads stay as raw JSON and are interpreted by the media normalizer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic point of a playlist query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Tile set selector sent with playlist requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSetId {
    pub flavor: String,
    pub epoch: i64,
    #[serde(rename = "type")]
    pub tile_type: i32,
}

/// Body of a `getPlaylist` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRequest {
    pub request_geo_point: GeoPoint,
    pub zoom_level: f64,
    pub tile_set_id: TileSetId,
    pub radius_meters: f64,
    pub maximum_fuzz_radius: f64,
}

/// Geospatial parameters of a playlist query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaylistQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom_level: f64,
    pub radius_meters: f64,
    pub max_fuzz_radius: f64,
}

impl PlaylistQuery {
    /// Build the request body for this query using the given tile set epoch.
    pub fn to_request(&self, epoch: i64) -> PlaylistRequest {
        PlaylistRequest {
            request_geo_point: GeoPoint {
                lat: self.latitude,
                lon: self.longitude,
            },
            zoom_level: self.zoom_level,
            tile_set_id: TileSetId {
                flavor: "default".to_string(),
                epoch,
                tile_type: 1,
            },
            radius_meters: self.radius_meters,
            maximum_fuzz_radius: self.max_fuzz_radius,
        }
    }
}

impl From<&crate::config::SearchConfig> for PlaylistQuery {
    fn from(search: &crate::config::SearchConfig) -> Self {
        Self {
            latitude: search.latitude,
            longitude: search.longitude,
            zoom_level: search.zoom_level,
            radius_meters: search.radius_meters,
            max_fuzz_radius: search.max_fuzz_radius,
        }
    }
}

/// Body of a `getStoryElements` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryElementsRequest {
    pub snap_ids: Vec<String>,
}

/// Response of `getLatestTileSet`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSetResponse {
    #[serde(default)]
    pub tile_set_infos: Vec<TileSetInfo>,
}

/// One tile set entry.
#[derive(Debug, Deserialize)]
pub struct TileSetInfo {
    pub id: Option<TileSetInfoId>,
}

/// Identifier block of a tile set entry.
#[derive(Debug, Deserialize)]
pub struct TileSetInfoId {
    /// Sent upstream either as a number or as a numeric string.
    pub epoch: Option<Value>,
}

/// Index of the tile set entry whose epoch selects the current playlist.
pub const EPOCH_TILE_SET_INDEX: usize = 1;

impl TileSetResponse {
    /// Extract the current epoch, if the response carries one.
    pub fn epoch(&self) -> Option<i64> {
        let value = self
            .tile_set_infos
            .get(EPOCH_TILE_SET_INDEX)?
            .id
            .as_ref()?
            .epoch
            .as_ref()?;

        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
