//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub policy: AcquisitionPolicy,
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the map web API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hosts whose links must be expanded through their redirect.
    #[serde(default = "default_short_link_hosts")]
    pub short_link_hosts: Vec<String>,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            short_link_hosts: default_short_link_hosts(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Geospatial search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_zoom_level")]
    pub zoom_level: f64,

    /// Search radius in meters.
    #[serde(default = "default_radius")]
    pub radius_meters: f64,

    #[serde(default)]
    pub max_fuzz_radius: f64,

    /// Tile set epoch override. Fetched from the API when unset.
    #[serde(default)]
    pub epoch: Option<i64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            zoom_level: default_zoom_level(),
            radius_meters: default_radius(),
            max_fuzz_radius: 0.0,
            epoch: None,
        }
    }
}

/// General run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root directory for downloaded media.
    #[serde(default = "default_download_directory")]
    pub download_directory: PathBuf,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: default_download_directory(),
        }
    }
}

/// Toggles controlling what the acquisition pipeline writes.
///
/// Held immutably for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionPolicy {
    /// Skip both video kinds.
    #[serde(default)]
    pub skip_videos: bool,

    /// Skip images.
    #[serde(default = "default_true")]
    pub skip_images: bool,

    /// Write `<id>.txt` containing the identifier.
    #[serde(default = "default_true")]
    pub write_media_id: bool,

    /// Write `overlay.txt` when the overlay text is non-empty.
    #[serde(default = "default_true")]
    pub write_overlay_text: bool,

    /// Fetch and write every thumbnail as `<label>.png`.
    #[serde(default = "default_true")]
    pub write_thumbnails: bool,

    /// Write `title.txt` when the title is non-empty.
    #[serde(default = "default_true")]
    pub write_title: bool,

    /// Write `timestamp.txt` with the raw millisecond timestamp.
    #[serde(default = "default_true")]
    pub write_timestamp: bool,

    /// Embed the capture date as container metadata.
    #[serde(default = "default_true")]
    pub encode_video_timestamp: bool,

    /// Embed the title as container metadata.
    #[serde(default = "default_true")]
    pub encode_video_title: bool,

    /// One subdirectory per identifier instead of flat output.
    #[serde(default = "default_true")]
    pub separate_media: bool,

    /// Zip the destination tree once every record is processed.
    #[serde(default = "default_true")]
    pub zip_after_finish: bool,
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self {
            skip_videos: false,
            skip_images: true,
            write_media_id: true,
            write_overlay_text: true,
            write_thumbnails: true,
            write_title: true,
            write_timestamp: true,
            encode_video_timestamp: true,
            encode_video_title: true,
            separate_media: true,
            zip_after_finish: true,
        }
    }
}

impl AcquisitionPolicy {
    /// Whether any metadata embedding is requested.
    pub fn wants_encoding(&self) -> bool {
        self.encode_video_timestamp || self.encode_video_title
    }
}

fn default_base_url() -> String {
    "https://ms.sc-jpl.com".to_string()
}

fn default_short_link_hosts() -> Vec<String> {
    vec!["t.snapchat.com".to_string()]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_latitude() -> f64 {
    31.448345381406952
}

fn default_longitude() -> f64 {
    34.4039489649856
}

fn default_zoom_level() -> f64 {
    7.06892436484424
}

fn default_radius() -> f64 {
    37000.0
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> &Path {
        &self.options.download_directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults_favor_videos() {
        let policy = AcquisitionPolicy::default();
        assert!(!policy.skip_videos);
        assert!(policy.skip_images);
        assert!(policy.separate_media);
        assert!(policy.zip_after_finish);
    }

    #[test]
    fn test_empty_toml_matches_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.policy, AcquisitionPolicy::default());
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.short_link_hosts, vec!["t.snapchat.com"]);
        assert_eq!(config.search.radius_meters, 37000.0);
        assert!(config.search.epoch.is_none());
        assert_eq!(config.download_directory(), Path::new("downloads"));
    }

    #[test]
    fn test_partial_policy_table() {
        let config: Config = toml::from_str(
            r#"
            [policy]
            skip_images = false
            zip_after_finish = false

            [search]
            epoch = 1697399871000
            "#,
        )
        .unwrap();

        assert!(!config.policy.skip_images);
        assert!(!config.policy.zip_after_finish);
        assert!(config.policy.write_title);
        assert_eq!(config.search.epoch, Some(1697399871000));
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.options.download_directory = PathBuf::from("/tmp/snaps");
        config.policy.skip_videos = true;
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.download_directory(), Path::new("/tmp/snaps"));
        assert!(loaded.policy.skip_videos);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
