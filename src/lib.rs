//! Snap Map Downloader - download, annotate and archive Snap Map media.
//!
//! This library provides the pieces of the download pipeline.
//!
//! # Features
//!
//! - Playlist search around a location (with automatic tile set epoch lookup)
//! - Share link expansion and snap ID extraction
//! - Normalization of both playlist and story element payloads
//! - Sidecar files for IDs, overlay text, titles, timestamps and thumbnails
//! - Date and title embedding into videos via ffmpeg
//! - Zip archiving of the download folder
//!
//! # Example
//!
//! ```no_run
//! use snapmap_downloader::{parse_snap_media, Config, FfmpegEncoder, SnapApi};
//! use snapmap_downloader::api::PlaylistQuery;
//! use snapmap_downloader::download::download_media;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = SnapApi::new(&config.api)?;
//!
//!     let playlist = api.get_playlist(&PlaylistQuery::from(&config.search), None).await?;
//!     let records = parse_snap_media(&playlist);
//!     download_media(
//!         &api,
//!         &FfmpegEncoder::new(),
//!         &records,
//!         config.download_directory(),
//!         &config.policy,
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::SnapApi;
pub use config::{AcquisitionPolicy, Config, InputMode};
pub use download::{download_media, AcquisitionState, FfmpegEncoder, VideoEncoder};
pub use error::{Error, Result};
pub use media::{parse_snap_media, MediaKind, MediaRecord};
