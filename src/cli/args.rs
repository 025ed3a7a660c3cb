//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// Snap Map media downloader CLI.
#[derive(Parser, Debug, Default)]
#[command(
    name = "snapmap-downloader",
    version,
    about = "Download media from Snap Map",
    long_about = "Download snaps around a location, or from share links and snap IDs.\n\n\
                  Each snap can be annotated with sidecar files, tagged with its date and \
                  title through ffmpeg, and the whole download folder zipped at the end."
)]
pub struct Args {
    /// Latitude of the search point.
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude of the search point.
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Map zoom level.
    #[arg(long)]
    pub zoom_level: Option<f64>,

    /// Search radius in meters.
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Maximum fuzz radius.
    #[arg(long)]
    pub max_fuzz_radius: Option<f64>,

    /// Tile set epoch override.
    #[arg(short, long)]
    pub epoch: Option<i64>,

    /// Directory to download the media into.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Skip downloading videos.
    #[arg(long)]
    pub skip_videos: bool,

    /// Skip downloading images.
    #[arg(long, conflicts_with = "include_images")]
    pub skip_images: bool,

    /// Download images too (they are skipped by default).
    #[arg(long)]
    pub include_images: bool,

    /// Don't write the snap ID to a text file.
    #[arg(long)]
    pub no_media_id: bool,

    /// Don't write the overlay text to a text file.
    #[arg(long)]
    pub no_overlay_text: bool,

    /// Don't download thumbnails.
    #[arg(long)]
    pub no_thumbnail: bool,

    /// Don't write the title to a text file.
    #[arg(long)]
    pub no_title: bool,

    /// Don't write the timestamp to a text file.
    #[arg(long)]
    pub no_timestamp: bool,

    /// Don't embed the capture date into videos.
    #[arg(long)]
    pub no_encode_timestamp: bool,

    /// Don't embed the title into videos.
    #[arg(long)]
    pub no_encode_title: bool,

    /// Don't create a separate folder for each snap.
    #[arg(long)]
    pub no_separate_media: bool,

    /// Don't zip the download folder after finishing.
    #[arg(long)]
    pub no_zip: bool,

    /// Share link to download (repeatable).
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// Snap ID to download (repeatable).
    #[arg(short, long = "snap-id")]
    pub snap_ids: Vec<String>,

    /// Text file with one share link or snap ID per line.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Gather links and snap IDs from the input file and the command line.
    ///
    /// File lines come first, then `--url`, then `--snap-id`. Blank lines are
    /// ignored.
    pub fn collect_inputs(&self) -> Result<Vec<String>> {
        let mut inputs = Vec::new();

        if let Some(ref file) = self.file {
            let content = std::fs::read_to_string(file)?;
            inputs.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }

        inputs.extend(self.urls.iter().cloned());
        inputs.extend(self.snap_ids.iter().cloned());

        Ok(inputs)
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        // Search parameters
        if let Some(latitude) = self.latitude {
            config.search.latitude = latitude;
        }

        if let Some(longitude) = self.longitude {
            config.search.longitude = longitude;
        }

        if let Some(zoom_level) = self.zoom_level {
            config.search.zoom_level = zoom_level;
        }

        if let Some(radius) = self.radius {
            config.search.radius_meters = radius;
        }

        if let Some(fuzz) = self.max_fuzz_radius {
            config.search.max_fuzz_radius = fuzz;
        }

        if let Some(epoch) = self.epoch {
            config.search.epoch = Some(epoch);
        }

        if let Some(ref dir) = self.download_directory {
            config.options.download_directory = dir.clone();
        }

        // Boolean flags (only override if set to non-default)
        let policy = &mut config.policy;

        if self.skip_videos {
            policy.skip_videos = true;
        }

        if self.skip_images {
            policy.skip_images = true;
        }

        if self.include_images {
            policy.skip_images = false;
        }

        if self.no_media_id {
            policy.write_media_id = false;
        }

        if self.no_overlay_text {
            policy.write_overlay_text = false;
        }

        if self.no_thumbnail {
            policy.write_thumbnails = false;
        }

        if self.no_title {
            policy.write_title = false;
        }

        if self.no_timestamp {
            policy.write_timestamp = false;
        }

        if self.no_encode_timestamp {
            policy.encode_video_timestamp = false;
        }

        if self.no_encode_title {
            policy.encode_video_title = false;
        }

        if self.no_separate_media {
            policy.separate_media = false;
        }

        if self.no_zip {
            policy.zip_after_finish = false;
        }
    }
}
