//! Media record representation.

use chrono::{Local, TimeZone};

use crate::error::Result;
use crate::fs::sanitize_path_component;

/// Kind of snap media as reported upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    VideoNoSound,
    /// Any value outside the known set, kept verbatim.
    Other(String),
}

impl MediaKind {
    /// Parse an upstream `snapMediaType` value.
    pub fn from_api(value: &str) -> Self {
        match value {
            "SNAP_MEDIA_TYPE_IMAGE" => MediaKind::Image,
            "SNAP_MEDIA_TYPE_VIDEO" => MediaKind::Video,
            "SNAP_MEDIA_TYPE_VIDEO_NO_SOUND" => MediaKind::VideoNoSound,
            other => MediaKind::Other(other.to_string()),
        }
    }

    /// The upstream name of this kind.
    pub fn as_api_str(&self) -> &str {
        match self {
            MediaKind::Image => "SNAP_MEDIA_TYPE_IMAGE",
            MediaKind::Video => "SNAP_MEDIA_TYPE_VIDEO",
            MediaKind::VideoNoSound => "SNAP_MEDIA_TYPE_VIDEO_NO_SOUND",
            MediaKind::Other(s) => s,
        }
    }

    /// Whether this is either video variant.
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::VideoNoSound)
    }

    /// File extension the primary content is saved with.
    pub fn file_extension(&self) -> &'static str {
        if self.is_video() {
            "mp4"
        } else {
            "png"
        }
    }
}

/// A normalized snap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaRecord {
    /// Unique snap ID.
    pub media_id: String,

    /// Duration in seconds, 0 when unknown.
    pub duration: f64,

    /// Capture time in milliseconds since the Unix epoch, as a string.
    pub timestamp: String,

    pub kind: MediaKind,

    /// Location of the primary content.
    pub media_url: String,

    /// Ordered `(label, url)` thumbnail pairs.
    pub thumbnails: Vec<(String, String)>,

    pub overlay_text: String,

    pub title: String,
}

impl MediaRecord {
    /// Filename of the downloaded primary content.
    pub fn media_filename(&self) -> Result<String> {
        Ok(format!(
            "{}.{}",
            sanitize_path_component(&self.media_id)?,
            self.kind.file_extension()
        ))
    }

    /// Filename of the identifier sidecar.
    pub fn id_filename(&self) -> Result<String> {
        Ok(format!("{}.txt", sanitize_path_component(&self.media_id)?))
    }

    /// Filename of the metadata-tagged video copy.
    pub fn encoded_filename(&self) -> Result<String> {
        Ok(format!("{}_encoded.mp4", sanitize_path_component(&self.media_id)?))
    }

    /// Format the capture time as local `%Y-%m-%d %H:%M:%S`.
    ///
    /// Returns `None` when the timestamp is not an integer millisecond value.
    pub fn local_capture_time(&self) -> Option<String> {
        let millis: i64 = self.timestamp.trim().parse().ok()?;
        let dt = Local.timestamp_millis_opt(millis).single()?;
        Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
