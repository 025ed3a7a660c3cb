//! Acquisition state tracking.

use std::path::PathBuf;

use crate::media::MediaKind;

/// Counters for one acquisition run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AcquisitionState {
    /// Records handed to the pipeline.
    pub records_total: u64,

    // Primary content
    pub image_count: u64,
    pub video_count: u64,
    pub other_count: u64,

    /// Records excluded by the skip policy.
    pub skipped_count: u64,

    /// Identifier, overlay, title and timestamp files written.
    pub sidecar_count: u64,
    pub thumbnail_count: u64,
    pub encoded_count: u64,

    /// Archive written at the end of the run, if any.
    pub archive_path: Option<PathBuf>,
    pub archive_entries: u64,
}

impl AcquisitionState {
    /// Create a new state for a batch of records.
    pub fn new(records_total: usize) -> Self {
        Self {
            records_total: records_total as u64,
            ..Default::default()
        }
    }

    /// Count a downloaded primary file.
    pub fn increment_media(&mut self, kind: &MediaKind) {
        match kind {
            MediaKind::Image => self.image_count += 1,
            MediaKind::Video | MediaKind::VideoNoSound => self.video_count += 1,
            MediaKind::Other(_) => self.other_count += 1,
        }
    }

    pub fn increment_skipped(&mut self) {
        self.skipped_count += 1;
    }

    pub fn increment_sidecar(&mut self) {
        self.sidecar_count += 1;
    }

    pub fn increment_thumbnail(&mut self) {
        self.thumbnail_count += 1;
    }

    pub fn increment_encoded(&mut self) {
        self.encoded_count += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.image_count + self.video_count + self.other_count
    }
}
