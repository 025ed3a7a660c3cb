//! Download module for media acquisition.
//!
//! This module provides:
//! - The acquisition pipeline over normalized records
//! - Media file downloading
//! - Video metadata embedding via ffmpeg
//! - Zip archiving of the output tree
//! - Acquisition state tracking

pub mod archive;
pub mod encode;
pub mod media;
pub mod pipeline;
pub mod state;

pub use archive::archive_directory;
pub use encode::{build_metadata, FfmpegEncoder, VideoEncoder};
pub use media::download_to_file;
pub use pipeline::{download_media, is_skipped};
pub use state::AcquisitionState;
