//! Filesystem module.
//!
//! Provides:
//! - Per-snap directory layout
//! - Path component sanitization

pub mod naming;
pub mod paths;

pub use naming::{sanitize_path_component, thumbnail_filename, ARCHIVE_FILENAME};
pub use paths::{ensure_dir, get_media_folder};
