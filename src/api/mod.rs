//! Snap Map API module.
//!
//! This module provides:
//! - HTTP client for the map web API (tile sets, playlists, story elements)
//! - Short link expansion and snap identifier resolution
//! - Request and response envelope types

pub mod client;
pub mod resolver;
pub mod types;

pub use client::{dedup_ids, SnapApi};
pub use resolver::{extract_snap_id, resolve_snap_id, resolve_snap_ids, SNAP_ID_LENGTH};
pub use types::*;
