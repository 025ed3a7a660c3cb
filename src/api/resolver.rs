//! Snap identifier resolution from links and raw identifiers.

use std::sync::OnceLock;

use regex::Regex;

use crate::api::client::SnapApi;

/// Length of a canonical snap identifier.
pub const SNAP_ID_LENGTH: usize = 59;

fn snap_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("[A-Za-z0-9_-]{{{}}}", SNAP_ID_LENGTH))
            .unwrap_or_else(|e| panic!("invalid snap id pattern: {}", e))
    })
}

/// Extract the first snap identifier found in a string.
pub fn extract_snap_id(text: &str) -> Option<String> {
    snap_id_pattern().find(text).map(|m| m.as_str().to_string())
}

/// Resolve a link or raw identifier to a snap identifier.
///
/// Short links are expanded through their redirect first. Anything that
/// cannot be resolved yields `None`.
pub async fn resolve_snap_id(api: &SnapApi, url: &str) -> Option<String> {
    let expanded = if api.is_short_link(url) {
        tracing::info!("{} is a shortened URL. Expanding...", url);
        match api.expand_short_link(url).await {
            Ok(Some(location)) => {
                tracing::info!("Successfully expanded {}", url);
                location
            }
            Ok(None) => {
                tracing::warn!("{} did not redirect anywhere", url);
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to expand {}: {}", url, e);
                return None;
            }
        }
    } else {
        url.to_string()
    };

    match extract_snap_id(&expanded) {
        Some(snap_id) => {
            tracing::info!("Obtained SnapID {}", snap_id);
            Some(snap_id)
        }
        None => {
            tracing::warn!("No SnapID found in {}", expanded);
            None
        }
    }
}

/// Resolve many links, dropping the ones that do not resolve.
pub async fn resolve_snap_ids<S: AsRef<str>>(api: &SnapApi, urls: &[S]) -> Vec<String> {
    tracing::info!("Extracting SnapIDs from {} snaps", urls.len());

    let mut snap_ids = Vec::with_capacity(urls.len());
    for url in urls {
        if let Some(snap_id) = resolve_snap_id(api, url.as_ref()).await {
            snap_ids.push(snap_id);
        }
    }

    let dropped = urls.len() - snap_ids.len();
    if dropped > 0 {
        tracing::warn!("Could not resolve {} of {} inputs", dropped, urls.len());
    }

    snap_ids
}
