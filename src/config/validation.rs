//! Configuration validation logic.

use crate::config::loader::{ApiConfig, Config, SearchConfig};
use crate::error::{Error, Result};

/// Maximum map zoom level accepted by the tile API.
const MAX_ZOOM_LEVEL: f64 = 22.0;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api(&config.api)?;
    validate_search(&config.search)?;

    if config.download_directory().as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "download_directory".to_string(),
            message: "Download directory cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate upstream API settings.
pub fn validate_api(api: &ApiConfig) -> Result<()> {
    url::Url::parse(&api.base_url).map_err(|e| Error::ConfigValidation {
        field: "base_url".to_string(),
        message: format!("'{}' is not a valid URL: {}", api.base_url, e),
    })?;

    if api.short_link_hosts.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::ConfigValidation {
            field: "short_link_hosts".to_string(),
            message: "At least one short link host is required".to_string(),
        });
    }

    if api.user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: "User agent cannot be empty".to_string(),
        });
    }

    if api.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "timeout_secs".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

/// Validate geospatial search parameters.
pub fn validate_search(search: &SearchConfig) -> Result<()> {
    if !(-90.0..=90.0).contains(&search.latitude) {
        return Err(Error::ConfigValidation {
            field: "latitude".to_string(),
            message: format!("Latitude {} is outside [-90, 90]", search.latitude),
        });
    }

    if !(-180.0..=180.0).contains(&search.longitude) {
        return Err(Error::ConfigValidation {
            field: "longitude".to_string(),
            message: format!("Longitude {} is outside [-180, 180]", search.longitude),
        });
    }

    if !(0.0..=MAX_ZOOM_LEVEL).contains(&search.zoom_level) {
        return Err(Error::ConfigValidation {
            field: "zoom_level".to_string(),
            message: format!(
                "Zoom level {} is outside [0, {}]",
                search.zoom_level, MAX_ZOOM_LEVEL
            ),
        });
    }

    // NaN fails both comparisons below
    if !(search.radius_meters > 0.0) {
        return Err(Error::ConfigValidation {
            field: "radius_meters".to_string(),
            message: format!("Radius must be positive (got {})", search.radius_meters),
        });
    }

    if !(search.max_fuzz_radius >= 0.0) {
        return Err(Error::ConfigValidation {
            field: "max_fuzz_radius".to_string(),
            message: format!(
                "Fuzz radius cannot be negative (got {})",
                search.max_fuzz_radius
            ),
        });
    }

    Ok(())
}
