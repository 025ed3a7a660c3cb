//! Normalization of raw playlist and story payloads into media records.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::fs::sanitize_path_component;
use crate::media::item::{MediaKind, MediaRecord};

/// The two response layouts served by the map API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Playlist responses: `manifest.elements`, title at `snapInfo.title`.
    Manifest,
    /// Story element responses: `elements`, title at `snapInfo.localitySubtitle`.
    Bare,
}

impl PayloadShape {
    /// Detect the shape of a payload from the presence of a `manifest` key.
    pub fn detect(payload: &Value) -> Self {
        match payload.get("manifest") {
            Some(manifest) if !manifest.is_null() => PayloadShape::Manifest,
            _ => PayloadShape::Bare,
        }
    }

    /// Get the element list of a payload of this shape.
    pub fn elements<'a>(&self, payload: &'a Value) -> &'a [Value] {
        let list = match self {
            PayloadShape::Manifest => payload.pointer("/manifest/elements"),
            PayloadShape::Bare => payload.get("elements"),
        };
        list.and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// JSON pointer of the title, relative to `snapInfo`.
    fn title_pointer(&self) -> &'static str {
        match self {
            PayloadShape::Manifest => "/title/fallback",
            PayloadShape::Bare => "/localitySubtitle/fallback",
        }
    }
}

/// Convert a raw payload of either shape into media records.
///
/// Elements missing a required field are logged and skipped. Output order
/// follows the element order of the payload.
pub fn parse_snap_media(payload: &Value) -> Vec<MediaRecord> {
    tracing::info!("Converting JSON to media records...");

    let shape = PayloadShape::detect(payload);
    let elements = shape.elements(payload);
    tracing::debug!("Payload shape {:?} with {} elements", shape, elements.len());

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match parse_element(shape, element) {
            Ok(record) => records.push(record),
            Err(e) => tracing::error!("Skipping element {}: {}", index, e),
        }
    }

    records
}

/// Convert one element into a media record.
///
/// The identifier and thumbnail labels later become path components, so an
/// element carrying one that cannot be used as a file name is rejected here.
pub fn parse_element(shape: PayloadShape, element: &Value) -> Result<MediaRecord> {
    let media_id = element
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::Media("element is missing 'id'".into()))?;
    sanitize_path_component(media_id)?;

    let empty = Value::Null;
    let snap_info = element.get("snapInfo").unwrap_or(&empty);

    let media_url = snap_info
        .pointer("/streamingMediaInfo/mediaUrl")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::Media(format!(
                "{} is missing 'snapInfo.streamingMediaInfo.mediaUrl'",
                media_id
            ))
        })?;

    let kind = snap_info
        .get("snapMediaType")
        .and_then(Value::as_str)
        .map(MediaKind::from_api)
        .unwrap_or_default();

    Ok(MediaRecord {
        media_id: media_id.to_string(),
        duration: element.get("duration").map(number_value).unwrap_or(0.0),
        timestamp: element
            .get("timestamp")
            .and_then(timestamp_value)
            .unwrap_or_else(|| "0".to_string()),
        kind,
        media_url: media_url.to_string(),
        thumbnails: parse_thumbnails(snap_info)?,
        overlay_text: string_at(snap_info, "/overlayText"),
        title: string_at(snap_info, shape.title_pointer()),
    })
}

/// Extract `(thumbnailType, thumbnailUrl)` pairs, preserving order.
fn parse_thumbnails(snap_info: &Value) -> Result<Vec<(String, String)>> {
    let Some(infos) = snap_info
        .pointer("/streamingThumbnailInfo/infos")
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    let mut thumbnails = Vec::with_capacity(infos.len());
    for info in infos {
        let label = info.get("thumbnailType").and_then(Value::as_str);
        let url = info.get("thumbnailUrl").and_then(Value::as_str);
        if let (Some(label), Some(url)) = (label, url) {
            sanitize_path_component(label)?;
            thumbnails.push((label.to_string(), url.to_string()));
        }
    }

    Ok(thumbnails)
}

fn string_at(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn number_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Timestamps arrive as numeric strings or as numbers.
fn timestamp_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .map(|v| v.to_string())
            .or_else(|| n.as_f64().map(|v| format!("{}", v.trunc() as i64))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snap_info(title_key: &str, title: &str) -> Value {
        let mut info = json!({
            "snapMediaType": "SNAP_MEDIA_TYPE_VIDEO",
            "overlayText": "hello",
            "streamingMediaInfo": {"mediaUrl": "https://cdn.example/a.mp4"},
            "streamingThumbnailInfo": {"infos": [
                {"thumbnailType": "THUMBNAIL_TYPE_SMALL", "thumbnailUrl": "https://cdn.example/s.jpg"},
                {"thumbnailType": "THUMBNAIL_TYPE_LARGE", "thumbnailUrl": "https://cdn.example/l.jpg"}
            ]}
        });
        info[title_key] = json!({"fallback": title});
        info
    }

    #[test]
    fn test_detect_shape() {
        assert_eq!(
            PayloadShape::detect(&json!({"manifest": {"elements": []}})),
            PayloadShape::Manifest
        );
        assert_eq!(
            PayloadShape::detect(&json!({"manifest": null, "elements": []})),
            PayloadShape::Bare
        );
        assert_eq!(PayloadShape::detect(&json!({"elements": []})), PayloadShape::Bare);
    }

    #[test]
    fn test_manifest_and_bare_are_equivalent() {
        let manifest = json!({"manifest": {"elements": [
            {"id": "one", "duration": 4.5, "timestamp": "1697343813000", "snapInfo": snap_info("title", "Gaza")},
            {"id": "two", "timestamp": 1697343814000i64, "snapInfo": snap_info("title", "")}
        ]}});
        let bare = json!({"elements": [
            {"id": "one", "duration": 4.5, "timestamp": "1697343813000", "snapInfo": snap_info("localitySubtitle", "Gaza")},
            {"id": "two", "timestamp": 1697343814000i64, "snapInfo": snap_info("localitySubtitle", "")}
        ]});

        let from_manifest = parse_snap_media(&manifest);
        let from_bare = parse_snap_media(&bare);

        assert_eq!(from_manifest.len(), 2);
        assert_eq!(from_manifest, from_bare);

        let first = &from_manifest[0];
        assert_eq!(first.media_id, "one");
        assert_eq!(first.duration, 4.5);
        assert_eq!(first.kind, MediaKind::Video);
        assert_eq!(first.title, "Gaza");
        assert_eq!(first.overlay_text, "hello");
        assert_eq!(
            first.thumbnails,
            vec![
                ("THUMBNAIL_TYPE_SMALL".to_string(), "https://cdn.example/s.jpg".to_string()),
                ("THUMBNAIL_TYPE_LARGE".to_string(), "https://cdn.example/l.jpg".to_string()),
            ]
        );
        assert_eq!(from_manifest[1].timestamp, "1697343814000");
    }

    #[test]
    fn test_title_path_follows_shape() {
        // A bare payload never reads snapInfo.title
        let bare = json!({"elements": [
            {"id": "one", "snapInfo": snap_info("title", "Wrong place")}
        ]});
        assert_eq!(parse_snap_media(&bare)[0].title, "");
    }

    #[test]
    fn test_fallbacks() {
        let payload = json!({"elements": [
            {"id": "minimal", "snapInfo": {"streamingMediaInfo": {"mediaUrl": "https://cdn.example/m"}}}
        ]});
        let records = parse_snap_media(&payload);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.duration, 0.0);
        assert_eq!(record.timestamp, "0");
        assert_eq!(record.kind, MediaKind::Image);
        assert_eq!(record.overlay_text, "");
        assert_eq!(record.title, "");
        assert!(record.thumbnails.is_empty());
    }

    #[test]
    fn test_bad_elements_are_isolated() {
        let payload = json!({"elements": [
            {"snapInfo": {"streamingMediaInfo": {"mediaUrl": "https://cdn.example/no-id"}}},
            {"id": "no-url", "snapInfo": {}},
            {"id": "ok", "snapInfo": {"streamingMediaInfo": {"mediaUrl": "https://cdn.example/ok"}}},
            {"id": "", "snapInfo": {"streamingMediaInfo": {"mediaUrl": "https://cdn.example/empty"}}}
        ]});
        let records = parse_snap_media(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].media_id, "ok");
    }

    #[test]
    fn test_unsafe_path_values_drop_only_their_element() {
        let payload = json!({"elements": [
            {"id": "../escape", "snapInfo": {"streamingMediaInfo": {"mediaUrl": "https://cdn.example/a"}}},
            {"id": "bad-thumb", "snapInfo": {
                "streamingMediaInfo": {"mediaUrl": "https://cdn.example/b"},
                "streamingThumbnailInfo": {"infos": [
                    {"thumbnailType": "..", "thumbnailUrl": "https://cdn.example/t.jpg"}
                ]}
            }},
            {"id": "fine", "snapInfo": snap_info("localitySubtitle", "")}
        ]});

        let records = parse_snap_media(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].media_id, "fine");

        let err = parse_element(PayloadShape::Bare, &payload["elements"][0]).unwrap_err();
        assert!(matches!(err, Error::InvalidFilename(_)));
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let payload = json!({"elements": [
            {"id": "x", "snapInfo": {
                "snapMediaType": "SNAP_MEDIA_TYPE_SOMETHING_NEW",
                "streamingMediaInfo": {"mediaUrl": "https://cdn.example/x"}
            }}
        ]});
        let records = parse_snap_media(&payload);
        assert_eq!(
            records[0].kind,
            MediaKind::Other("SNAP_MEDIA_TYPE_SOMETHING_NEW".to_string())
        );
    }

    #[test]
    fn test_missing_element_list() {
        assert!(parse_snap_media(&json!({})).is_empty());
        assert!(parse_snap_media(&json!({"manifest": {}})).is_empty());
    }
}
