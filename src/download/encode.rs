//! Video metadata embedding through an external encoder.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::AcquisitionPolicy;
use crate::error::{Error, Result};
use crate::media::MediaRecord;

/// Remuxes a video into a new file with extra container metadata.
///
/// Implementations must copy the audio and video streams untouched.
#[async_trait]
pub trait VideoEncoder: Send + Sync {
    /// Copy `input` to `output`, tagging it with `key=value` metadata entries.
    async fn remux(&self, input: &Path, output: &Path, metadata: &[String]) -> Result<()>;
}

/// Encoder backed by the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self {
            program: "ffmpeg".to_string(),
        }
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoEncoder for FfmpegEncoder {
    async fn remux(&self, input: &Path, output: &Path, metadata: &[String]) -> Result<()> {
        let input_str = input
            .to_str()
            .ok_or_else(|| Error::FFmpeg("Invalid path encoding for input".into()))?;
        let output_str = output
            .to_str()
            .ok_or_else(|| Error::FFmpeg("Invalid path encoding for output".into()))?;

        let args = ffmpeg_args(input_str, output_str, metadata);
        tracing::debug!("{} {}", self.program, args.join(" "));

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::FFmpegNotFound
                } else {
                    Error::FFmpeg(format!("Failed to run ffmpeg: {}", e))
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::FFmpeg(format!(
                "ffmpeg exited with status {}: {}",
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Build the ffmpeg argument list for a stream-copy remux.
pub fn ffmpeg_args(input: &str, output: &str, metadata: &[String]) -> Vec<String> {
    let mut args: Vec<String> = ["-y", "-stats", "-loglevel", "error", "-i", input]
        .iter()
        .map(|s| s.to_string())
        .collect();

    for entry in metadata {
        args.push("-metadata".to_string());
        args.push(entry.clone());
    }

    args.extend(["-c", "copy", output].iter().map(|s| s.to_string()));
    args
}

/// Whether a record goes through the encoder under this policy.
///
/// Only videos with sound are remuxed; silent videos are downloaded as-is.
pub fn should_encode(record: &MediaRecord, policy: &AcquisitionPolicy) -> bool {
    record.kind == crate::media::MediaKind::Video && policy.wants_encoding()
}

/// Build the `key=value` metadata entries for a record.
pub fn build_metadata(record: &MediaRecord, policy: &AcquisitionPolicy) -> Vec<String> {
    let mut metadata = Vec::new();

    if policy.encode_video_timestamp {
        match record.local_capture_time() {
            Some(date) => metadata.push(format!("date={}", date)),
            None => tracing::warn!(
                "Not embedding date for {}: unusable timestamp '{}'",
                record.media_id,
                record.timestamp
            ),
        }
    }

    if policy.encode_video_title && !record.title.is_empty() {
        metadata.push(format!("title={}", record.title));
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;

    fn video(title: &str) -> MediaRecord {
        MediaRecord {
            media_id: "abc".to_string(),
            kind: MediaKind::Video,
            timestamp: "1697343813000".to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ffmpeg_args() {
        let args = ffmpeg_args(
            "in.mp4",
            "out.mp4",
            &["date=2023-10-15 04:23:33".to_string(), "title=T".to_string()],
        );
        assert_eq!(
            args,
            vec![
                "-y", "-stats", "-loglevel", "error", "-i", "in.mp4", "-metadata",
                "date=2023-10-15 04:23:33", "-metadata", "title=T", "-c", "copy", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_build_metadata_all_on() {
        let metadata = build_metadata(&video("T"), &AcquisitionPolicy::default());
        assert_eq!(metadata.len(), 2);
        assert!(metadata[0].starts_with("date=2023-10-1"));
        assert_eq!(metadata[1], "title=T");
    }

    #[test]
    fn test_build_metadata_empty_title_omitted() {
        let metadata = build_metadata(&video(""), &AcquisitionPolicy::default());
        assert_eq!(metadata.len(), 1);
        assert!(metadata[0].starts_with("date="));
    }

    #[test]
    fn test_build_metadata_toggles() {
        let policy = AcquisitionPolicy {
            encode_video_timestamp: false,
            ..Default::default()
        };
        assert_eq!(build_metadata(&video("T"), &policy), vec!["title=T"]);

        let policy = AcquisitionPolicy {
            encode_video_title: false,
            ..Default::default()
        };
        let metadata = build_metadata(&video("T"), &policy);
        assert_eq!(metadata.len(), 1);
        assert!(metadata[0].starts_with("date="));
    }

    #[test]
    fn test_should_encode_only_videos_with_sound() {
        let policy = AcquisitionPolicy::default();
        assert!(should_encode(&video("T"), &policy));

        let silent = MediaRecord {
            kind: MediaKind::VideoNoSound,
            ..video("T")
        };
        assert!(!should_encode(&silent, &policy));

        let off = AcquisitionPolicy {
            encode_video_timestamp: false,
            encode_video_title: false,
            ..Default::default()
        };
        assert!(!should_encode(&video("T"), &off));
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_binary() {
        let encoder = FfmpegEncoder {
            program: "definitely-not-an-ffmpeg-binary".to_string(),
        };
        let err = encoder
            .remux(Path::new("in.mp4"), Path::new("out.mp4"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FFmpegNotFound));
    }
}
