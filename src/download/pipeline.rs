//! Acquisition pipeline: download, annotate, organize and archive snaps.

use std::path::Path;

use crate::api::SnapApi;
use crate::config::AcquisitionPolicy;
use crate::download::archive::archive_directory;
use crate::download::encode::{build_metadata, should_encode, VideoEncoder};
use crate::download::media::download_to_file;
use crate::download::state::AcquisitionState;
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, get_media_folder, thumbnail_filename};
use crate::media::{MediaKind, MediaRecord};

/// Whether the policy excludes a record of this kind.
pub fn is_skipped(kind: &MediaKind, policy: &AcquisitionPolicy) -> bool {
    (policy.skip_videos && kind.is_video()) || (policy.skip_images && *kind == MediaKind::Image)
}

/// Download every record into `destination` following `policy`.
///
/// Records are processed one at a time in input order. Network, filesystem and
/// encoder failures abort the run.
pub async fn download_media(
    api: &SnapApi,
    encoder: &dyn VideoEncoder,
    records: &[MediaRecord],
    destination: &Path,
    policy: &AcquisitionPolicy,
) -> Result<AcquisitionState> {
    tracing::info!("Starting media download...");
    tracing::info!("Found {} Snaps", records.len());

    ensure_dir(destination).await?;

    let mut state = AcquisitionState::new(records.len());

    for record in records {
        let media_path = get_media_folder(destination, &record.media_id, policy.separate_media)?;
        ensure_dir(&media_path).await?;

        if is_skipped(&record.kind, policy) {
            tracing::debug!(
                "Skipping {} ({})",
                record.media_id,
                record.kind.as_api_str()
            );
            state.increment_skipped();
            continue;
        }

        download_record(api, encoder, record, &media_path, policy, &mut state).await?;
    }

    if policy.zip_after_finish {
        let root = destination.to_path_buf();
        let (archive_path, entries) = tokio::task::spawn_blocking(move || archive_directory(&root))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))??;
        state.archive_path = Some(archive_path);
        state.archive_entries = entries as u64;
    }

    Ok(state)
}

/// Download and annotate a single record inside its working directory.
async fn download_record(
    api: &SnapApi,
    encoder: &dyn VideoEncoder,
    record: &MediaRecord,
    media_path: &Path,
    policy: &AcquisitionPolicy,
    state: &mut AcquisitionState,
) -> Result<()> {
    tracing::info!("Downloading {} | {}", record.media_id, record.title);

    let media_file = media_path.join(record.media_filename()?);
    download_to_file(api, &record.media_url, &media_file).await?;
    state.increment_media(&record.kind);

    if policy.write_media_id {
        write_sidecar(media_path, &record.id_filename()?, &record.media_id).await?;
        state.increment_sidecar();
    }

    if policy.write_overlay_text && !record.overlay_text.is_empty() {
        write_sidecar(media_path, "overlay.txt", &record.overlay_text).await?;
        state.increment_sidecar();
    }

    if policy.write_title && !record.title.is_empty() {
        write_sidecar(media_path, "title.txt", &record.title).await?;
        state.increment_sidecar();
    }

    if policy.write_timestamp {
        write_sidecar(media_path, "timestamp.txt", &record.timestamp).await?;
        state.increment_sidecar();
    }

    if policy.write_thumbnails {
        for (label, url) in &record.thumbnails {
            let target = media_path.join(thumbnail_filename(label)?);
            download_to_file(api, url, &target).await?;
            state.increment_thumbnail();
        }
    }

    if should_encode(record, policy) {
        let output = media_path.join(record.encoded_filename()?);
        let metadata = build_metadata(record, policy);
        tracing::info!("Encoding {} with {} metadata tags", record.media_id, metadata.len());

        encoder.remux(&media_file, &output, &metadata).await?;
        state.increment_encoded();
    } else if record.kind == MediaKind::VideoNoSound && policy.wants_encoding() {
        tracing::debug!("Not encoding {}: video has no sound", record.media_id);
    }

    Ok(())
}

async fn write_sidecar(dir: &Path, filename: &str, contents: &str) -> Result<()> {
    tokio::fs::write(dir.join(filename), contents).await?;
    Ok(())
}
