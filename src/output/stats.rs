//! Statistics reporting.

use console::style;

use crate::download::AcquisitionState;

/// Print statistics for an acquisition run.
pub fn print_acquisition_stats(state: &AcquisitionState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Statistics:").bold());
    println!("  Snaps found: {}", state.records_total);
    println!("  Images:      {}", state.image_count);
    println!("  Videos:      {}", state.video_count);
    if state.other_count > 0 {
        println!("  Other:       {}", state.other_count);
    }
    println!("  Skipped:     {} (policy)", state.skipped_count);
    println!("  Sidecars:    {}", state.sidecar_count);
    println!("  Thumbnails:  {}", state.thumbnail_count);
    println!("  Encoded:     {}", state.encoded_count);
    println!("  Total:       {} downloaded", state.total_downloaded());
    if let Some(ref archive) = state.archive_path {
        println!(
            "  Archive:     {} ({} files)",
            style(archive.display()).green(),
            state.archive_entries
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}
