//! Console output utilities.

use console::style;

use crate::config::{Config, InputMode};

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Snap Map Downloader                               ║
║     Download, annotate and archive Snap Map media     ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(config: &Config, mode: InputMode, input_count: usize) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Mode: {}", mode);
    match mode {
        InputMode::Links => println!("  Inputs: {}", input_count),
        InputMode::Search => {
            let search = &config.search;
            println!(
                "  Location: {}, {} (zoom {}, radius {} m)",
                search.latitude, search.longitude, search.zoom_level, search.radius_meters
            );
            if let Some(epoch) = search.epoch {
                println!("  Epoch: {} (override)", epoch);
            }
        }
    }
    println!("  Directory: {}", config.download_directory().display());

    let policy = &config.policy;
    println!(
        "  Skip: videos={} images={}",
        policy.skip_videos, policy.skip_images
    );
    println!(
        "  Separate folders: {}  Zip: {}",
        policy.separate_media, policy.zip_after_finish
    );
    println!();
}
