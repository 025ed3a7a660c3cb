//! Snap Map Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use snapmap_downloader::{
    api::{resolve_snap_ids, PlaylistQuery, SnapApi},
    cli::Args,
    config::{validate_config, Config, InputMode},
    download::{download_media, FfmpegEncoder},
    error::{exit_codes, Error, Result},
    media::parse_snap_media,
    output::{
        print_acquisition_stats, print_banner, print_config_summary, print_error, print_info,
        print_warning,
    },
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("Error encountered: {}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Api(_) | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_)
                | Error::FFmpeg(_)
                | Error::FFmpegNotFound
                | Error::Archive(_)
                | Error::Io(_)
                | Error::InvalidFilename(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let inputs = args.collect_inputs()?;
    let mode = InputMode::for_inputs(&inputs);
    print_config_summary(&config, mode, inputs.len());

    let api = SnapApi::new(&config.api)?;

    let payload = match mode {
        InputMode::Links => {
            let snap_ids = resolve_snap_ids(&api, &inputs).await;
            if snap_ids.is_empty() {
                print_warning("None of the given links or IDs could be resolved");
            }
            api.get_snaps_by_id(&snap_ids).await
        }
        InputMode::Search => {
            let query = PlaylistQuery::from(&config.search);
            api.get_playlist(&query, config.search.epoch).await?
        }
    };

    let records = parse_snap_media(&payload);

    let encoder = FfmpegEncoder::new();
    let state = download_media(
        &api,
        &encoder,
        &records,
        config.download_directory(),
        &config.policy,
    )
    .await?;

    print_acquisition_stats(&state);

    Ok(())
}
