//! Tube Snapper - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use tube_snapper::{
    cli::Args,
    config::{validate_config, Config, InputMode},
    download::{resolve_targets, Downloader, RetryDriver},
    error::{exit_codes, Error, Result},
    fs::ensure_dir,
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_failed_urls,
        print_info, print_run_summary, print_success, print_warning,
    },
    stream::{StreamSource, YtDlpSource},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::RetryExhausted { failed } => {
                    print_failed_urls(&failed);
                    ExitCode::from(exit_codes::SOME_URLS_FAILED as u8)
                }
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Fetch { .. }
                | Error::Extractor(_)
                | Error::ExtractorNotFound
                | Error::FFmpegNotFound
                | Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
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

    let Some(mode) = args.input_mode() else {
        Args::command().print_help()?;
        return Ok(());
    };

    print_banner();

    // Load configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    if args.config.is_some() && !config_path.exists() {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
    }
    let mut config = Config::load_or_default(&config_path)?;

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(
        &mode.to_string(),
        &config.options.output_format.to_string(),
        config.options.quality,
        &config.options.download_directory.display().to_string(),
    );

    let source: Arc<dyn StreamSource> = Arc::new(YtDlpSource::from_config(&config));

    let targets = if matches!(mode, InputMode::Playlist(_)) && config.options.show_progress {
        let spinner = create_spinner("Fetching playlist...");
        let targets = resolve_targets(&mode, source.as_ref(), &config).await;
        spinner.finish_and_clear();
        targets?
    } else {
        resolve_targets(&mode, source.as_ref(), &config).await?
    };

    ensure_dir(&targets.directory)?;
    print_info(&format!(
        "Downloading {} URL(s) with {} into {}",
        targets.urls.len(),
        source.name(),
        targets.directory.display()
    ));

    let downloader = Downloader::new(source, &config, targets.directory.clone())?;
    let driver = RetryDriver::from_config(&config);

    let downloader = &downloader;
    let report = driver
        .run(&targets.urls, move |url| async move {
            downloader.download(&url).await.map(|_| ())
        })
        .await?;

    print_run_summary(&report);
    print_success("All downloads complete");

    Ok(())
}
