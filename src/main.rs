//! Insta Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use insta_downloader::{
    api::InstaApi,
    cli::Args,
    config::{parse_post_url, validate_config, validation::clean_username, Config, DownloadMode},
    download::{download_feed, download_single_post, DownloadState, GlobalState},
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_global_stats, print_info,
        print_user_stats, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
                Error::Fetch { .. } | Error::Transport(_) | Error::Decode { .. } => {
                    exit_codes::API_ERROR
                }
                Error::Download(_) | Error::InvalidFilename(_) => exit_codes::DOWNLOAD_ERROR,
                _ => exit_codes::UNEXPECTED_ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(
        &config.targeted_user.usernames,
        &config.options.download_mode.to_string(),
        &config.options.continuation.to_string(),
        &config.download_directory().display().to_string(),
    );

    let api = InstaApi::new(&config.network)?;

    match config.options.download_mode {
        DownloadMode::Single => {
            let post = config
                .options
                .post_url
                .as_deref()
                .ok_or_else(|| Error::MissingConfig("post_url (required for single mode)".into()))?;
            let post_url = parse_post_url(post, api.profile_base())?;
            download_single_post(&api, &config, &post_url).await?;
            Ok(exit_codes::SUCCESS)
        }
        DownloadMode::Feed => run_feeds(&api, &config).await,
    }
}

/// Process every configured profile, one after another.
async fn run_feeds(api: &InstaApi, config: &Config) -> Result<i32> {
    let mut global_state = GlobalState::default();
    let mut last_error = None;

    for username in &config.targeted_user.usernames {
        let username = clean_username(username);
        print_info(&format!("Processing user: {}", username));

        let mut state = DownloadState::new(username);
        match download_feed(api, config, &mut state).await {
            Ok(()) => {
                print_user_stats(&state);
                global_state.add_user_stats(&state);
            }
            Err(e) => {
                print_error(&format!("Failed to process {}: {}", username, e));
                global_state.mark_user_failed();
                last_error = Some(e);
            }
        }
    }

    print_global_stats(&global_state);

    match last_error {
        // Every profile failed: surface the error class.
        Some(e) if global_state.users_processed == 0 => Err(e),
        Some(_) => Ok(exit_codes::SOME_USERS_FAILED),
        None => Ok(exit_codes::SUCCESS),
    }
}
