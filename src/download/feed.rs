//! Feed download logic.

use crate::api::InstaApi;
use crate::config::Config;
use crate::download::media::download_target;
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::feed::FeedPaginator;
use crate::media::DownloadTarget;
use crate::output::{create_spinner, print_node};

/// Page through a profile's feed, downloading or listing every item.
///
/// A page failure ends the walk with an error. A failed item download is
/// logged and counted, and the walk continues.
pub async fn download_feed(
    api: &InstaApi,
    config: &Config,
    state: &mut DownloadState,
) -> Result<()> {
    let root = config.download_directory();
    let show_downloads = config.options.show_downloads;
    let mut paginator = FeedPaginator::new(api, &state.username, config.options.continuation);

    tracing::info!("Fetching feed for {}...", state.username);

    loop {
        let spinner = show_downloads.then(|| {
            create_spinner(&format!(
                "Fetching page {} of {}",
                paginator.pages_fetched() + 1,
                state.username
            ))
        });
        let batch = paginator.next_batch().await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let Some(nodes) = batch? else {
            break;
        };

        state.pages_fetched = paginator.pages_fetched();
        if state.user_id.is_none() {
            state.user_id = paginator.user_id().map(str::to_string);
        }

        for node in &nodes {
            state.items_seen += 1;

            if !config.options.download_feed_media {
                print_node(node);
                continue;
            }

            let target = DownloadTarget::from_node(node);
            match download_target(api, &root, &target, show_downloads).await {
                Ok(path) => {
                    if node.is_video {
                        state.increment_vid();
                    } else {
                        state.increment_pic();
                    }
                    if show_downloads {
                        tracing::info!("Downloaded: {}", path.display());
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to download {}: {}", node.shortcode, e);
                    state.increment_failed();
                }
            }
        }
    }

    tracing::info!(
        "Feed complete for {}: {} items over {} pages, {} downloaded",
        state.username,
        state.items_seen,
        state.pages_fetched,
        state.total_downloaded()
    );

    Ok(())
}
