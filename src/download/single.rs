//! Single post download logic.

use std::path::PathBuf;

use url::Url;

use crate::api::InstaApi;
use crate::config::Config;
use crate::download::media::download_target;
use crate::error::Result;
use crate::media::extract;

/// Fetch a post page, extract its media target and download it.
pub async fn download_single_post(
    api: &InstaApi,
    config: &Config,
    post_url: &Url,
) -> Result<PathBuf> {
    tracing::info!("Downloading single post: {}", post_url);

    let markup = api.get_post_page(post_url).await?;
    let target = extract(post_url, &markup);

    tracing::info!("File name: {}, media URL: {}", target.file_name, target.url);

    let path = download_target(
        api,
        &config.download_directory(),
        &target,
        config.options.show_downloads,
    )
    .await?;

    tracing::info!("Downloaded: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use crate::error::{DownloadError, Error};

    const POST_URL: &str = "https://site.example/p/ABC123/";

    fn setup(root: &std::path::Path) -> (Arc<FakeTransport>, InstaApi, Config) {
        let mut config = Config::default();
        config.options.download_directory = Some(root.to_path_buf());
        config.options.show_downloads = false;

        let transport = Arc::new(FakeTransport::new());
        let api = InstaApi::with_transport(transport.clone(), &config.network).unwrap();
        (transport, api, config)
    }

    fn post_page(owner: Option<&str>) -> String {
        let owner = owner
            .map(|id| format!(r#"<meta property="instapp:owner_user_id" content="{}">"#, id))
            .unwrap_or_default();
        format!(
            r#"<html><head>
                <meta property="og:image" content="https://cdn.example/x.jpg">
                <meta property="og:url" content="{}">
                {}
            </head></html>"#,
            POST_URL, owner
        )
    }

    #[tokio::test]
    async fn test_post_lands_in_owner_dir() {
        let root = tempfile::tempdir().unwrap();
        let (transport, api, config) = setup(root.path());
        transport.route(POST_URL, 200, post_page(Some("375193502")));
        transport.route("https://cdn.example/x.jpg", 200, "jpeg bytes");

        let url = Url::parse(POST_URL).unwrap();
        let path = download_single_post(&api, &config, &url).await.unwrap();

        assert_eq!(path, root.path().join("375193502").join("ABC123.jpg"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "jpeg bytes");
        assert_eq!(
            transport.requested_urls(),
            [POST_URL, "https://cdn.example/x.jpg"]
        );
    }

    #[tokio::test]
    async fn test_missing_owner_fails_without_writing() {
        let root = tempfile::tempdir().unwrap();
        let (transport, api, config) = setup(root.path());
        transport.route(POST_URL, 200, post_page(None));
        transport.route("https://cdn.example/x.jpg", 200, "jpeg bytes");

        let url = Url::parse(POST_URL).unwrap();
        assert!(matches!(
            download_single_post(&api, &config, &url).await,
            Err(Error::Download(DownloadError::InvalidDestination(_)))
        ));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_post_page_error() {
        let root = tempfile::tempdir().unwrap();
        let (_transport, api, config) = setup(root.path());

        let url = Url::parse(POST_URL).unwrap();
        assert!(matches!(
            download_single_post(&api, &config, &url).await,
            Err(Error::Fetch { .. })
        ));
    }
}
