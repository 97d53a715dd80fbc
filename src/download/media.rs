//! Media file downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::api::InstaApi;
use crate::error::DownloadError;
use crate::fs::paths::target_path;
use crate::media::DownloadTarget;
use crate::output::create_download_bar;

/// Minimum body size to show a progress bar (5 MB).
const PROGRESS_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Stream a target's media into `<root>/<owner_id>/<file_name>`.
///
/// The response status is checked before the filesystem is touched, so a
/// failed request leaves nothing behind. An existing file is truncated. A
/// failure while streaming may leave a partial file.
pub async fn download_target(
    api: &InstaApi,
    root: &Path,
    target: &DownloadTarget,
    show_progress: bool,
) -> Result<PathBuf, DownloadError> {
    if target.url.is_empty() {
        return Err(DownloadError::MissingUrl);
    }

    let output_path = target_path(root, target)
        .map_err(|e| DownloadError::InvalidDestination(e.to_string()))?;
    let target_dir = output_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| DownloadError::InvalidDestination(output_path.display().to_string()))?;

    let url = Url::parse(&target.url).map_err(|source| DownloadError::InvalidUrl {
        url: target.url.clone(),
        source,
    })?;

    let response = api
        .get_media(&url)
        .await
        .map_err(|source| DownloadError::Transport {
            url: target.url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            url: target.url.clone(),
            status,
        });
    }

    tokio::fs::create_dir_all(&target_dir)
        .await
        .map_err(|source| DownloadError::CreateDir {
            path: target_dir.clone(),
            source,
        })?;

    let mut file = File::create(&output_path)
        .await
        .map_err(|source| DownloadError::CreateFile {
            path: output_path.clone(),
            source,
        })?;

    let content_length = response.content_length();
    let progress = match content_length {
        Some(len) if show_progress && len > PROGRESS_THRESHOLD => Some(create_download_bar(len)),
        _ => None,
    };

    let write_error = |source: std::io::Error| DownloadError::Write {
        path: output_path.clone(),
        source,
    };

    let mut stream = response.into_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| DownloadError::Stream {
            url: target.url.clone(),
            source,
        })?;
        file.write_all(&chunk).await.map_err(write_error)?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await.map_err(write_error)?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    tracing::debug!("Wrote {} bytes to {}", downloaded, output_path.display());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::StatusCode;

    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use crate::config::NetworkConfig;

    const MEDIA_URL: &str = "https://cdn.example/x.jpg";

    fn setup() -> (Arc<FakeTransport>, InstaApi, tempfile::TempDir) {
        let transport = Arc::new(FakeTransport::new());
        let api = InstaApi::with_transport(transport.clone(), &NetworkConfig::default()).unwrap();
        (transport, api, tempfile::tempdir().unwrap())
    }

    fn target() -> DownloadTarget {
        DownloadTarget::new(MEDIA_URL, "ABC123.jpg", "375193502")
    }

    #[tokio::test]
    async fn test_writes_exact_body() {
        let (transport, api, root) = setup();
        let body: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        transport.route(MEDIA_URL, 200, body.clone());

        let path = download_target(&api, root.path(), &target(), false)
            .await
            .unwrap();
        assert_eq!(path, root.path().join("375193502").join("ABC123.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), body);
    }

    #[tokio::test]
    async fn test_not_found_creates_nothing() {
        let (transport, api, root) = setup();
        transport.route(MEDIA_URL, 404, "gone");

        match download_target(&api, root.path(), &target(), false).await {
            Err(DownloadError::Status { status, .. }) => assert_eq!(status, StatusCode::NOT_FOUND),
            other => panic!("expected status error, got {:?}", other),
        }
        assert!(!root.path().join("375193502").exists());
    }

    #[tokio::test]
    async fn test_missing_owner_is_rejected() {
        let (transport, api, root) = setup();
        transport.route(MEDIA_URL, 200, "bytes");
        let target = DownloadTarget::new(MEDIA_URL, "ABC123.jpg", "");

        assert!(matches!(
            download_target(&api, root.path(), &target, false).await,
            Err(DownloadError::InvalidDestination(_))
        ));
        assert!(transport.requested_urls().is_empty());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_url_is_rejected() {
        let (_transport, api, root) = setup();
        let target = DownloadTarget::new("", "ABC123.jpg", "375193502");
        assert!(matches!(
            download_target(&api, root.path(), &target, false).await,
            Err(DownloadError::MissingUrl)
        ));
    }

    #[tokio::test]
    async fn test_traversal_in_file_name_is_rejected() {
        let (_transport, api, root) = setup();
        let target = DownloadTarget::new(MEDIA_URL, "../escape.jpg", "375193502");
        assert!(matches!(
            download_target(&api, root.path(), &target, false).await,
            Err(DownloadError::InvalidDestination(_))
        ));
    }

    #[tokio::test]
    async fn test_existing_directory_and_file_are_reused() {
        let (transport, api, root) = setup();
        let dir = root.path().join("375193502");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("ABC123.jpg"), "a much longer previous body").unwrap();
        transport.route(MEDIA_URL, 200, "new");

        let path = download_target(&api, root.path(), &target(), false)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let (transport, api, root) = setup();
        transport.fail(MEDIA_URL, "connection reset");

        assert!(matches!(
            download_target(&api, root.path(), &target(), false).await,
            Err(DownloadError::Transport { .. })
        ));
        assert!(!root.path().join("375193502").exists());
    }
}
