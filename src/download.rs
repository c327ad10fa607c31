//! HTTP file downloader.
//!
//! Streams a response body to disk. The body is written to `<dest>.part`
//! first and renamed onto `dest` only after the whole body has arrived, so
//! an interrupted download never leaves a truncated file at `dest`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, Url};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const PARTIAL_SUFFIX: &str = ".part";

/// Options for [`download_file_with`].
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Total request timeout, including reading the body.
    pub timeout: Duration,
    /// `User-Agent` header sent with the request.
    pub user_agent: String,
    /// Replace `dest` if it already exists.
    pub overwrite: bool,
    /// Create missing parent directories of `dest`.
    pub create_dirs: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            overwrite: false,
            create_dirs: true,
        }
    }
}

impl DownloadOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

/// Downloads `url` to `dest` with default options.
///
/// Returns the number of bytes written. See [`download_file_with`].
pub async fn download_file(url: &str, dest: impl AsRef<Path>) -> Result<u64> {
    download_file_with(url, dest, &DownloadOptions::default()).await
}

/// Downloads `url` to `dest`.
///
/// # Errors
/// - [`Error::InvalidUrl`] / [`Error::UnsupportedScheme`] for a bad URL.
/// - [`Error::DestinationExists`] if `dest` exists and `overwrite` is off.
/// - [`Error::Status`] for a non-2xx response.
/// - [`Error::Http`] for connection, timeout or body read failures.
/// - [`Error::Io`] for filesystem failures.
///
/// On any error after the request is sent, the partial file is removed and
/// `dest` is left as it was.
#[instrument(skip_all, fields(url = %url))]
pub async fn download_file_with(
    url: &str,
    dest: impl AsRef<Path>,
    options: &DownloadOptions,
) -> Result<u64> {
    let dest = dest.as_ref();
    let url = parse_url(url)?;

    if !options.overwrite && tokio::fs::try_exists(dest).await? {
        return Err(Error::DestinationExists(dest.to_path_buf()));
    }
    let part = partial_path(dest)?;

    if options.create_dirs {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()?;

    info!(dest = %dest.display(), "Starting download");
    let mut response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Download rejected by server");
        return Err(Error::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let written = match write_body(&mut response, &part).await {
        Ok(n) => n,
        Err(e) => {
            remove_partial(&part).await;
            return Err(e);
        }
    };

    if let Err(e) = tokio::fs::rename(&part, dest).await {
        remove_partial(&part).await;
        return Err(e.into());
    }

    info!(bytes = written, dest = %dest.display(), "Download complete");
    Ok(written)
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::UnsupportedScheme(other.to_string())),
    }
}

fn partial_path(dest: &Path) -> Result<PathBuf> {
    let mut name: OsString = dest
        .file_name()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("destination has no file name: {}", dest.display()),
            )
        })?
        .to_os_string();
    name.push(PARTIAL_SUFFIX);
    Ok(dest.with_file_name(name))
}

async fn write_body(response: &mut reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        debug!(bytes = written, "Received chunk");
    }
    file.flush().await?;
    Ok(written)
}

async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), "Failed to remove partial download: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Serves a single canned HTTP response and returns the URL to fetch.
    async fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/file.txt")
    }

    #[tokio::test]
    async fn test_download_success() {
        init_tracing();
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 16\r\nConnection: close\r\n\r\nhello lighthouse",
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");

        let written = download_file(&url, &dest).await.unwrap();

        assert_eq!(written, 16);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "hello lighthouse");
        assert!(!dir.path().join("out.txt.part").exists());
    }

    #[tokio::test]
    async fn test_download_creates_parent_dirs() {
        let url =
            serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok").await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a").join("b").join("out.bin");

        let written = download_file(&url, &dest).await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(std::fs::read(&dest).unwrap(), b"ok");
    }

    #[tokio::test]
    async fn test_download_missing_parent_without_create_dirs() {
        let url =
            serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok").await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.bin");
        let options = DownloadOptions::default().with_create_dirs(false);

        let err = download_file_with(&url, &dest, &options).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)), "got {err:?}");
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_not_found() {
        init_tracing();
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");

        let err = download_file(&url, &dest).await.unwrap_err();

        match &err {
            Error::Status { status, url } => {
                assert_eq!(*status, 404);
                assert!(url.ends_with("/file.txt"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(!err.is_retryable());
        assert!(!dest.exists());
        assert!(!dir.path().join("out.txt.part").exists());
    }

    #[tokio::test]
    async fn test_download_server_error_retryable() {
        let url = serve_once(
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let dir = tempfile::tempdir().unwrap();

        let err = download_file(&url, dir.path().join("x")).await.unwrap_err();

        assert!(matches!(err, Error::Status { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_download_truncated_body_cleans_up() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");

        let err = download_file(&url, &dest).await.unwrap_err();

        assert!(matches!(err, Error::Http(ref e) if e.is_body()), "got {err:?}");
        assert!(err.is_retryable());
        assert!(!dest.exists());
        assert!(!dir.path().join("out.txt.part").exists());
    }

    #[tokio::test]
    async fn test_download_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let dir = tempfile::tempdir().unwrap();

        let err = download_file(&format!("http://{addr}/"), dir.path().join("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Http(_)), "got {err:?}");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_download_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let err = download_file("not a url", dir.path().join("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_download_unsupported_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let err = download_file("ftp://example.com/file", dir.path().join("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_download_refuses_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("keep.txt");
        std::fs::write(&dest, "original").unwrap();

        let err = download_file("http://127.0.0.1:9/never", &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DestinationExists(ref p) if p == &dest));
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "original");
    }

    #[tokio::test]
    async fn test_download_overwrite() {
        let url =
            serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nConnection: close\r\n\r\nnew").await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("replace.txt");
        std::fs::write(&dest, "old contents").unwrap();
        let options = DownloadOptions::default()
            .with_overwrite(true)
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0");

        let written = download_file_with(&url, &dest, &options).await.unwrap();

        assert_eq!(written, 3);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_partial_path() {
        let part = partial_path(Path::new("/tmp/data.csv")).unwrap();
        assert_eq!(part, PathBuf::from("/tmp/data.csv.part"));
        assert!(partial_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_default_options() {
        let options = DownloadOptions::default();
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
        assert!(!options.overwrite);
        assert!(options.create_dirs);
        assert!(options.user_agent.starts_with("lighthouse-utils/"));
    }
}
