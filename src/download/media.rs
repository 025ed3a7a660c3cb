//! Media file downloading.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::SnapApi;
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Stream a remote file to disk, returning the number of bytes written.
///
/// The body is written to `<name>.part` and renamed into place once complete.
/// On failure the partial file is removed, so `output_path` only ever holds a
/// finished download.
pub async fn download_to_file(api: &SnapApi, url: &str, output_path: &Path) -> Result<u64> {
    let response = api.download_file(url).await?;
    let part_path = partial_path(output_path);

    match write_body(response, &part_path).await {
        Ok(downloaded) => {
            tokio::fs::rename(&part_path, output_path).await?;
            tracing::debug!("Wrote {} bytes to {}", downloaded, output_path.display());
            Ok(downloaded)
        }
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(&part_path).await {
                tracing::warn!(
                    "Failed to remove partial file {}: {}",
                    part_path.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

/// Sibling path a download is staged at before it completes.
fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    output_path.with_file_name(name)
}

async fn write_body(response: Response, path: &Path) -> Result<u64> {
    let content_length = response.content_length();
    let progress = content_length
        .filter(|len| *len > PROGRESS_THRESHOLD)
        .map(create_download_bar);

    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Serve one HTTP response announcing `declared` body bytes, then send
    /// `body` one byte at a time with `gap` between bytes and close.
    async fn trickle_server(declared: usize, body: &'static [u8], gap: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                declared
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();

            for byte in body {
                tokio::time::sleep(gap).await;
                if socket.write_all(&[*byte]).await.is_err() {
                    return;
                }
                let _ = socket.flush().await;
            }
        });

        format!("http://{}/media.mp4", addr)
    }

    fn api_with_timeout(secs: u64) -> SnapApi {
        SnapApi::new(&ApiConfig {
            timeout_secs: secs,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_download_to_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/a.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"video-bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.mp4");
        let api = SnapApi::new(&ApiConfig::default()).unwrap();

        let written = download_to_file(&api, &format!("{}/media/a.mp4", server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&target).unwrap(), b"video-bytes");
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/out/abc/abc.mp4")),
            Path::new("/out/abc/abc.mp4.part")
        );
    }

    #[tokio::test]
    async fn test_slow_steady_body_outlives_timeout() {
        // 8 bytes over ~2.4s against a 1s timeout, never idle for more than 300ms
        let url = trickle_server(8, b"abcdefgh", Duration::from_millis(300)).await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("slow.mp4");

        let written = download_to_file(&api_with_timeout(1), &url, &target)
            .await
            .unwrap();

        assert_eq!(written, 8);
        assert_eq!(std::fs::read(&target).unwrap(), b"abcdefgh");
        assert!(!partial_path(&target).exists());
    }

    #[tokio::test]
    async fn test_interrupted_body_leaves_no_file() {
        // Announces 8 bytes but closes after 4
        let url = trickle_server(8, b"abcd", Duration::from_millis(10)).await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cut.mp4");

        let result = download_to_file(&api_with_timeout(5), &url, &target).await;

        assert!(matches!(result, Err(Error::Download(_))));
        assert!(!target.exists());
        assert!(!partial_path(&target).exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
