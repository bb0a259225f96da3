use std::path::Path;

use futures_util::{stream, Stream};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info};

use crate::config::{ApiToken, TranscribeOptions};
use crate::error::{Error, Result};
use crate::types::UploadResponse;

/// Stream a local file to the upload endpoint and return the URL the API
/// assigned to it.
///
/// The body is sent as raw bytes, `chunk_size` at a time. Anything other than
/// HTTP 200 is logged and returned as [`Error::Upload`]; there is no retry.
pub async fn upload_file(
    http: &reqwest::Client,
    token: &ApiToken,
    path: &Path,
    options: &TranscribeOptions,
) -> Result<String> {
    if !path.is_file() {
        return Err(Error::AudioNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "uploading file");

    let file = File::open(path).await?;
    let total_size = file.metadata().await?.len();
    let pb = progress_bar(total_size, path, options.progress);

    let body = reqwest::Body::wrap_stream(read_chunks(file, options.chunk_size, pb.clone()));

    let response = http
        .post(options.endpoint("upload"))
        .header(AUTHORIZATION, token.as_str())
        .header(CONTENT_TYPE, "application/octet-stream")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if status != StatusCode::OK {
        pb.abandon_with_message("Upload failed");
        error!("Error: {} - {}", status.as_u16(), text);
        return Err(Error::Upload { status, body: text });
    }

    pb.finish_with_message("Upload complete");

    let parsed: UploadResponse = serde_json::from_str(&text)?;
    let upload_url = parsed.upload_url.trim().to_string();
    if !(upload_url.starts_with("https://") || upload_url.starts_with("http://")) {
        return Err(Error::Upload {
            status,
            body: format!("malformed upload_url in response: {text}"),
        });
    }

    info!(%upload_url, size = total_size, "upload finished");
    Ok(upload_url)
}

/// Read `file` lazily in pieces of `chunk_size` bytes. Only the last piece may be shorter.
fn read_chunks(
    file: File,
    chunk_size: usize,
    pb: ProgressBar,
) -> impl Stream<Item = std::io::Result<Vec<u8>>> + Send + 'static {
    stream::try_unfold((file, pb), move |(mut file, pb)| async move {
        let mut chunk = Vec::with_capacity(chunk_size);
        (&mut file).take(chunk_size as u64).read_to_end(&mut chunk).await?;
        if chunk.is_empty() {
            return Ok::<_, std::io::Error>(None);
        }
        pb.inc(chunk.len() as u64);
        Ok(Some((chunk, (file, pb))))
    })
}

fn progress_bar(total_size: u64, path: &Path, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
            .expect("valid template")
            .progress_chars("#>-"),
    );
    pb.set_message(format!(
        "Uploading {}",
        path.file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));
    pb
}
