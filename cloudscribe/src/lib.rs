//! Hosted transcription client — local file in, transcript text out.
//!
//! **cloudscribe** runs the whole round trip against an AssemblyAI-style API:
//! streaming the file to the upload endpoint in 5 MiB chunks, creating a
//! transcription job for the uploaded media, polling the job every 3 seconds
//! until it completes or fails, and writing the text next to the input.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> cloudscribe::Result<()> {
//! // Reads the credential from API_TOKEN
//! let transcript = cloudscribe::transcribe_file("meeting.mp3").await?;
//! println!("{}", transcript.text());
//!
//! // Save it as meeting.mp3.txt
//! let out = cloudscribe::output::default_output_path("meeting.mp3");
//! cloudscribe::output::write_transcript(&out, &transcript)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod types;
pub(crate) mod upload;

#[cfg(test)]
mod fake_api;

pub use client::Client;
pub use config::{ApiToken, TranscribeOptions};
pub use error::{Error, Result};
pub use types::{Transcript, TranscriptStatus};

use std::path::Path;

/// Transcribe a local audio/video file with default options and the token from `API_TOKEN`.
pub async fn transcribe_file(path: impl AsRef<Path>) -> Result<Transcript> {
    let token = ApiToken::from_env()?;
    transcribe_file_with_options(path, token, &TranscribeOptions::default()).await
}

/// Transcribe a local audio/video file with custom options.
pub async fn transcribe_file_with_options(
    path: impl AsRef<Path>,
    token: ApiToken,
    options: &TranscribeOptions,
) -> Result<Transcript> {
    let client = Client::new(token, options.clone());

    let upload_url = client.upload_file(path).await?;

    client.transcribe(&upload_url).await
}

/// Transcribe media that is already reachable over HTTP(S), skipping the upload.
pub async fn transcribe_url(
    url: &str,
    token: ApiToken,
    options: &TranscribeOptions,
) -> Result<Transcript> {
    if !is_url(url) {
        return Err(Error::InvalidOption(format!(
            "invalid URL (must start with http:// or https://): {url}"
        )));
    }

    let client = Client::new(token, options.clone());
    client.transcribe(url.trim()).await
}

/// Whether `input` names remote media rather than a local file.
pub fn is_url(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.starts_with("http://") || trimmed.starts_with("https://")
}
