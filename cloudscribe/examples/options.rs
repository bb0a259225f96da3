//! Drive the upload/create/poll steps by hand with custom options.
//!
//! Usage: API_TOKEN=... cargo run --example options -- path/to/audio.mp3

use std::time::Duration;

use cloudscribe::{ApiToken, Client, TranscribeOptions};

#[tokio::main]
async fn main() -> cloudscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: options <audio-file>");

    let opts = TranscribeOptions::new()
        .poll_interval(Duration::from_secs(5))?
        .chunk_size(1024 * 1024)?
        .timeout(Some(Duration::from_secs(30 * 60)));

    let client = Client::new(ApiToken::from_env()?, opts);

    let upload_url = client.upload_file(&path).await?;
    println!("uploaded to {upload_url}");

    let job = client.create_transcript(&upload_url).await?;
    println!("job {} ({:?})", job.id, job.status);

    let transcript = client.wait_for_completion(&job.id).await?;
    println!("{}", transcript.to_json_pretty()?);

    Ok(())
}
