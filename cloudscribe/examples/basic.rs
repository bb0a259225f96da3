//! Transcribe a local audio file and print the text.
//!
//! Usage: API_TOKEN=... cargo run --example basic -- path/to/audio.mp3

#[tokio::main]
async fn main() -> cloudscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: basic <audio-file>");

    let transcript = cloudscribe::transcribe_file(&path).await?;

    println!("{}", transcript.text());

    Ok(())
}
