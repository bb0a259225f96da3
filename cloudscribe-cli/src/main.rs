use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use cloudscribe::{ApiToken, Client, TranscribeOptions};

#[derive(Parser)]
#[command(
    name = "cloudscribe",
    about = "Upload an audio/video file to a hosted transcription API and save the transcript"
)]
struct Cli {
    /// Local file path, or URL of media that is already online.
    input: String,

    /// Write the transcript here instead of <input-filename>.txt.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// API token (default: API_TOKEN from the environment or .env).
    #[arg(long)]
    api_key: Option<String>,

    /// API root.
    #[arg(long, default_value = cloudscribe::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds between status checks.
    #[arg(long, default_value = "3")]
    poll_interval: u64,

    /// Give up after this many seconds (default: wait forever).
    #[arg(long)]
    timeout: Option<u64>,

    /// Upload chunk size in bytes.
    #[arg(long, default_value_t = cloudscribe::config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Also print the full transcript object as JSON.
    #[arg(long)]
    json: bool,

    /// Hide the upload progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Don't echo the transcript text to stdout.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // A missing .env is fine; the token may come from the real environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cloudscribe=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let token = match &cli.api_key {
        Some(key) => ApiToken::new(key.as_str()),
        None => ApiToken::from_env(),
    };
    let token = match token {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let opts = match TranscribeOptions::new()
        .base_url(&cli.base_url)
        .and_then(|o| o.poll_interval(Duration::from_secs(cli.poll_interval)))
        .and_then(|o| o.chunk_size(cli.chunk_size))
    {
        Ok(o) => o
            .timeout(cli.timeout.map(Duration::from_secs))
            .progress(!cli.no_progress),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let input = cli.input.trim().to_string();

    let client = Client::new(token, opts);

    let audio_url = if cloudscribe::is_url(&input) {
        input.clone()
    } else {
        eprintln!("Uploading file: {input}");
        match client.upload_file(&input).await {
            Ok(url) => url,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    };

    eprintln!("Transcribing audio... This might take a moment.");
    let result = client
        .transcribe_with(&audio_url, |job| {
            eprintln!(
                "Detected Language {}",
                job.language_code.as_deref().unwrap_or("unknown")
            );
        })
        .await;

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if !cli.quiet {
        println!("{}", transcript.text());
    }

    if cli.json {
        match transcript.to_json_pretty() {
            Ok(j) => println!("{j}"),
            Err(e) => {
                eprintln!("JSON error: {e}");
                std::process::exit(1);
            }
        }
    }

    let path = cli
        .output
        .unwrap_or_else(|| cloudscribe::output::default_output_path(&input));

    if let Err(e) = cloudscribe::output::write_transcript(&path, &transcript) {
        eprintln!("Error writing to {}: {e}", path.display());
        std::process::exit(1);
    }
    eprintln!("Written to {}", path.display());
}
