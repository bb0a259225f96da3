use std::path::Path;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{ApiToken, TranscribeOptions};
use crate::error::{Error, Result};
use crate::types::{CreateTranscriptRequest, Transcript, TranscriptStatus};
use crate::upload;

/// Client for the hosted transcription API.
///
/// One run drives exactly one job: upload, create, then poll until the job
/// completes or fails.
pub struct Client {
    http: reqwest::Client,
    token: ApiToken,
    options: TranscribeOptions,
}

impl Client {
    pub fn new(token: ApiToken, options: TranscribeOptions) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            options,
        }
    }

    pub fn options(&self) -> &TranscribeOptions {
        &self.options
    }

    /// Upload a local file. Returns the URL to pass to [`Client::create_transcript`].
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<String> {
        upload::upload_file(&self.http, &self.token, path.as_ref(), &self.options).await
    }

    /// Submit a transcription job for media at `audio_url`.
    pub async fn create_transcript(&self, audio_url: &str) -> Result<Transcript> {
        info!("transcribing audio, this might take a moment");

        let response = self
            .http
            .post(self.options.endpoint("transcript"))
            .header(AUTHORIZATION, self.token.as_str())
            .json(&CreateTranscriptRequest { audio_url })
            .send()
            .await?;

        let transcript: Transcript = read_json(response).await?;

        info!(
            id = %transcript.id,
            language = transcript.language_code.as_deref().unwrap_or("unknown"),
            "transcript job created"
        );
        Ok(transcript)
    }

    /// Fetch the current state of a job.
    pub async fn get_transcript(&self, id: &str) -> Result<Transcript> {
        let response = self
            .http
            .get(self.options.endpoint(&format!("transcript/{id}")))
            .header(AUTHORIZATION, self.token.as_str())
            .send()
            .await?;

        read_json(response).await
    }

    /// Poll a job every `poll_interval` until it reaches a terminal state.
    ///
    /// `error` aborts at once with the remote message; no further request is made.
    /// Without a `timeout` this waits for as long as the job stays queued or processing.
    pub async fn wait_for_completion(&self, id: &str) -> Result<Transcript> {
        let started = Instant::now();

        loop {
            let transcript = self.get_transcript(id).await?;
            debug!(%id, status = ?transcript.status, "polled transcript");

            match transcript.status {
                TranscriptStatus::Completed => {
                    if transcript.text().is_empty() {
                        warn!(%id, "job completed without any text");
                    }
                    info!(%id, chars = transcript.text().len(), "transcription completed");
                    return Ok(transcript);
                }
                TranscriptStatus::Error => {
                    let message = transcript
                        .error
                        .unwrap_or_else(|| "no error message returned".to_string());
                    return Err(Error::TranscriptionFailed(message));
                }
                TranscriptStatus::Queued
                | TranscriptStatus::Processing
                | TranscriptStatus::Unknown => {}
            }

            let mut pause = self.options.poll_interval;
            if let Some(limit) = self.options.timeout {
                let waited = started.elapsed();
                if waited >= limit {
                    return Err(Error::Timeout {
                        id: id.to_string(),
                        waited,
                    });
                }
                // Last poll lands on the deadline, not up to one interval past it.
                pause = pause.min(limit - waited);
            }

            tokio::time::sleep(pause).await;
        }
    }

    /// Create a job for `audio_url` and wait for its result.
    pub async fn transcribe(&self, audio_url: &str) -> Result<Transcript> {
        self.transcribe_with(audio_url, |_| {}).await
    }

    /// Like [`Client::transcribe`], but hands the freshly created job to
    /// `on_created` before polling starts.
    pub async fn transcribe_with(
        &self,
        audio_url: &str,
        on_created: impl FnOnce(&Transcript),
    ) -> Result<Transcript> {
        let job = self.create_transcript(audio_url).await?;
        on_created(&job);
        let mut transcript = self.wait_for_completion(&job.id).await?;
        if transcript.language_code.is_none() {
            transcript.language_code = job.language_code;
        }
        Ok(transcript)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(Error::Api { status, body });
    }
    Ok(serde_json::from_str(&body)?)
}
