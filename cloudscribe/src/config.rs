use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the API credential.
pub const TOKEN_ENV_VAR: &str = "API_TOKEN";

/// AssemblyAI v2 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com/v2";

/// Fixed delay between two status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Size of each piece read from disk and streamed to the upload endpoint (5 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 5_242_880;

/// API credential, sent verbatim in the `authorization` header.
///
/// The value is never printed by `Debug`.
#[derive(Clone)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap an explicit token. Empty or whitespace-only tokens are rejected.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Read the token from `API_TOKEN`.
    ///
    /// Callers that want `.env` support load it before calling this.
    pub fn from_env() -> Result<Self> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(value) => Self::new(value),
            Err(_) => Err(Error::MissingToken),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Builder for upload and polling options.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub base_url: String,
    pub poll_interval: Duration,
    /// Give up waiting after this long. The last sleep is cut short so the final
    /// poll happens at the deadline. `None` polls until the job finishes.
    pub timeout: Option<Duration>,
    pub chunk_size: usize,
    /// Draw an upload progress bar on stderr.
    pub progress: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: true,
        }
    }
}

impl TranscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root. Must be http:// or https://; a trailing slash is dropped.
    pub fn base_url(mut self, url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(Error::InvalidOption(format!(
                "base URL must start with http:// or https://: {url}"
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn poll_interval(mut self, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidOption("poll interval must be > 0".into()));
        }
        self.poll_interval = interval;
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidOption("chunk size must be > 0".into()));
        }
        self.chunk_size = size;
        Ok(self)
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
