//! SynthClient — the remote music-synthesis collaborator.
//!
//! The music tools never talk HTTP themselves; they go through this
//! trait so tests can swap in a fake. The production implementation
//! posts to a synthesis endpoint and returns raw audio bytes.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Failure modes of the synthesis service, kept coarse on purpose: the
/// music tool maps each variant to a user-facing recovery hint.
#[derive(Debug, Clone, Error)]
pub enum SynthError {
    #[error("synthesis quota exceeded")]
    Quota,

    #[error("synthesis request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("synthesis failed: {0}")]
    Failed(String),
}

/// A remote service that turns style tags and lyrics into audio.
#[async_trait]
pub trait SynthClient: Send + Sync {
    async fn synthesize(
        &self,
        tags: &str,
        lyrics: &str,
        duration: u32,
    ) -> std::result::Result<Vec<u8>, SynthError>;
}

/// HTTP implementation against a synthesis endpoint that accepts
/// `{tags, lyrics, duration}` and responds with audio bytes.
pub struct HttpSynthClient {
    url: String,
    client: reqwest::Client,
}

impl HttpSynthClient {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl SynthClient for HttpSynthClient {
    async fn synthesize(
        &self,
        tags: &str,
        lyrics: &str,
        duration: u32,
    ) -> Result<Vec<u8>, SynthError> {
        debug!(duration, "Sending synthesis request");

        let body = serde_json::json!({
            "tags": tags,
            "lyrics": lyrics,
            "duration": duration,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthError::Timeout
                } else {
                    SynthError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 || status == 503 {
            return Err(SynthError::Quota);
        }
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(SynthError::Failed(format!("status {status}: {message}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// A synth that returns fixed bytes. For tests.
pub struct FakeSynth {
    bytes: Vec<u8>,
}

impl FakeSynth {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Default for FakeSynth {
    fn default() -> Self {
        Self::new(b"ID3 fake audio".to_vec())
    }
}

#[async_trait]
impl SynthClient for FakeSynth {
    async fn synthesize(&self, _: &str, _: &str, _: u32) -> Result<Vec<u8>, SynthError> {
        Ok(self.bytes.clone())
    }
}

/// A synth that always fails with the given error. For tests.
pub struct FailingSynth {
    error: SynthError,
}

impl FailingSynth {
    pub fn new(error: SynthError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl SynthClient for FailingSynth {
    async fn synthesize(&self, _: &str, _: &str, _: u32) -> Result<Vec<u8>, SynthError> {
        Err(self.error.clone())
    }
}
