//! Test doubles for the agent core.

use async_trait::async_trait;
use std::sync::Mutex;
use troupe_core::client::CompletionClient;
use troupe_core::error::ClientError;

/// A mock client that returns a sequence of scripted results.
///
/// Each call to `complete` returns the next result in the queue and
/// records the prompt it was given. Panics if more calls are made than
/// results provided.
pub struct ScriptedClient {
    results: Mutex<Vec<Result<String, ClientError>>>,
    prompts: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
}

impl ScriptedClient {
    pub fn new(responses: &[&str]) -> Self {
        Self::with_results(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(results: Vec<Result<String, ClientError>>) -> Self {
        Self {
            results: Mutex::new(results),
            prompts: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// How many completions were requested.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The prompt received by call `index` (zero-based).
    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let mut count = self.call_count.lock().unwrap();
        let results = self.results.lock().unwrap();

        if *count >= results.len() {
            panic!(
                "ScriptedClient: no more responses (call #{}, have {})",
                *count,
                results.len()
            );
        }

        self.prompts.lock().unwrap().push(prompt.to_string());
        let result = results[*count].clone();
        *count += 1;
        result
    }
}

/// A client whose every call fails with a network error.
pub struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ClientError> {
        Err(ClientError::Network("connection refused".into()))
    }
}
