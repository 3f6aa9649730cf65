//! Request classification — one model call, one word out.
//!
//! The classifier asks the model for a single category word and then
//! normalizes aggressively: anything that is not a lowercase letter is
//! stripped before matching, so `"Billing."` and `billing` land in the
//! same bucket. Any failure, of the model or of the match, degrades to
//! [`Category::Other`].

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use troupe_core::client::CompletionClient;

const CLASSIFIER_PROMPT: &str = r#"You are a request classifier. Analyze the user's request and respond with ONE word only.

Categories:
- "billing" → payments, fees, charges, subscriptions, customers, money, invoices, costs
- "music" → generating music, creating songs, composing, making tracks
- "marketing" → social media, posting, sharing, promoting on Twitter/Instagram/Facebook
- "other" → anything else (greetings, general questions, unrelated topics)

Respond with ONLY ONE WORD: billing, music, marketing, or other

User request: "#;

/// The request categories the system routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Billing,
    Music,
    Marketing,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Category::Billing => "billing",
            Category::Music => "music",
            Category::Marketing => "marketing",
            Category::Other => "other",
        };
        f.write_str(word)
    }
}

/// Classifies free-form user text into a [`Category`].
pub struct Classifier {
    client: Arc<dyn CompletionClient>,
}

impl Classifier {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Classify one request. Never fails: model errors and unrecognized
    /// responses both map to [`Category::Other`].
    pub async fn classify(&self, user_text: &str) -> Category {
        let prompt = format!("{CLASSIFIER_PROMPT}{user_text}");

        let raw = match self.client.complete(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Classification failed; defaulting to 'other'");
                return Category::Other;
            }
        };

        let word = normalize(&raw);
        let category = match word.as_str() {
            "billing" => Category::Billing,
            "music" => Category::Music,
            "marketing" => Category::Marketing,
            "other" => Category::Other,
            unexpected => {
                debug!(%unexpected, "Unrecognized classifier output; using 'other'");
                Category::Other
            }
        };

        debug!(%category, "Request classified");
        category
    }
}

/// Keep only ASCII lowercase letters so that punctuation, whitespace,
/// and casing cannot defeat the match.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingClient, ScriptedClient};

    #[tokio::test]
    async fn clean_category_word() {
        let client = Arc::new(ScriptedClient::new(&["music"]));
        let c = Classifier::new(client);
        assert_eq!(c.classify("make me a song").await, Category::Music);
    }

    #[tokio::test]
    async fn noisy_response_is_normalized() {
        let client = Arc::new(ScriptedClient::new(&["  Billing.\n"]));
        let c = Classifier::new(client);
        assert_eq!(c.classify("charge my card").await, Category::Billing);
    }

    #[tokio::test]
    async fn unrecognized_word_defaults_to_other() {
        let client = Arc::new(ScriptedClient::new(&["finance"]));
        let c = Classifier::new(client);
        assert_eq!(c.classify("pay my bill").await, Category::Other);
    }

    #[tokio::test]
    async fn multi_word_response_defaults_to_other() {
        // Normalization concatenates the letters, so a sentence never
        // matches a category word.
        let client = Arc::new(ScriptedClient::new(&["the category is music"]));
        let c = Classifier::new(client);
        assert_eq!(c.classify("song please").await, Category::Other);
    }

    #[tokio::test]
    async fn client_failure_defaults_to_other() {
        let c = Classifier::new(Arc::new(FailingClient));
        assert_eq!(c.classify("anything").await, Category::Other);
    }

    #[tokio::test]
    async fn prompt_includes_user_text() {
        let client = Arc::new(ScriptedClient::new(&["marketing"]));
        let c = Classifier::new(client.clone());
        c.classify("post my track to Instagram").await;
        assert!(client.prompt(0).contains("post my track to Instagram"));
        assert!(client.prompt(0).contains("ONLY ONE WORD"));
    }
}
