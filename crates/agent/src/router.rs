//! Routing — category plus greeting detection to a dispatch decision.
//!
//! `Other` splits two ways: text containing a greeting word gets a
//! canned friendly reply, everything else gets the capabilities notice.
//! The three specialist categories route to their persona.

use crate::classifier::Category;

/// Substrings that mark a request as social pleasantry rather than an
/// out-of-scope question.
const GREETING_WORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "thanks",
    "thank you",
    "bye",
    "good morning",
    "good evening",
];

/// Where a request goes after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Canned greeting reply, no agent involved.
    Greeting,
    /// Canned capabilities reply, no agent involved.
    Unsupported,
    /// Delegate to the persona for this category.
    Persona(Category),
}

/// Stateless routing policy.
pub struct Router;

impl Router {
    /// Decide the dispatch target for a classified request.
    pub fn route(category: Category, user_text: &str) -> RoutingDecision {
        match category {
            Category::Other => {
                let lowered = user_text.to_lowercase();
                if GREETING_WORDS.iter().any(|w| lowered.contains(w)) {
                    RoutingDecision::Greeting
                } else {
                    RoutingDecision::Unsupported
                }
            }
            specialist => RoutingDecision::Persona(specialist),
        }
    }
}
