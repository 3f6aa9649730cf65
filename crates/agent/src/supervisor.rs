//! Supervisor — the single entry point for a user request.
//!
//! Classifies, routes, and either answers directly (greetings and
//! out-of-scope questions get canned replies) or delegates to one of
//! three fixed personas and runs the ReAct loop for it. Loop failures
//! never escape: they are folded into an `Error in {persona}: …` string
//! so the caller always gets text back.

use crate::classifier::{Category, Classifier};
use crate::react::AgentLoop;
use crate::router::{Router, RoutingDecision};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use troupe_core::client::CompletionClient;
use troupe_core::record::RecordStore;
use troupe_core::Persona;
use troupe_tools::synth::SynthClient;
use troupe_tools::{billing_tools, marketing_tools, music_tools};

const GREETING_REPLY: &str = "Hello! I'm your AI assistant specialized in music generation, billing management, and social media marketing. How can I help you today?";

const CAPABILITIES_REPLY: &str = r#"I'm a specialized assistant for music generation, billing, and social media marketing.

I can help you with:
 Music Generation - Create songs in different moods (happy, sad, energetic, etc.)
 Billing & Payments - Process payments, manage subscriptions, check customer status
 Social Media - Post music to Twitter, Instagram, Facebook

Your question seems to be outside these areas. Is there something related to music, billing, or marketing I can help you with?"#;

/// Orchestrates classification, routing, and persona execution.
pub struct Supervisor {
    classifier: Classifier,
    agent_loop: AgentLoop,
    music: Persona,
    billing: Persona,
    marketing: Persona,
}

impl Supervisor {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        synth: Arc<dyn SynthClient>,
        store: Arc<dyn RecordStore>,
        music_dir: impl Into<PathBuf>,
        max_iterations: u32,
    ) -> Self {
        let music_dir = music_dir.into();

        let music = Persona::new(
            "Music Producer",
            "expert at generating AI music for various moods and styles",
            music_tools(synth, music_dir.clone()),
        );
        let billing = Persona::new(
            "Finance Manager",
            "expert at handling payments and subscription management",
            billing_tools(store),
        );
        let marketing = Persona::new(
            "Marketing Manager",
            "social media expert who promotes EXISTING music. CRITICAL: You do NOT generate music - that is the Music Producer's job! You ONLY use existing music files. Always start by using get_latest_music to find existing files, then optionally create samples, and post to social media.",
            marketing_tools(music_dir),
        );

        Self {
            classifier: Classifier::new(client.clone()),
            agent_loop: AgentLoop::new(client).with_max_iterations(max_iterations),
            music,
            billing,
            marketing,
        }
    }

    fn persona_for(&self, category: Category) -> &Persona {
        match category {
            Category::Billing => &self.billing,
            Category::Marketing => &self.marketing,
            // `Other` never reaches here via routing; the music persona
            // is the fallback for any future category.
            Category::Music | Category::Other => &self.music,
        }
    }

    /// Handle one user request end to end. Always returns text.
    pub async fn handle(&self, user_text: &str) -> String {
        let category = self.classifier.classify(user_text).await;
        info!(%category, "Supervisor routing request");

        match Router::route(category, user_text) {
            RoutingDecision::Greeting => GREETING_REPLY.into(),
            RoutingDecision::Unsupported => CAPABILITIES_REPLY.into(),
            RoutingDecision::Persona(cat) => {
                let persona = self.persona_for(cat);
                info!(persona = %persona.name, "Delegating request");

                match self.agent_loop.run(persona, user_text).await {
                    Ok(answer) => {
                        info!(persona = %persona.name, "Task completed");
                        answer
                    }
                    Err(e) => {
                        error!(persona = %persona.name, error = %e, "Persona execution failed");
                        format!("Error in {}: {e}", persona.name)
                    }
                }
            }
        }
    }
}
