//! ReAct execution loop — Thought → Action → Observation.
//!
//! Given a persona and a user request, the loop repeatedly prompts the
//! model, parses the response, executes the named tool, and feeds the
//! result back as an observation. It is bounded by a maximum iteration
//! count and built so that no malformed model output can crash it: every
//! degraded state either keeps the loop alive or terminates it with an
//! explanatory string.

use crate::parser::{Outcome, parse_response};
use crate::prompt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use troupe_core::client::CompletionClient;
use troupe_core::{Persona, Result, Transcript};

/// The fixed reply when the iteration budget runs out.
pub const INCOMPLETE_REPLY: &str =
    "Task incomplete - max iterations reached. Please simplify the request.";

/// The bounded ReAct loop runner.
pub struct AgentLoop {
    client: Arc<dyn CompletionClient>,
    max_iterations: u32,
}

impl AgentLoop {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            max_iterations: 10,
        }
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the loop for one request. Returns the final textual answer.
    ///
    /// Tool-level failures are absorbed as observations; only model
    /// client failures propagate as errors (the supervisor labels them).
    pub async fn run(&self, persona: &Persona, user_text: &str) -> Result<String> {
        let base_prompt = prompt::render(persona, user_text);
        let mut transcript = Transcript::new();

        info!(persona = %persona.name, max_iter = self.max_iterations, "ReAct loop starting");

        for iteration in 1..=self.max_iterations {
            debug!(iteration, "ReAct iteration");

            let full_prompt = if transcript.is_empty() {
                base_prompt.clone()
            } else {
                format!("{base_prompt}\n\n{}", transcript.render())
            };

            let response = self.client.complete(&full_prompt).await?;

            match parse_response(&response) {
                Outcome::Final(answer) => {
                    info!(iteration, "ReAct loop completed");
                    return Ok(answer);
                }
                Outcome::Bare(answer) => {
                    debug!("No clear action format; returning response as-is");
                    return Ok(answer);
                }
                Outcome::Retry { correction } => {
                    warn!(%correction, "Format violation; prompting the model to correct");
                    transcript.push_response(response);
                    transcript.push_observation(&correction);
                }
                Outcome::Action(action) => {
                    let Some(tool) = persona.tools.get(&action.tool_name) else {
                        // Fatal: a persona that invents tools will keep
                        // inventing them, so stop here instead of burning
                        // the rest of the budget.
                        warn!(tool = %action.tool_name, "Unknown tool referenced; terminating");
                        return Ok(format!(
                            "Unknown tool '{}'. Available: [{}]",
                            action.tool_name,
                            persona.tools.names().join(", ")
                        ));
                    };

                    debug!(tool = %action.tool_name, "Executing tool");
                    let observation = match tool.invoke(action.tool_input).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(tool = %action.tool_name, error = %e, "Tool execution failed");
                            format!("Tool Error: {e}")
                        }
                    };

                    transcript.push_response(response);
                    transcript.push_observation(&observation);
                }
            }
        }

        warn!(max_iter = self.max_iterations, "Max iterations reached");
        Ok(INCOMPLETE_REPLY.into())
    }
}
