//! System prompt rendering for the ReAct loop.
//!
//! One persona, one template. The rules block exists because free-text
//! models reliably try to chain multiple actions, invent observations,
//! or mix an action with a final answer — the parser tolerates all of
//! that, but the prompt reduces how often it has to.

use troupe_core::Persona;

/// Render the fixed system instructions for one request.
pub fn render(persona: &Persona, user_text: &str) -> String {
    let tools_desc = persona
        .tools
        .iter()
        .map(|t| format!("- {}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are {name}, a {role}.

Your available tools:
{tools_desc}

User request: {user_text}

CRITICAL RULES - READ CAREFULLY:
1. Execute ONE tool at a time - NEVER write multiple actions
2. After writing ONE Action, STOP immediately and wait for Observation
3. DO NOT write "Observation:" yourself - the system provides it
4. DO NOT predict or imagine tool results
5. Only write "Final Answer:" after receiving ALL Observations

FORMAT - Use EXACTLY this:
Thought: [one sentence about what to do next]
Action: [tool name]
Action Input: [JSON input]

STOP HERE! Do not write anything else! Wait for the Observation!

When the task is complete, respond with:
Final Answer: [your complete answer to the user]"#,
        name = persona.name,
        role = persona.role,
    )
}
