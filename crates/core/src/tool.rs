//! Tool trait — the abstraction over persona capabilities.
//!
//! Tools are what give a persona the ability to act: generate music,
//! process a payment, post to social media. The loop never inspects a
//! concrete tool beyond its name; dispatch is an exact string match
//! against the persona's [`ToolSet`].

use crate::error::ToolError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// The core Tool trait.
///
/// Each tool implements this trait and is registered into a persona's
/// [`ToolSet`]. Input is a JSON object (string keys, arbitrary values);
/// output is always a plain string fed back into the transcript as an
/// observation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "generate_music").
    fn name(&self) -> &str;

    /// A description of what this tool does (rendered into the prompt).
    fn description(&self) -> &str;

    /// Execute the tool with the given input.
    async fn invoke(&self, input: Map<String, Value>) -> std::result::Result<String, ToolError>;
}

/// An ordered set of tools owned by one persona.
///
/// Registration order is preserved because the tool list is rendered
/// into the system prompt in order. Names are unique within a set;
/// registering a duplicate name replaces the earlier tool.
#[derive(Default)]
pub struct ToolSet {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Replaces any existing tool with the same name,
    /// keeping the original position.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Look up a tool by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// All tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Iterate over the tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
