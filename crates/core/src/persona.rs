//! Persona — a named role with a fixed tool set.
//!
//! One persona exists per request category. Personas are immutable after
//! construction and owned exclusively by the routing layer.

use crate::tool::ToolSet;

/// A specialized agent identity: who it is, what it does, and the tools
/// it may call.
pub struct Persona {
    pub name: String,
    pub role: String,
    pub tools: ToolSet,
}

impl Persona {
    pub fn new(name: impl Into<String>, role: impl Into<String>, tools: ToolSet) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            tools,
        }
    }
}
