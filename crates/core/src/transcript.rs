//! Transcript — the conversation accumulated within one loop invocation.
//!
//! An ordered sequence of turns, each either a raw model response or a
//! synthesized `Observation: …` string. Grows monotonically while the
//! loop runs and is discarded when it terminates; there is no
//! cross-request memory. Length is bounded by 2× the iteration cap
//! (one response plus one observation per iteration).

/// The turn sequence for a single ReAct invocation.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    turns: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a raw model response.
    pub fn push_response(&mut self, response: impl Into<String>) {
        self.turns.push(response.into());
    }

    /// Append a synthesized observation. The `Observation:` prefix is
    /// added here so callers pass only the result text.
    pub fn push_observation(&mut self, result: &str) {
        self.turns.push(format!("Observation: {result}"));
    }

    /// Render the transcript for prompt concatenation, one turn per line
    /// block, in insertion order.
    pub fn render(&self) -> String {
        self.turns.join("\n")
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
