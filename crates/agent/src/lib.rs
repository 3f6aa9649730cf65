//! The Troupe agent core.
//!
//! Everything between raw user text and the final answer string lives
//! here:
//! - [`classifier`]: one model call mapping text to a request category
//! - [`router`]: category → greeting / unsupported / persona decision
//! - [`parser`]: the free-text ReAct protocol parser and input decoder
//! - [`react`]: the bounded Thought → Action → Observation loop
//! - [`supervisor`]: the top-level dispatcher tying it all together

pub mod classifier;
pub mod parser;
pub mod prompt;
pub mod react;
pub mod router;
pub mod supervisor;
pub mod testing;

pub use classifier::{Category, Classifier};
pub use parser::{DecodedInput, Outcome, ParsedAction, decode_input, parse_response};
pub use react::AgentLoop;
pub use router::{Router, RoutingDecision};
pub use supervisor::Supervisor;
