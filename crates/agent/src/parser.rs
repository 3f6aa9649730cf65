//! The free-text ReAct protocol parser.
//!
//! The model is an untrusted, non-deterministic text generator; this
//! module is the state machine that turns whatever it produced into one
//! of four outcomes the loop can act on. Every malformed shape has an
//! explicit fallback — nothing here returns an error.
//!
//! The expected wire format is line-oriented:
//!
//! ```text
//! Thought: one sentence of reasoning
//! Action: tool_name
//! Action Input: {"key": "value"}
//! ```
//!
//! or, to terminate:
//!
//! ```text
//! Final Answer: the answer text
//! ```

use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";
pub const ACTION_MARKER: &str = "Action:";
pub const ACTION_INPUT_MARKER: &str = "Action Input:";
pub const OBSERVATION_MARKER: &str = "Observation:";

/// A tool invocation extracted from a model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAction {
    pub tool_name: String,
    pub tool_input: Map<String, Value>,
}

/// What a single model response amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A terminal answer: the trimmed text after the final-answer marker.
    Final(String),
    /// A tool invocation to execute.
    Action(ParsedAction),
    /// No recognizable protocol at all — the whole response is returned
    /// verbatim as the answer (graceful degradation).
    Bare(String),
    /// A correctable format violation: the loop feeds `correction` back
    /// as an observation and gives the model another turn.
    Retry { correction: String },
}

/// The action-input payload after decoding.
///
/// `Raw` carries text that was not a JSON object; the loop hands it to
/// the tool as `{"input": <text>}` so single-parameter tools still work
/// when the model answers with a bare string.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedInput {
    Structured(Map<String, Value>),
    Raw(String),
}

impl DecodedInput {
    /// The input map the tool actually receives.
    pub fn into_map(self) -> Map<String, Value> {
        match self {
            DecodedInput::Structured(map) => map,
            DecodedInput::Raw(text) => {
                let mut map = Map::new();
                map.insert("input".into(), Value::String(text));
                map
            }
        }
    }
}

/// Classify one raw model response.
pub fn parse_response(response: &str) -> Outcome {
    // Terminal-answer detection comes first. An action marker *before*
    // the final-answer marker means the model tried to both act and
    // conclude in one response; the premature answer is ignored and the
    // embedded action still executes.
    if let Some(first) = response.find(FINAL_ANSWER_MARKER) {
        if response[..first].contains(ACTION_MARKER) {
            warn!("Model combined an action with Final Answer; executing the action instead");
        } else {
            // Split on the last occurrence, mirroring how a model that
            // repeats the marker means the final one.
            let last = response.rfind(FINAL_ANSWER_MARKER).unwrap_or(first);
            let answer = response[last + FINAL_ANSWER_MARKER.len()..].trim();
            return Outcome::Final(answer.to_string());
        }
    }

    // "Action: None" means the model is done but dodged the final-answer
    // form; nudge it rather than looking up a tool named "None".
    if let Some(line) = first_action_line(response)
        && is_null_token(value_after(line, ACTION_MARKER))
    {
        return Outcome::Retry {
            correction: "You cannot use 'Action: None'. If you are done, provide 'Final Answer:' instead.".into(),
        };
    }

    if response.contains(ACTION_MARKER) && response.contains(ACTION_INPUT_MARKER) {
        return parse_action(response);
    }

    // No protocol markers at all: the model ignored the format, so the
    // whole response is the answer.
    debug!("No action markers found; treating response as a direct answer");
    Outcome::Bare(response.to_string())
}

fn parse_action(response: &str) -> Outcome {
    let action_count = action_lines(response).count();
    if action_count > 1 {
        warn!(count = action_count, "Multiple actions in one response; honoring only the first");
    }
    if response.contains(OBSERVATION_MARKER) {
        warn!("Model fabricated an Observation; ignoring it");
    }

    let Some(action_line) = first_action_line(response) else {
        return Outcome::Retry {
            correction: "Invalid format. Use: Action: [tool_name]".into(),
        };
    };
    let tool_name = value_after(action_line, ACTION_MARKER).to_string();

    let Some(input_line) = response.lines().find(|l| l.contains(ACTION_INPUT_MARKER)) else {
        return Outcome::Retry {
            correction: "Invalid format. Use: Action Input: {...}".into(),
        };
    };
    let raw_input = value_after(input_line, ACTION_INPUT_MARKER);

    if is_null_token(raw_input) {
        return Outcome::Retry {
            correction: "Invalid Action Input. Provide valid JSON or {}.".into(),
        };
    }

    Outcome::Action(ParsedAction {
        tool_name,
        tool_input: decode_input(raw_input).into_map(),
    })
}

/// Decode an action-input payload.
///
/// Fallback ladder: empty / `{}` → empty map; JSON object → that map;
/// anything else (bad JSON, bare string, non-object JSON) → `Raw`.
pub fn decode_input(raw: &str) -> DecodedInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return DecodedInput::Structured(Map::new());
    }

    // Models like to wrap payloads in quotes; strip one layer before
    // attempting to parse. A real JSON object never starts with a quote,
    // so this cannot damage well-formed input.
    let unquoted = trimmed.trim_matches(|c| c == '"' || c == '\'');

    match serde_json::from_str::<Value>(unquoted) {
        Ok(Value::Object(map)) => DecodedInput::Structured(map),
        _ => DecodedInput::Raw(unquoted.to_string()),
    }
}

/// Lines that name an action, excluding the combined single-line form
/// (a line holding `Action Input:` is an input line, never a name line).
fn action_lines(response: &str) -> impl Iterator<Item = &str> {
    response
        .lines()
        .filter(|l| l.trim_start().starts_with(ACTION_MARKER) && !l.contains(ACTION_INPUT_MARKER))
}

fn first_action_line(response: &str) -> Option<&str> {
    action_lines(response).next()
}

/// The trimmed text after the first occurrence of `marker` in `line`.
fn value_after<'a>(line: &'a str, marker: &str) -> &'a str {
    match line.find(marker) {
        Some(idx) => line[idx + marker.len()..].trim(),
        None => "",
    }
}

fn is_null_token(value: &str) -> bool {
    ["none", "n/a", "null"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(outcome: Outcome) -> ParsedAction {
        match outcome {
            Outcome::Action(a) => a,
            other => panic!("Expected Action, got {other:?}"),
        }
    }

    // ── Terminal detection ──

    #[test]
    fn final_answer_returns_trimmed_tail() {
        let outcome = parse_response("Thought: all done\nFinal Answer:   The song is ready.  \n");
        assert_eq!(outcome, Outcome::Final("The song is ready.".into()));
    }

    #[test]
    fn repeated_final_answer_uses_last_occurrence() {
        let outcome =
            parse_response("Final Answer: draft\nFinal Answer: the real one");
        assert_eq!(outcome, Outcome::Final("the real one".into()));
    }

    #[test]
    fn action_before_final_answer_executes_the_action() {
        let response = "Thought: one more step\nAction: get_latest_music\nAction Input: {}\nFinal Answer: done!";
        let parsed = action(parse_response(response));
        assert_eq!(parsed.tool_name, "get_latest_music");
        assert!(parsed.tool_input.is_empty());
    }

    #[test]
    fn final_answer_before_action_is_terminal() {
        // The action marker appears after the final-answer marker, so the
        // terminal answer wins; the trailing text is part of the answer.
        let response = "Final Answer: done\nAction: whatever\nAction Input: {}";
        match parse_response(response) {
            Outcome::Final(answer) => assert!(answer.starts_with("done")),
            other => panic!("Expected Final, got {other:?}"),
        }
    }

    // ── Action parsing ──

    #[test]
    fn two_line_action_parses() {
        let response = "Thought: fetch the preset\nAction: get_music_mood_preset\nAction Input: {\"mood\": \"happy\"}";
        let parsed = action(parse_response(response));
        assert_eq!(parsed.tool_name, "get_music_mood_preset");
        assert_eq!(parsed.tool_input["mood"], "happy");
    }

    #[test]
    fn multiple_actions_honor_only_the_first() {
        let response = "Action: first_tool\nAction Input: {}\nAction: second_tool\nAction Input: {\"x\": 1}";
        let parsed = action(parse_response(response));
        assert_eq!(parsed.tool_name, "first_tool");
        assert!(parsed.tool_input.is_empty());
    }

    #[test]
    fn fabricated_observation_is_ignored() {
        let response = "Action: list_all_customers\nAction Input: {}\nObservation: 42 customers";
        let parsed = action(parse_response(response));
        assert_eq!(parsed.tool_name, "list_all_customers");
    }

    #[test]
    fn indented_action_line_is_found() {
        let response = "  Action: process_payment\n  Action Input: {\"amount\": 1.0}";
        let parsed = action(parse_response(response));
        assert_eq!(parsed.tool_name, "process_payment");
        assert_eq!(parsed.tool_input["amount"], 1.0);
    }

    #[test]
    fn combined_single_line_is_not_an_action_name_line() {
        // "Action: x Action Input: {}" on one line has no standalone
        // action-name line, so the parser asks for the two-line form.
        let response = "Action: generate_music Action Input: {}";
        assert_eq!(
            parse_response(response),
            Outcome::Retry {
                correction: "Invalid format. Use: Action: [tool_name]".into()
            }
        );
    }

    // ── Graceful degradation ──

    #[test]
    fn no_markers_returns_bare_response() {
        let response = "I'd love to help with that! Here are some thoughts on music.";
        assert_eq!(parse_response(response), Outcome::Bare(response.into()));
    }

    #[test]
    fn action_without_input_marker_is_bare() {
        let response = "Action: generate_music\nplease";
        assert_eq!(parse_response(response), Outcome::Bare(response.into()));
    }

    #[test]
    fn action_none_asks_for_final_answer() {
        let response = "Thought: nothing left\nAction: None\nAction Input: {}";
        match parse_response(response) {
            Outcome::Retry { correction } => assert!(correction.contains("'Action: None'")),
            other => panic!("Expected Retry, got {other:?}"),
        }
    }

    #[test]
    fn action_null_case_insensitive() {
        let response = "Action: NULL\nAction Input: {}";
        assert!(matches!(parse_response(response), Outcome::Retry { .. }));
    }

    #[test]
    fn null_action_input_asks_for_json() {
        let response = "Action: generate_music\nAction Input: None";
        match parse_response(response) {
            Outcome::Retry { correction } => assert!(correction.contains("Invalid Action Input")),
            other => panic!("Expected Retry, got {other:?}"),
        }
    }

    // ── Input decoding ──

    #[test]
    fn decode_empty_is_empty_map() {
        assert_eq!(decode_input(""), DecodedInput::Structured(Map::new()));
        assert_eq!(decode_input("  "), DecodedInput::Structured(Map::new()));
    }

    #[test]
    fn decode_empty_object_token() {
        assert_eq!(decode_input("{}"), DecodedInput::Structured(Map::new()));
    }

    #[test]
    fn decode_json_object() {
        let decoded = decode_input("{\"mood\": \"happy\", \"duration\": 15}");
        let map = decoded.into_map();
        assert_eq!(map["mood"], "happy");
        assert_eq!(map["duration"], 15);
    }

    #[test]
    fn decode_quoted_json_object() {
        let decoded = decode_input("'{\"mood\": \"sad\"}'");
        assert_eq!(decoded.into_map()["mood"], "sad");
    }

    #[test]
    fn decode_bare_string_falls_back_to_raw() {
        let decoded = decode_input("a happy song about summer");
        assert_eq!(decoded, DecodedInput::Raw("a happy song about summer".into()));
        let map = decoded.into_map();
        assert_eq!(map["input"], "a happy song about summer");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn decode_quoted_string_strips_quotes_then_raw() {
        let decoded = decode_input("\"happy\"");
        assert_eq!(decoded, DecodedInput::Raw("happy".into()));
    }

    #[test]
    fn decode_non_object_json_falls_back_to_raw() {
        assert_eq!(decode_input("[1, 2, 3]"), DecodedInput::Raw("[1, 2, 3]".into()));
        assert_eq!(decode_input("42"), DecodedInput::Raw("42".into()));
    }

    #[test]
    fn decode_malformed_json_falls_back_to_raw() {
        let decoded = decode_input("{\"mood\": happy}");
        assert!(matches!(decoded, DecodedInput::Raw(_)));
    }
}
