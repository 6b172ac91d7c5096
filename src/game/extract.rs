// Pulls a move and its rationale out of free-text model output.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::moves::Move;

pub const INVALID_FORMAT: &str = "Invalid response format.";
pub const PARSE_FAILED: &str = "Failed to parse response.";

lazy_static! {
    // Greedy: first `{` through last `}`, across newlines.
    static ref JSON_BLOCK: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// A move decoded from a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub mv: Move,
    pub reason: String,
    /// Set when the reply could not be decoded and the move fell back to
    /// cooperation.
    pub fallback: Option<&'static str>,
}

impl Extracted {
    fn fallback(reason: &'static str) -> Self {
        Self {
            mv: Move::Cooperate,
            reason: reason.to_string(),
            fallback: Some(reason),
        }
    }
}

/// Extract `{"move": ..., "reason": ...}` from a model reply.
///
/// Anything that cannot be decoded yields `Cooperate` with a diagnostic
/// reason. A missing `move` key is not a failure and also yields
/// `Cooperate`, keeping whatever `reason` was given.
pub fn extract_move(response: &str) -> Extracted {
    let Some(block) = JSON_BLOCK.find(response) else {
        return Extracted::fallback(INVALID_FORMAT);
    };

    let data = match serde_json::from_str::<Value>(block.as_str()) {
        Ok(Value::Object(map)) => map,
        _ => return Extracted::fallback(PARSE_FAILED),
    };

    let mv = match data.get("move") {
        None | Some(Value::Null) => Move::Cooperate,
        Some(Value::String(s)) => match Move::from_str_name(s) {
            Some(mv) => mv,
            None => return Extracted::fallback(PARSE_FAILED),
        },
        Some(_) => return Extracted::fallback(PARSE_FAILED),
    };

    let reason = match data.get("reason") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Extracted {
        mv,
        reason,
        fallback: None,
    }
}
