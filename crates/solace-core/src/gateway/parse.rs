//! Three-tier parsing of raw completion output.
//!
//! The model is asked for `{ "emotions": [...], "reply": "..." }` but is not
//! trusted to comply. Parsing is an explicit ordered chain of fallible
//! strategies, each returning a typed result or "no match":
//!
//! 1. [`parse_strict`] -- strict JSON parse of the first brace-delimited
//!    substring;
//! 2. [`scrape`] -- two independent regex extractions over the raw text;
//! 3. fixed defaults -- `["neutral"]` and [`DEFAULT_REPLY`].
//!
//! [`parse_reply`] runs the chain and normalizes the result; it never fails.

use regex::Regex;
use serde::Deserialize;

use std::sync::LazyLock;

/// Reply substituted when no strategy produces usable text.
pub const DEFAULT_REPLY: &str =
    "I understand how you're feeling. Would you like to talk more about this?";

/// A parsed bot reply: free text plus emotion labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub reply: String,
    pub emotions: Vec<String>,
}

/// Wire shape the model is prompted to produce.
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    emotions: Vec<String>,
    #[serde(default)]
    reply: String,
}

static EMOTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"emotions["\s]*:["\s]*\[([^\]]+)\]"#).expect("emotions pattern")
});

static REPLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"reply["\s]*:["\s]*"([^"]+)""#).expect("reply pattern"));

/// First brace-delimited substring of `raw`, greedy to the last `}`.
fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Tier 1: strict JSON parse of the first brace-delimited substring.
pub fn parse_strict(raw: &str) -> Option<BotReply> {
    let span = brace_span(raw)?;
    let parsed: RawReply = serde_json::from_str(span).ok()?;
    Some(BotReply {
        reply: parsed.reply,
        emotions: parsed.emotions,
    })
}

/// Tier 2: independent regex extractions of the emotions array and the
/// reply string. Returns `None` only when neither field matches.
pub fn scrape(raw: &str) -> Option<BotReply> {
    let emotions: Vec<String> = EMOTIONS_RE
        .captures(raw)
        .map(|caps| {
            caps[1]
                .split(',')
                .map(|e| e.trim().trim_matches('"').to_string())
                .filter(|e| !e.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let reply = REPLY_RE
        .captures(raw)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    if emotions.is_empty() && reply.is_empty() {
        return None;
    }
    Some(BotReply { reply, emotions })
}

/// Run the full chain over raw provider output.
///
/// Whatever the tiers produce is normalized so the result is always usable:
/// an empty emotion list becomes `["neutral"]`, a blank reply becomes
/// [`DEFAULT_REPLY`].
pub fn parse_reply(raw: &str) -> BotReply {
    let mut reply = parse_strict(raw)
        .or_else(|| scrape(raw))
        .unwrap_or_else(|| BotReply {
            reply: String::new(),
            emotions: Vec::new(),
        });

    if reply.emotions.is_empty() {
        reply.emotions = vec!["neutral".to_string()];
    }
    if reply.reply.trim().is_empty() {
        reply.reply = DEFAULT_REPLY.to_string();
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse_of_clean_json() {
        let raw = r#"{"emotions":["joy"],"reply":"Hello"}"#;
        let reply = parse_reply(raw);
        assert_eq!(reply.emotions, vec!["joy"]);
        assert_eq!(reply.reply, "Hello");
    }

    #[test]
    fn strict_parse_ignores_surrounding_prose() {
        let raw = "Sure, here you go:\n{\"emotions\": [\"sadness\", \"grief\"], \"reply\": \"That sounds heavy.\"}\nHope that helps!";
        let reply = parse_reply(raw);
        assert_eq!(reply.emotions, vec!["sadness", "grief"]);
        assert_eq!(reply.reply, "That sounds heavy.");
    }

    #[test]
    fn scrape_recovers_from_truncated_json() {
        // Unbalanced braces defeat the strict tier; the regexes still match.
        let raw = r#"{"emotions": ["fear", "nervousness"], "reply": "Take a breath"#;
        assert!(parse_strict(raw).is_none());
        let reply = parse_reply(raw);
        assert_eq!(reply.emotions, vec!["fear", "nervousness"]);
        // The reply string is unterminated, so the reply regex misses and the
        // default is substituted.
        assert_eq!(reply.reply, DEFAULT_REPLY);
    }

    #[test]
    fn scrape_recovers_reply_with_trailing_garbage() {
        let raw = r#"emotions: ["anger"], reply: "I hear you" and some trailing text"#;
        let reply = parse_reply(raw);
        assert_eq!(reply.emotions, vec!["anger"]);
        assert_eq!(reply.reply, "I hear you");
    }

    #[test]
    fn plain_prose_yields_fixed_defaults() {
        let reply = parse_reply("I am just plain prose with no structure at all.");
        assert_eq!(reply.emotions, vec!["neutral"]);
        assert_eq!(reply.reply, DEFAULT_REPLY);
    }

    #[test]
    fn empty_fields_in_valid_json_are_normalized() {
        let raw = r#"{"emotions": [], "reply": ""}"#;
        let reply = parse_reply(raw);
        assert_eq!(reply.emotions, vec!["neutral"]);
        assert_eq!(reply.reply, DEFAULT_REPLY);
    }

    #[test]
    fn missing_fields_in_valid_json_are_normalized() {
        let reply = parse_reply(r#"{"something": "else"}"#);
        assert_eq!(reply.emotions, vec!["neutral"]);
        assert_eq!(reply.reply, DEFAULT_REPLY);
    }

    #[test]
    fn unknown_labels_pass_through() {
        // The vocabulary is enforced loosely: unrecognized labels are kept
        // and only restyled at presentation time.
        let raw = r#"{"emotions":["melancholy"],"reply":"ok"}"#;
        let reply = parse_reply(raw);
        assert_eq!(reply.emotions, vec!["melancholy"]);
    }

    #[test]
    fn brace_span_picks_first_to_last() {
        assert_eq!(brace_span("a {b} c {d} e"), Some("{b} c {d}"));
        assert_eq!(brace_span("no braces"), None);
        assert_eq!(brace_span("} reversed {"), None);
    }

    #[test]
    fn empty_input_yields_defaults() {
        let reply = parse_reply("");
        assert_eq!(reply.emotions, vec!["neutral"]);
        assert_eq!(reply.reply, DEFAULT_REPLY);
    }
}
