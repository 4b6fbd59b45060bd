//! Question-extraction prompt.
//!
//! The prompt is built in two steps: [`question_template`] renders the fixed
//! instructions for a given configuration, then [`compose_context`] fills the
//! `{{currentMessage}}` and `{{recentMessages}}` placeholders. Both are pure.

use crate::config::CopilotConfig;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Exact-match marker the generator returns when no research question exists.
pub const NO_QUESTION_SENTINEL: &str = "NONE";

pub const CURRENT_MESSAGE_KEY: &str = "currentMessage";
pub const RECENT_MESSAGES_KEY: &str = "recentMessages";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"));

/// Render the extraction instructions for `config`.
///
/// The result still carries the `{{currentMessage}}` and `{{recentMessages}}`
/// placeholders.
pub fn question_template(config: &CopilotConfig) -> String {
    format!(
        r#"IMPORTANT: Your primary task is to identify research questions in the CURRENT MESSAGE. Recent messages are provided only as supporting context.

Current message to analyze: {{{{currentMessage}}}}
Supporting context from recent messages (last {count}): {{{{recentMessages}}}}

First, focus on the current message and identify if it contains any research questions or requests. Only if the current message is ambiguous or references previous messages, consider the supporting context.

Consider the following as research questions:
1. Requests for market data, statistics, or metrics
2. Questions about rankings or comparisons
3. Requests for historical data or trends
4. Questions about specific protocols, tokens, or platforms
5. Requests for financial analysis or performance data

Extract and output the exact research question from the CURRENT MESSAGE. If multiple questions exist in the current message, output the most relevant one.
If there are NO research questions in the current message, output "{sentinel}".

Remember:
- Focus primarily on the current message
- Any request for data, rankings, or market information should be considered a research question, even if not phrased as a question
- Only use recent messages for context if the current message is ambiguous or references them directly

Examples:
- Current: "what are the top 10 L2s by fees" -> "what are the top 10 L2s by fees"
- Current: "show me ETH price" -> "what is the current price of ETH"
- Current: "TVL of Arbitrum" -> "what is the current TVL of Arbitrum"
- Current: "as I asked before, what's the value?" (ambiguous) -> Use context to determine the specific metric being asked about"#,
        count = config.recent_messages_count,
        sentinel = NO_QUESTION_SENTINEL,
    )
}

/// Substitute every `{{key}}` in `template` with its value.
///
/// Unknown keys become empty strings. Values are inserted verbatim and are
/// not scanned for placeholders again.
pub fn compose_context(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// The last `count` message texts, oldest first, newline-joined.
pub fn recent_messages<S: AsRef<str>>(texts: &[S], count: usize) -> String {
    let start = texts.len().saturating_sub(count);
    texts[start..]
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full extraction prompt for the current message and its windowed context.
pub fn build_question_context(
    current_message: &str,
    recent_messages: &str,
    config: &CopilotConfig,
) -> String {
    let mut values = HashMap::new();
    values.insert(CURRENT_MESSAGE_KEY, current_message.to_string());
    values.insert(RECENT_MESSAGES_KEY, recent_messages.to_string());
    compose_context(&question_template(config), &values)
}
