//! Agent tuning knobs.

use std::time::Duration;

/// Generation and session parameters for the dispatch router.
///
/// Temperatures are per dispatch path: near zero where the output must
/// track pre-fetched data (comparison, tools), slightly higher for
/// conversational rephrasing, highest for the ungrounded chat fallback.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Temperature for comparison synthesis over pre-fetched specs.
    pub comparison_temperature: f32,
    /// Max tokens for a comparison answer.
    pub comparison_max_tokens: usize,

    /// Temperature for humanizing a single-model answer.
    pub humanize_temperature: f32,
    /// Max tokens for a humanized answer.
    pub humanize_max_tokens: usize,

    /// Temperature for the tool-selection call.
    pub tool_temperature: f32,

    /// Temperature for the ungrounded chat fallback.
    pub chat_temperature: f32,
    /// Max tokens for the chat fallback.
    pub chat_max_tokens: usize,

    /// Idle time after which a session's history is dropped.
    pub session_ttl: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            comparison_temperature: 0.1,
            comparison_max_tokens: 1024,
            humanize_temperature: 0.3,
            humanize_max_tokens: 300,
            tool_temperature: 0.1,
            chat_temperature: 0.7,
            chat_max_tokens: 300,
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}
