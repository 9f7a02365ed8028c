//! Engine configuration

use std::time::Duration;

/// Reply used by the simulated generator. Stands in for real inference;
/// the content is fixed and not derived from the user's input.
pub const DEFAULT_CANNED_REPLY: &str = "Artificial Intelligence (AI) offers numerous advantages \
    and has the potential to revolutionize various aspects of our lives. Here are some key \
    advantages of AI:\n\n\
    Automation: AI can automate repetitive and mundane tasks, saving time and effort for humans. \
    It can handle large volumes of data, perform complex calculations, and execute tasks with \
    precision and consistency. This automation leads to increased productivity and efficiency \
    in various industries.\n\n\
    Decision-making: AI systems can analyze vast amounts of data, identify patterns, and make \
    informed decisions based on that analysis. This ability is particularly useful in complex \
    scenarios where humans may struggle to process large datasets or where quick and accurate \
    decisions are crucial.";

/// Delay before the simulated reply resolves
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Configuration for the session engine
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the simulated generator waits before resolving
    pub reply_delay: Duration,
    /// Text of the simulated reply
    pub canned_reply: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            canned_reply: DEFAULT_CANNED_REPLY.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = std::env::var("AIVA_REPLY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.reply_delay = Duration::from_millis(ms);
        }
        if let Ok(text) = std::env::var("AIVA_CANNED_REPLY") {
            config.canned_reply = text;
        }
        config
    }
}
