//! Events that can occur in a session

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    /// The user submitted a message. `request_id` is assigned by the caller
    /// and identifies the reply this message requests.
    UserMessage { text: String, request_id: String },
    /// The "new chat" affordance: drop the transcript and start over
    Reset,

    // Reply generation events
    /// The generator produced the bot reply for `request_id`
    ReplyReady { request_id: String, text: String },
    /// The generator failed; `message` is surfaced as a bot error turn
    ReplyFailed { request_id: String, message: String },
}
