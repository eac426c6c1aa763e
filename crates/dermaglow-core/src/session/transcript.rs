//! Bounded transcript buffer.
//!
//! Sessions grow monotonically until they cross a hard cap, at which point
//! the transcript is cut back to the most recent entries. The cap bounds
//! stored transcript size; it is not a sliding window applied per message,
//! so the length oscillates between the retain count and the cap. The cap
//! check runs once per appended exchange -- a user turn and its assistant
//! turn are never split by a truncation.

use dermaglow_types::session::SessionMessage;

/// Message count that triggers truncation.
pub const MESSAGE_CAP: usize = 200;

/// Messages retained after truncation, oldest discarded first.
pub const RETAIN_ON_OVERFLOW: usize = 150;

/// An ordered message sequence with the 200-cap/150-retain policy.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<SessionMessage>,
}

impl Transcript {
    /// Wrap an existing message sequence without applying the cap.
    ///
    /// Stored transcripts are already within bounds; the cap is only
    /// enforced when an exchange is appended.
    pub fn new(messages: Vec<SessionMessage>) -> Self {
        Self { messages }
    }

    /// Append a single message without enforcing the cap.
    pub fn push(&mut self, message: SessionMessage) {
        self.messages.push(message);
    }

    /// Append a matched user/assistant pair, then enforce the cap.
    pub fn append_exchange(&mut self, user: SessionMessage, assistant: SessionMessage) {
        self.messages.push(user);
        self.messages.push(assistant);
        self.enforce_cap();
    }

    /// Truncate to the most recent [`RETAIN_ON_OVERFLOW`] entries when the
    /// count exceeds [`MESSAGE_CAP`]; otherwise leave the sequence alone.
    pub fn enforce_cap(&mut self) {
        if self.messages.len() > MESSAGE_CAP {
            let excess = self.messages.len() - RETAIN_ON_OVERFLOW;
            self.messages.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn as_slice(&self) -> &[SessionMessage] {
        &self.messages
    }

    pub fn into_inner(self) -> Vec<SessionMessage> {
        self.messages
    }
}
