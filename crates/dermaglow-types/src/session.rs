//! Consultation session and message types.
//!
//! A [`ConsultSession`] owns one immutable [`Assessment`](crate::assessment::Assessment)
//! and an ordered transcript of [`SessionMessage`]s. The message role is an
//! explicit tagged variant ([`Turn`]) rather than being inferred from which
//! of two nullable text fields happens to be set; the legacy
//! `{question, answer, isUser}` layout survives only as the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::Assessment;
use crate::llm::MessageRole;

/// One turn of a consultation transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// A question typed by the session owner.
    User(String),
    /// A markdown answer produced for the owner.
    Assistant(String),
}

impl Turn {
    /// The turn's text, regardless of speaker.
    pub fn text(&self) -> &str {
        match self {
            Turn::User(text) | Turn::Assistant(text) => text,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Turn::User(_))
    }

    /// The LLM conversation role this turn maps to.
    pub fn role(&self) -> MessageRole {
        match self {
            Turn::User(_) => MessageRole::User,
            Turn::Assistant(_) => MessageRole::Assistant,
        }
    }
}

/// A single transcript entry: a turn plus its append timestamp.
///
/// Serializes to the legacy wire layout
/// `{"question": ..., "answer": ..., "isUser": ..., "timestamp": ...}`.
/// A wire record where both or neither of `question`/`answer` is set is
/// rejected at deserialization instead of being guessed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage", into = "WireMessage")]
pub struct SessionMessage {
    pub turn: Turn,
    pub timestamp: DateTime<Utc>,
}

impl SessionMessage {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            turn: Turn::User(text.into()),
            timestamp,
        }
    }

    pub fn assistant(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            turn: Turn::Assistant(text.into()),
            timestamp,
        }
    }
}

/// Legacy wire layout for a transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    question: Option<String>,
    answer: Option<String>,
    #[serde(rename = "isUser")]
    is_user: bool,
    timestamp: DateTime<Utc>,
}

impl From<SessionMessage> for WireMessage {
    fn from(message: SessionMessage) -> Self {
        match message.turn {
            Turn::User(text) => WireMessage {
                question: Some(text),
                answer: None,
                is_user: true,
                timestamp: message.timestamp,
            },
            Turn::Assistant(text) => WireMessage {
                question: None,
                answer: Some(text),
                is_user: false,
                timestamp: message.timestamp,
            },
        }
    }
}

impl TryFrom<WireMessage> for SessionMessage {
    type Error = String;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        let turn = match (wire.question, wire.answer) {
            (Some(text), None) => Turn::User(text),
            (None, Some(text)) => Turn::Assistant(text),
            (Some(_), Some(_)) => {
                return Err("message has both question and answer set".to_string());
            }
            (None, None) => {
                return Err("message has neither question nor answer set".to_string());
            }
        };

        Ok(SessionMessage {
            turn,
            timestamp: wire.timestamp,
        })
    }
}

/// A consultation session owned by a single user.
///
/// Created once from an intake form, mutated only by message exchanges and
/// transcript truncation, destroyed by an explicit delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultSession {
    pub id: Uuid,
    /// Short human-shareable identifier, unique across all sessions.
    pub slug: String,
    /// Opaque authenticated owner id, supplied by the auth boundary.
    pub owner: Uuid,
    pub assessment: Assessment,
    pub messages: Vec<SessionMessage>,
    pub attempts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
