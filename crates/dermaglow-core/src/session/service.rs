//! Session service orchestrating the consultation lifecycle.
//!
//! The only component allowed to mutate a session. Composes the prompt
//! builder, the LLM client, and the session repository; generic over both
//! ports so tests can substitute in-memory fakes.
//!
//! Concurrency: each operation runs to completion within one inbound
//! request. There is no session-level lock, so two concurrent
//! `post_message` calls against the same session race (last writer wins).
//! Sessions are expected to be driven serially by a single client.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use dermaglow_types::assessment::Assessment;
use dermaglow_types::error::SessionError;
use dermaglow_types::session::{ConsultSession, SessionMessage};

use crate::llm::LlmClient;
use crate::prompt::{ChatSettings, ConsultPromptBuilder};
use crate::session::repository::SessionRepository;
use crate::session::slug::generate_slug;
use crate::session::transcript::Transcript;

/// Maximum length of a user question, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Orchestrates session creation, message exchange, and report generation.
pub struct SessionService<R: SessionRepository, L: LlmClient> {
    repo: R,
    llm: L,
    settings: ChatSettings,
}

impl<R: SessionRepository, L: LlmClient> SessionService<R, L> {
    pub fn new(repo: R, llm: L, settings: ChatSettings) -> Self {
        Self {
            repo,
            llm,
            settings,
        }
    }

    /// Access the session repository (read paths and tests).
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Create a session from an intake form and seed it with the templated
    /// welcome message. No model call is made.
    pub async fn start_session(
        &self,
        owner: Uuid,
        form: Option<Assessment>,
    ) -> Result<ConsultSession, SessionError> {
        let assessment =
            form.ok_or_else(|| SessionError::Validation("missing intake form".to_string()))?;

        let now = Utc::now();
        let mut session = ConsultSession {
            id: Uuid::now_v7(),
            slug: generate_slug(),
            owner,
            assessment,
            messages: Vec::new(),
            attempts: 0,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&session).await?;

        let welcome = ConsultPromptBuilder::welcome(&session.assessment);
        session
            .messages
            .push(SessionMessage::assistant(welcome, Utc::now()));
        self.repo
            .replace_messages(&session.id, &session.messages)
            .await?;

        info!(session_id = %session.id, slug = %session.slug, "Session started");
        Ok(session)
    }

    /// Exchange one message: validate, build the chat prompt from the last
    /// turns, call the model, append the user/assistant pair, enforce the
    /// transcript cap, persist. On upstream failure nothing is appended.
    pub async fn post_message(
        &self,
        session_id: &Uuid,
        text: &str,
    ) -> Result<String, SessionError> {
        if text.is_empty() {
            return Err(SessionError::Validation("missing message".to_string()));
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return Err(SessionError::Validation(format!(
                "Message is too long. Please limit your question to {MAX_MESSAGE_CHARS} characters."
            )));
        }

        let session = self
            .repo
            .get(session_id)
            .await?
            .ok_or(SessionError::NotFound)?;

        let request =
            ConsultPromptBuilder::chat(&self.settings, &session.assessment, &session.messages, text);

        let response = self.llm.complete(&request).await.map_err(|e| {
            warn!(session_id = %session_id, error = %e, "LLM call failed, discarding exchange");
            SessionError::from(e)
        })?;

        let mut transcript = Transcript::new(session.messages);
        transcript.append_exchange(
            SessionMessage::user(text, Utc::now()),
            SessionMessage::assistant(response.content.clone(), Utc::now()),
        );

        self.repo
            .replace_messages(session_id, transcript.as_slice())
            .await?;

        Ok(response.content)
    }

    /// Generate a markdown report from the session's assessment and the
    /// caller-supplied transcript. The supplied transcript is trusted over
    /// the persisted one, and the report is returned without being stored.
    pub async fn generate_report(
        &self,
        session_id: &Uuid,
        transcript: &[SessionMessage],
    ) -> Result<String, SessionError> {
        let session = self
            .repo
            .get(session_id)
            .await?
            .ok_or(SessionError::NotFound)?;

        let request = ConsultPromptBuilder::report(&self.settings, &session.assessment, transcript);
        let response = self.llm.complete(&request).await?;

        info!(session_id = %session_id, "Report generated");
        Ok(response.content)
    }

    /// Permanently delete a session and its transcript.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), SessionError> {
        self.repo.delete(session_id).await?;
        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    /// Read the session's transcript.
    pub async fn session_messages(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<SessionMessage>, SessionError> {
        let session = self
            .repo
            .get(session_id)
            .await?
            .ok_or(SessionError::NotFound)?;
        Ok(session.messages)
    }

    /// List the owner's sessions, newest first.
    pub async fn sessions_for_owner(
        &self,
        owner: &Uuid,
    ) -> Result<Vec<ConsultSession>, SessionError> {
        Ok(self.repo.list_by_owner(owner).await?)
    }
}
