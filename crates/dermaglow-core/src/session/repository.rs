//! SessionRepository trait definition.
//!
//! Durable persistence and retrieval of consultation sessions. The
//! transcript is owned exclusively by its session, so message writes go
//! through a whole-transcript replace rather than per-message appends --
//! save semantics matching a document store.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in dermaglow-infra (e.g., `SqliteSessionRepository`).

use dermaglow_types::error::RepositoryError;
use dermaglow_types::session::{ConsultSession, SessionMessage};
use uuid::Uuid;

/// Repository trait for consultation session persistence.
pub trait SessionRepository: Send + Sync {
    /// Persist a new session.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the slug is already
    /// taken; creation is not retried (see DESIGN.md).
    fn create(
        &self,
        session: &ConsultSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by its unique ID, transcript included.
    fn get(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ConsultSession>, RepositoryError>> + Send;

    /// List sessions belonging to an owner, newest first.
    fn list_by_owner(
        &self,
        owner: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ConsultSession>, RepositoryError>> + Send;

    /// Replace the session's entire transcript and touch `updated_at`.
    ///
    /// Fails with [`RepositoryError::NotFound`] if the session is absent.
    fn replace_messages(
        &self,
        session_id: &Uuid,
        messages: &[SessionMessage],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a session and its transcript.
    ///
    /// Fails with [`RepositoryError::NotFound`] if the session is absent,
    /// which also makes a repeated delete safe to call.
    fn delete(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
