//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `dermaglow-core` using sqlx with
//! split read/write pools: raw queries, private Row structs for
//! SQLite-to-domain mapping. The transcript lives in `session_messages`,
//! keyed by position and rewritten wholesale on every save to match the
//! whole-document semantics the service expects.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use dermaglow_core::session::repository::SessionRepository;
use dermaglow_types::assessment::Assessment;
use dermaglow_types::error::RepositoryError;
use dermaglow_types::session::{ConsultSession, SessionMessage, Turn};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_messages(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<SessionMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT role, content, created_at FROM session_messages WHERE session_id = ? ORDER BY seq ASC",
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ConsultSession.
struct SessionRow {
    id: String,
    slug: String,
    owner: String,
    assessment: String,
    attempts: i64,
    created_at: String,
    updated_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            owner: row.try_get("owner")?,
            assessment: row.try_get("assessment")?,
            attempts: row.try_get("attempts")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self, messages: Vec<SessionMessage>) -> Result<ConsultSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let owner = Uuid::parse_str(&self.owner)
            .map_err(|e| RepositoryError::Query(format!("invalid owner id: {e}")))?;
        let assessment: Assessment = serde_json::from_str(&self.assessment)
            .map_err(|e| RepositoryError::Query(format!("invalid assessment: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(ConsultSession {
            id,
            slug: self.slug,
            owner,
            assessment,
            messages,
            attempts: self.attempts,
            created_at,
            updated_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain SessionMessage.
struct MessageRow {
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<SessionMessage, RepositoryError> {
        let timestamp = parse_datetime(&self.created_at)?;
        let turn = match self.role.as_str() {
            "user" => Turn::User(self.content),
            "assistant" => Turn::Assistant(self.content),
            other => {
                return Err(RepositoryError::Query(format!(
                    "invalid message role: '{other}'"
                )));
            }
        };

        Ok(SessionMessage { turn, timestamp })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn role_str(turn: &Turn) -> &'static str {
    if turn.is_user() { "user" } else { "assistant" }
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: &ConsultSession) -> Result<(), RepositoryError> {
        let assessment = serde_json::to_string(&session.assessment)
            .map_err(|e| RepositoryError::Query(format!("assessment encode: {e}")))?;

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let insert = sqlx::query(
            r#"INSERT INTO consult_sessions (id, slug, owner, assessment, attempts, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(&session.slug)
        .bind(session.owner.to_string())
        .bind(assessment)
        .bind(session.attempts)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Err(RepositoryError::Conflict(format!(
                        "slug '{}' already exists",
                        session.slug
                    )));
                }
            }
            return Err(RepositoryError::Query(e.to_string()));
        }

        for (seq, message) in session.messages.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO session_messages (session_id, seq, role, content, created_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(session.id.to_string())
            .bind(seq as i64)
            .bind(role_str(&message.turn))
            .bind(message.turn.text())
            .bind(format_datetime(&message.timestamp))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn get(&self, session_id: &Uuid) -> Result<Option<ConsultSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM consult_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row =
                    SessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                let messages = self.fetch_messages(session_id).await?;
                Ok(Some(session_row.into_session(messages)?))
            }
            None => Ok(None),
        }
    }

    async fn list_by_owner(&self, owner: &Uuid) -> Result<Vec<ConsultSession>, RepositoryError> {
        let rows =
            sqlx::query("SELECT * FROM consult_sessions WHERE owner = ? ORDER BY created_at DESC")
                .bind(owner.to_string())
                .fetch_all(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            let session_id = Uuid::parse_str(&session_row.id)
                .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
            let messages = self.fetch_messages(&session_id).await?;
            sessions.push(session_row.into_session(messages)?);
        }

        Ok(sessions)
    }

    async fn replace_messages(
        &self,
        session_id: &Uuid,
        messages: &[SessionMessage],
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let touched = sqlx::query("UPDATE consult_sessions SET updated_at = ? WHERE id = ?")
            .bind(format_datetime(&Utc::now()))
            .bind(session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if touched.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM session_messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for (seq, message) in messages.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO session_messages (session_id, seq, role, content, created_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(session_id.to_string())
            .bind(seq as i64)
            .bind(role_str(&message.turn))
            .bind(message.turn.text())
            .bind(format_datetime(&message.timestamp))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn delete(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM consult_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_session(owner: Uuid, slug: &str) -> ConsultSession {
        ConsultSession {
            id: Uuid::now_v7(),
            slug: slug.to_string(),
            owner,
            assessment: Assessment {
                skin_type: Some("Oily".to_string()),
                main_concern: Some("Acne".to_string()),
                specific_skin_issues: vec!["Blackheads".to_string()],
                ..Assessment::default()
            },
            messages: Vec::new(),
            attempts: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let owner = Uuid::now_v7();
        let session = make_session(owner, "x7k2p1");
        repo.create(&session).await.unwrap();

        let found = repo.get(&session.id).await.unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.slug, "x7k2p1");
        assert_eq!(found.owner, owner);
        assert_eq!(found.assessment.skin_type.as_deref(), Some("Oily"));
        assert_eq!(found.assessment.specific_skin_issues, vec!["Blackheads"]);
        assert!(found.messages.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_session_is_none() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);
        assert!(repo.get(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slug_conflict_on_create() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create(&make_session(Uuid::now_v7(), "dupe01"))
            .await
            .unwrap();

        let err = repo
            .create(&make_session(Uuid::now_v7(), "dupe01"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(err.to_string().contains("dupe01"));
    }

    #[tokio::test]
    async fn test_replace_messages_roundtrip() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session(Uuid::now_v7(), "msgs01");
        repo.create(&session).await.unwrap();

        let messages = vec![
            SessionMessage::assistant("welcome", Utc::now()),
            SessionMessage::user("what cleanser?", Utc::now()),
            SessionMessage::assistant("try X", Utc::now()),
        ];
        repo.replace_messages(&session.id, &messages).await.unwrap();

        let found = repo.get(&session.id).await.unwrap().unwrap();
        assert_eq!(found.messages.len(), 3);
        assert!(!found.messages[0].turn.is_user());
        assert!(found.messages[1].turn.is_user());
        assert_eq!(found.messages[1].turn.text(), "what cleanser?");
        assert!(found.updated_at >= session.updated_at);

        // A later save replaces, not appends.
        let shorter = vec![SessionMessage::assistant("only one", Utc::now())];
        repo.replace_messages(&session.id, &shorter).await.unwrap();
        let found = repo.get(&session.id).await.unwrap().unwrap();
        assert_eq!(found.messages.len(), 1);
        assert_eq!(found.messages[0].turn.text(), "only one");
    }

    #[tokio::test]
    async fn test_replace_messages_missing_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let err = repo
            .replace_messages(&Uuid::now_v7(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let owner = Uuid::now_v7();
        let mut first = make_session(owner, "list01");
        first.created_at = Utc::now() - chrono::Duration::minutes(5);
        repo.create(&first).await.unwrap();

        let second = make_session(owner, "list02");
        repo.create(&second).await.unwrap();

        // Other owner's session is not listed.
        repo.create(&make_session(Uuid::now_v7(), "list03"))
            .await
            .unwrap();

        let sessions = repo.list_by_owner(&owner).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, second.id);
        assert_eq!(sessions[1].id, first.id);
    }

    #[tokio::test]
    async fn test_delete_cascades_messages() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());

        let session = make_session(Uuid::now_v7(), "del001");
        repo.create(&session).await.unwrap();
        repo.replace_messages(
            &session.id,
            &[SessionMessage::assistant("welcome", Utc::now())],
        )
        .await
        .unwrap();

        repo.delete(&session.id).await.unwrap();

        assert!(repo.get(&session.id).await.unwrap().is_none());

        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM session_messages WHERE session_id = ?")
                .bind(session.id.to_string())
                .fetch_one(&pool.reader)
                .await
                .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let session = make_session(Uuid::now_v7(), "del002");
        repo.create(&session).await.unwrap();
        repo.delete(&session.id).await.unwrap();

        // Second delete reports NotFound instead of crashing.
        let err = repo.delete(&session.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
