/// Session model and database operations
///
/// Sessions are the server-side half of cookie authentication. The client
/// holds an opaque token; the database holds its SHA-256 hash together
/// with a snapshot of the user's identity `{id, username, email}` taken
/// at login. A session is valid until its expiry or until logout deletes
/// the row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id BIGSERIAL PRIMARY KEY,
///     token_hash CHAR(64) NOT NULL UNIQUE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     username VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     expires_at TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::token::generate_session_token;
/// use taskboard_shared::models::session::{CreateSession, Session};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
/// let (token, token_hash) = generate_session_token();
///
/// let session = Session::create(
///     &pool,
///     CreateSession {
///         token_hash,
///         user_id,
///         username: "john_doe".to_string(),
///         email: "john@example.com".to_string(),
///         ttl_seconds: 86_400,
///     },
/// )
/// .await?;
///
/// // The plaintext token goes into the cookie; only the hash is stored.
/// assert!(token.starts_with("sess_"));
/// assert_eq!(session.user_id, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Server-side login session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID
    pub id: i64,

    /// SHA-256 hash of the opaque cookie token (hex, 64 chars)
    pub token_hash: String,

    /// Authenticated user
    pub user_id: i64,

    /// Username snapshot bound at login
    pub username: String,

    /// Email snapshot bound at login
    pub email: String,

    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new session
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// SHA-256 hash of the cookie token
    pub token_hash: String,

    /// User logging in
    pub user_id: i64,

    /// Username snapshot
    pub username: String,

    /// Email snapshot
    pub email: String,

    /// Session lifetime in seconds
    pub ttl_seconds: i64,
}

impl Session {
    /// Creates a new session row
    pub async fn create(pool: &PgPool, data: CreateSession) -> Result<Self, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token_hash, user_id, username, email, expires_at)
            VALUES ($1, $2, $3, $4, NOW() + make_interval(secs => $5))
            RETURNING id, token_hash, user_id, username, email, expires_at, created_at
            "#,
        )
        .bind(data.token_hash)
        .bind(data.user_id)
        .bind(data.username)
        .bind(data.email)
        .bind(data.ttl_seconds as f64)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Finds an unexpired session by token hash
    ///
    /// Expired rows are treated as absent; they are swept separately by
    /// [`Session::purge_expired`].
    pub async fn find_valid_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, token_hash, user_id, username, email, expires_at, created_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Deletes a session by id (logout)
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes all expired sessions
    ///
    /// Called at server startup; returns the number of rows removed.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_struct() {
        let create = CreateSession {
            token_hash: "a".repeat(64),
            user_id: 1,
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            ttl_seconds: 86_400,
        };

        assert_eq!(create.token_hash.len(), 64);
        assert_eq!(create.ttl_seconds, 86_400);
    }

    // Integration tests for database operations are in taskboard-api/tests/
}
