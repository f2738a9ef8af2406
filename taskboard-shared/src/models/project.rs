/// Project model and database operations
///
/// Projects are owned by exactly one user and own zero or more tasks.
/// Every query here is ownership-scoped: a caller can only ever see or
/// mutate rows whose `user_id` matches their own, so a wrong id and an
/// unowned id are indistinguishable (both come back as no row).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     status VARCHAR(50) NOT NULL DEFAULT 'active',
///     due_date TIMESTAMPTZ,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Deleting a project cascades to its tasks via the foreign key.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::project::{CreateProject, Project};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
/// let project = Project::create(
///     &pool,
///     CreateProject {
///         name: "Website Redesign".to_string(),
///         description: None,
///         status: None,
///         due_date: None,
///         user_id,
///     },
/// )
/// .await?;
///
/// let mine = Project::list_by_owner(&pool, user_id).await?;
/// assert!(mine.iter().any(|p| p.id == project.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Default status for a newly created project
pub const DEFAULT_STATUS: &str = "active";

/// Project owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID (server-assigned, monotonically increasing)
    pub id: i64,

    /// Project name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Project status (defaults to "active")
    pub status: String,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning user
    pub user_id: i64,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name (required)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional status (defaults to "active" when None)
    pub status: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning user (always the authenticated caller)
    pub user_id: i64,
}

/// Input for a full-replace update of a project
///
/// Absent optional fields reset the column to its default (NULL for
/// description and due date, "active" for status).
#[derive(Debug, Clone)]
pub struct UpdateProject {
    /// New project name
    pub name: String,

    /// New description (None clears it)
    pub description: Option<String>,

    /// New status
    pub status: String,

    /// New due date (None clears it)
    pub due_date: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates a new project owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, status, due_date, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, status, due_date, user_id, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()))
        .bind(data.due_date)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects owned by `owner_id`, oldest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, status, due_date, user_id, created_at, updated_at
            FROM projects
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Finds a project by id, scoped to its owner
    ///
    /// Returns None both when the id does not exist and when the project
    /// belongs to a different user.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, status, due_date, user_id, created_at, updated_at
            FROM projects
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Full-replace update of the caller's project
    ///
    /// Returns the updated row, or None when no row matched the
    /// id+ownership filter.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $3,
                description = $4,
                status = $5,
                due_date = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, description, status, due_date, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes the caller's project; tasks go with it via ON DELETE CASCADE
    ///
    /// Returns true if a row was deleted, false if none matched the
    /// id+ownership filter.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        assert_eq!(DEFAULT_STATUS, "active");
    }

    #[test]
    fn test_project_serializes_camel_case() {
        let project = Project {
            id: 1,
            name: "P1".to_string(),
            description: None,
            status: DEFAULT_STATUS.to_string(),
            due_date: None,
            user_id: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains("\"userId\":7"));
        assert!(json.contains("\"dueDate\":null"));
        assert!(json.contains("\"status\":\"active\""));
        assert!(!json.contains("user_id"));
    }

    // Integration tests for database operations are in taskboard-api/tests/
}
