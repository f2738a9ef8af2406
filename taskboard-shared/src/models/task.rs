/// Task model and database operations
///
/// Tasks belong to exactly one project. Ownership is enforced
/// transitively: every read and mutation joins through `projects` and
/// filters on the project owner's user id, so a task under someone
/// else's project behaves exactly like a task that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     priority VARCHAR(50) NOT NULL DEFAULT 'medium',
///     due_date TIMESTAMPTZ,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool, project_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         title: "Create wireframes".to_string(),
///         description: None,
///         completed: None,
///         priority: None,
///         due_date: None,
///         project_id,
///     },
/// )
/// .await?;
///
/// let mine = Task::list_by_owner(&pool, user_id).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Default priority for a newly created task
pub const DEFAULT_PRIORITY: &str = "medium";

/// Task belonging to a project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID (server-assigned, monotonically increasing)
    pub id: i64,

    /// Task title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion flag (defaults to false)
    pub completed: bool,

    /// Priority label (defaults to "medium")
    pub priority: String,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning project
    pub project_id: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The handler verifies project ownership before calling this, so the
/// insert itself is unscoped.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title (required)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional completion flag (defaults to false when None)
    pub completed: Option<bool>,

    /// Optional priority (defaults to "medium" when None)
    pub priority: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Owning project (already verified to belong to the caller)
    pub project_id: i64,
}

/// Input for a full-replace update of a task
///
/// Absent optional fields reset the column to its default (NULL for
/// description and due date, false for completed, "medium" for priority).
#[derive(Debug, Clone)]
pub struct UpdateTask {
    /// New task title
    pub title: String,

    /// New description (None clears it)
    pub description: Option<String>,

    /// New completion flag
    pub completed: bool,

    /// New priority
    pub priority: String,

    /// New due date (None clears it)
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task under a project
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, completed, priority, due_date, project_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, completed, priority, due_date, project_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed.unwrap_or(false))
        .bind(data.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()))
        .bind(data.due_date)
        .bind(data.project_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks under projects owned by `owner_id`, oldest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.title, t.description, t.completed, t.priority, t.due_date,
                   t.project_id, t.created_at, t.updated_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE p.user_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by id, scoped through project ownership
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.title, t.description, t.completed, t.priority, t.due_date,
                   t.project_id, t.created_at, t.updated_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Full-replace update of a task, scoped through project ownership
    ///
    /// Returns the updated row, or None when no row matched the
    /// id+ownership filter.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks t
            SET title = $3,
                description = $4,
                completed = $5,
                priority = $6,
                due_date = $7,
                updated_at = NOW()
            FROM projects p
            WHERE t.id = $1 AND t.project_id = p.id AND p.user_id = $2
            RETURNING t.id, t.title, t.description, t.completed, t.priority, t.due_date,
                      t.project_id, t.created_at, t.updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed)
        .bind(data.priority)
        .bind(data.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped through project ownership
    ///
    /// Returns true if a row was deleted, false if none matched.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks t
            USING projects p
            WHERE t.id = $1 AND t.project_id = p.id AND p.user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks under a project
    ///
    /// Used by tests to verify the cascade on project delete.
    pub async fn count_by_project(pool: &PgPool, project_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priority() {
        assert_eq!(DEFAULT_PRIORITY, "medium");
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: 3,
            title: "Create wireframes".to_string(),
            description: Some("Design initial wireframes".to_string()),
            completed: false,
            priority: DEFAULT_PRIORITY.to_string(),
            due_date: None,
            project_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"projectId\":1"));
        assert!(json.contains("\"completed\":false"));
        assert!(json.contains("\"priority\":\"medium\""));
        assert!(!json.contains("project_id"));
    }

    // Integration tests for database operations are in taskboard-api/tests/
}
