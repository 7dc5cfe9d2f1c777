/// Project model and database operations
///
/// This module provides the Project model. Projects are shared resource
/// containers; all access is resolved through the membership table, so every
/// query here that takes a `user_id` joins against `project_memberships` and
/// only ever sees projects from that user's perspective.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// There is no owner column. A project is created together with the
/// creator's owner membership in a single transaction.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project model representing a shared resource container
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (UUID v4)
    pub id: Uuid,

    /// Project title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for a partial project update
///
/// Fields left as None are not touched; an all-None update is a valid no-op
/// that returns the unmodified record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Project {
    /// Creates a project together with the creator's owner membership
    ///
    /// Both rows are written in one transaction: a project can never be
    /// observed without its initial owner membership.
    ///
    /// # Returns
    ///
    /// The newly created project
    pub async fn create(
        pool: &PgPool,
        creator_id: Uuid,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO project_memberships (project_id, user_id, role)
            VALUES ($1, $2, 'owner')
            "#,
        )
        .bind(project.id)
        .bind(creator_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(project)
    }

    /// Lists all projects the user is a member of, in any role
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.title, p.description, p.created_at, p.updated_at
            FROM projects p
            JOIN project_memberships m ON m.project_id = p.id
            WHERE m.user_id = $1
            ORDER BY p.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Finds a project as seen by a user
    ///
    /// # Returns
    ///
    /// The project if the user is a member (any role), None if the project
    /// does not exist or the user is not a member. The two cases are
    /// indistinguishable on purpose.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.title, p.description, p.created_at, p.updated_at
            FROM projects p
            JOIN project_memberships m ON m.project_id = p.id
            WHERE m.user_id = $1 AND p.id = $2
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Applies a partial update to a project
    ///
    /// Fields absent from `data` keep their current values (COALESCE).
    /// Visibility and permission are the caller's responsibility; this only
    /// touches the projects table.
    ///
    /// # Returns
    ///
    /// The updated project, None if no such project exists
    pub async fn update(
        pool: &PgPool,
        project_id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// Cascades to all of its memberships via foreign keys.
    ///
    /// # Returns
    ///
    /// True if a project was deleted, false otherwise
    pub async fn delete(pool: &PgPool, project_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_project_default_is_noop_payload() {
        let update = UpdateProject::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
    }

    #[test]
    fn test_update_project_partial_deserialization() {
        // Absent fields deserialize to None and leave columns unchanged.
        let update: UpdateProject = serde_json::from_str("{\"title\":\"X\"}").unwrap();
        assert_eq!(update.title.as_deref(), Some("X"));
        assert!(update.description.is_none());

        let empty: UpdateProject = serde_json::from_str("{}").unwrap();
        assert!(empty.title.is_none());
        assert!(empty.description.is_none());
    }

    // Integration tests for database operations are in teamboard-api/tests/
}
