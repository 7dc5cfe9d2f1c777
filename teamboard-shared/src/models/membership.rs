/// Membership model and database operations
///
/// This module provides the Membership model for user-project relationships
/// with role-based access control. It is the sole source of truth for project
/// access: projects carry no owner column, and ownership is derived from
/// membership rows with role `owner`.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_role AS ENUM ('owner', 'editor', 'viewer');
///
/// CREATE TABLE project_memberships (
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role project_role NOT NULL DEFAULT 'viewer',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```
///
/// # Roles
///
/// - **owner**: Full control, including membership changes and deletion
/// - **editor**: Can update project content, not membership or deletion
/// - **viewer**: Read-only access
///
/// A project is not guaranteed to retain an owner: an owner may remove
/// themself, leaving the project ownerless. Nothing here prevents that.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// RBAC roles for project memberships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    /// Full control: membership changes, project deletion
    Owner,

    /// Can update project title and description
    Editor,

    /// Read-only access
    Viewer,
}

impl ProjectRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Owner => "owner",
            ProjectRole::Editor => "editor",
            ProjectRole::Viewer => "viewer",
        }
    }

    /// Checks if this role meets or exceeds the required role
    ///
    /// Hierarchy: Owner > Editor > Viewer
    pub fn at_least(&self, required: ProjectRole) -> bool {
        self.rank() >= required.rank()
    }

    /// Returns numeric permission level for comparison
    fn rank(&self) -> u8 {
        match self {
            ProjectRole::Owner => 3,
            ProjectRole::Editor => 2,
            ProjectRole::Viewer => 1,
        }
    }
}

impl Default for ProjectRole {
    /// Default role assigned when a member is added without one
    fn default() -> Self {
        ProjectRole::Viewer
    }
}

/// Membership model representing the (user, project, role) fact
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the project; the only mutable field
    pub role: ProjectRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Finds a specific membership by project and user
    pub async fn find(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT project_id, user_id, role, created_at
            FROM project_memberships
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Gets a user's role in a project
    ///
    /// # Returns
    ///
    /// The role if the user is a member, None otherwise. Callers treat None
    /// as "project not found" on read paths so outsiders cannot distinguish
    /// a project they are excluded from and one that does not exist.
    pub async fn role_of(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ProjectRole>, sqlx::Error> {
        let role: Option<ProjectRole> = sqlx::query_scalar(
            r#"
            SELECT role FROM project_memberships
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(role)
    }

    /// Adds a user to a project, idempotently
    ///
    /// If the pair is already a member the existing row is left untouched,
    /// including its role; re-adding never duplicates a membership. Role
    /// changes requested alongside an add are a separate, follow-up
    /// [`Membership::update_role`] call.
    ///
    /// # Returns
    ///
    /// The membership row (existing or newly created)
    ///
    /// # Errors
    ///
    /// Returns an error if project or user does not exist (foreign key
    /// violation) or the database connection fails
    pub async fn add(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
        role: ProjectRole,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO project_memberships (project_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, user_id) DO NOTHING
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;

        // The row now exists either way; fetch whichever version won.
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT project_id, user_id, role, created_at
            FROM project_memberships
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Updates a user's role in a project
    ///
    /// Concurrent updates to the same row resolve last-write-wins in commit
    /// order; there is no version check.
    ///
    /// # Returns
    ///
    /// The updated membership if found, None if the membership doesn't exist
    pub async fn update_role(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
        role: ProjectRole,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            UPDATE project_memberships
            SET role = $3
            WHERE project_id = $1 AND user_id = $2
            RETURNING project_id, user_id, role, created_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Removes a user from a project
    ///
    /// No ownership safeguard: an owner removing themself is allowed and can
    /// leave the project with zero owners.
    ///
    /// # Returns
    ///
    /// True if a membership was deleted, false if it didn't exist
    pub async fn remove(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_memberships WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all members of a project
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let memberships = sqlx::query_as::<_, Membership>(
            r#"
            SELECT project_id, user_id, role, created_at
            FROM project_memberships
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(memberships)
    }

    /// Counts owner memberships of a project
    ///
    /// Can legitimately return zero; see module docs.
    pub async fn count_owners(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM project_memberships WHERE project_id = $1 AND role = 'owner'",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
