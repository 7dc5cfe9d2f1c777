/// Project authorization gate
///
/// This module derives an allow/deny decision from (acting user, target
/// project, requested action) by consulting the membership table, which is
/// the sole source of truth for project access.
///
/// # Policy
///
/// | Action | Required role |
/// |---|---|
/// | view project / list members | any membership |
/// | update project | owner or editor |
/// | delete project | owner |
/// | add member / change role / remove member | owner |
///
/// # Existence masking
///
/// Denials on read and project-mutation paths are reported as
/// [`AuthzError::NotVisible`], which the HTTP layer renders as 404, so a
/// non-member can never learn whether a project exists. Denials on
/// membership-mutation paths are reported as [`AuthzError::NotAllowed`]
/// (403), which does reveal existence to a non-owner who knows the project
/// id. The asymmetry is intentional and preserved as observed behavior.
///
/// # Example
///
/// ```no_run
/// use teamboard_shared::auth::authorization::{authorize, ProjectAction};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid, project_id: Uuid) -> anyhow::Result<()> {
/// let role = authorize(&pool, user_id, project_id, ProjectAction::UpdateProject).await?;
/// println!("acting as {}", role.as_str());
/// # Ok(())
/// # }
/// ```
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::membership::{Membership, ProjectRole};
use crate::models::user::User;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Denied on a path that hides project existence; rendered as not-found
    #[error("Project {0} is not visible to this user")]
    NotVisible(Uuid),

    /// Denied on a membership-mutation path; rendered as forbidden
    #[error("Not allowed")]
    NotAllowed,

    /// Superuser-only access
    #[error("Admins only")]
    AdminsOnly,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Operations gated by project membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    /// Read the project record
    ViewProject,

    /// List the project's members
    ListMembers,

    /// Change title or description
    UpdateProject,

    /// Delete the project and its memberships
    DeleteProject,

    /// Add a user to the project
    AddMember,

    /// Change an existing member's role
    ChangeRole,

    /// Remove a member from the project
    RemoveMember,
}

impl ProjectAction {
    /// Gets the minimum role required for this action
    pub fn required_role(&self) -> ProjectRole {
        match self {
            ProjectAction::ViewProject | ProjectAction::ListMembers => ProjectRole::Viewer,
            ProjectAction::UpdateProject => ProjectRole::Editor,
            ProjectAction::DeleteProject
            | ProjectAction::AddMember
            | ProjectAction::ChangeRole
            | ProjectAction::RemoveMember => ProjectRole::Owner,
        }
    }

    /// Whether a denial of this action must hide project existence
    ///
    /// True for read and project-mutation paths (deny = 404), false for
    /// membership-mutation paths (deny = 403).
    pub fn masks_existence(&self) -> bool {
        matches!(
            self,
            ProjectAction::ViewProject
                | ProjectAction::ListMembers
                | ProjectAction::UpdateProject
                | ProjectAction::DeleteProject
        )
    }
}

/// Authorizes an action on a project
///
/// Resolves the acting user's membership row and compares its role against
/// the action's requirement. A missing membership and an insufficient role
/// produce the same error, chosen per the action's masking policy, so the
/// caller cannot accidentally leak more than the policy allows.
///
/// # Returns
///
/// The acting user's role on success
///
/// # Errors
///
/// - `AuthzError::NotVisible` when denied on a masking action
/// - `AuthzError::NotAllowed` when denied on a membership-mutation action
/// - `AuthzError::DatabaseError` on storage failure
pub async fn authorize(
    pool: &PgPool,
    user_id: Uuid,
    project_id: Uuid,
    action: ProjectAction,
) -> Result<ProjectRole, AuthzError> {
    let role = Membership::role_of(pool, project_id, user_id).await?;

    match role {
        Some(role) if role.at_least(action.required_role()) => Ok(role),
        _ if action.masks_existence() => Err(AuthzError::NotVisible(project_id)),
        _ => Err(AuthzError::NotAllowed),
    }
}

/// Requires the user to be a superuser
///
/// Not wired to any shipped route yet; kept for administrative surfaces.
pub fn require_superuser(user: &User) -> Result<(), AuthzError> {
    if !user.is_superuser {
        return Err(AuthzError::AdminsOnly);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(
            ProjectAction::ViewProject.required_role(),
            ProjectRole::Viewer
        );
        assert_eq!(
            ProjectAction::ListMembers.required_role(),
            ProjectRole::Viewer
        );
        assert_eq!(
            ProjectAction::UpdateProject.required_role(),
            ProjectRole::Editor
        );
        assert_eq!(
            ProjectAction::DeleteProject.required_role(),
            ProjectRole::Owner
        );
        assert_eq!(ProjectAction::AddMember.required_role(), ProjectRole::Owner);
        assert_eq!(
            ProjectAction::ChangeRole.required_role(),
            ProjectRole::Owner
        );
        assert_eq!(
            ProjectAction::RemoveMember.required_role(),
            ProjectRole::Owner
        );
    }

    #[test]
    fn test_masking_policy_is_asymmetric() {
        // Read and project-mutation paths hide existence
        assert!(ProjectAction::ViewProject.masks_existence());
        assert!(ProjectAction::ListMembers.masks_existence());
        assert!(ProjectAction::UpdateProject.masks_existence());
        assert!(ProjectAction::DeleteProject.masks_existence());

        // Membership-mutation paths reveal it as forbidden
        assert!(!ProjectAction::AddMember.masks_existence());
        assert!(!ProjectAction::ChangeRole.masks_existence());
        assert!(!ProjectAction::RemoveMember.masks_existence());
    }

    #[test]
    fn test_require_superuser() {
        use chrono::Utc;
        use uuid::Uuid;

        let mut user = User {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(matches!(
            require_superuser(&user),
            Err(AuthzError::AdminsOnly)
        ));

        user.is_superuser = true;
        assert!(require_superuser(&user).is_ok());
    }
}
