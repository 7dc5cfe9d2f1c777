use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use teamboard_shared::auth::authorization::{authorize, ProjectAction};
use teamboard_shared::auth::middleware::AuthContext;
use teamboard_shared::models::membership::{Membership, ProjectRole};
use teamboard_shared::models::project::Project;
use teamboard_shared::models::user::User;

use crate::app::AppState;
use crate::error::{validation_error, ApiError, ApiResult};

/// Body for membership mutations. The target user is named by their
/// email in the `principal` field; an unknown role literal is rejected
/// at deserialization time with 422.
#[derive(Debug, Deserialize, Validate)]
pub struct MemberRequest {
    #[validate(email(message = "Invalid email address"))]
    pub principal: String,
    #[serde(default)]
    pub role: ProjectRole,
}

/// List a project's memberships. Requires any membership in the
/// project; non-members get 404.
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Membership>>> {
    authorize(&state.db, auth.user_id, project_id, ProjectAction::ListMembers).await?;

    let members = Membership::list_by_project(&state.db, project_id).await?;
    Ok(Json(members))
}

/// Add a user to a project, owner only.
///
/// The target user is resolved before the permission check, so an
/// unknown email is 404 even when the caller could not add anyone.
/// Adding an existing member never duplicates the row, but a non-viewer
/// role on the request is still applied. The membership is written with
/// the viewer role first and promoted afterwards when a higher role was
/// requested, mirroring two separate writes rather than one.
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<MemberRequest>,
) -> ApiResult<Json<Project>> {
    request.validate().map_err(validation_error)?;

    let target = User::find_by_email(&state.db, &request.principal)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    authorize(&state.db, auth.user_id, project_id, ProjectAction::AddMember).await?;

    Membership::add(&state.db, project_id, target.id, ProjectRole::Viewer).await?;
    if request.role != ProjectRole::Viewer {
        Membership::update_role(&state.db, project_id, target.id, request.role)
            .await?
            .ok_or_else(|| ApiError::Forbidden("Not allowed".to_string()))?;
    }

    tracing::info!(
        project_id = %project_id,
        user_id = %target.id,
        role = %request.role.as_str(),
        "Member added"
    );

    let project = Project::find_for_user(&state.db, auth.user_id, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// Change a member's role, owner only. Owners may change any role
/// including their own.
pub async fn update_member_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<MemberRequest>,
) -> ApiResult<Json<Membership>> {
    request.validate().map_err(validation_error)?;

    let target = User::find_by_email(&state.db, &request.principal)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    authorize(&state.db, auth.user_id, project_id, ProjectAction::ChangeRole).await?;

    let membership = Membership::update_role(&state.db, project_id, target.id, request.role)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Not allowed".to_string()))?;

    tracing::info!(
        project_id = %project_id,
        user_id = %target.id,
        role = %membership.role.as_str(),
        "Member role changed"
    );

    Ok(Json(membership))
}

/// Remove a member, owner only. An owner may remove themself; the
/// removal succeeds and the project may be left without any owner.
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<MemberRequest>,
) -> ApiResult<StatusCode> {
    request.validate().map_err(validation_error)?;

    let target = User::find_by_email(&state.db, &request.principal)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    authorize(&state.db, auth.user_id, project_id, ProjectAction::RemoveMember).await?;

    let membership = Membership::find(&state.db, project_id, target.id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Not allowed".to_string()))?;

    Membership::remove(&state.db, project_id, target.id).await?;

    tracing::info!(project_id = %project_id, user_id = %target.id, "Member removed");

    // Nothing stops the last owner removing themself. The project then
    // has no owner at all and no one can manage or delete it.
    if membership.role == ProjectRole::Owner
        && Membership::count_owners(&state.db, project_id).await? == 0
    {
        tracing::warn!(project_id = %project_id, "Project left without any owner");
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_request_defaults_to_viewer() {
        let request: MemberRequest =
            serde_json::from_str(r#"{"principal": "bob@example.com"}"#).unwrap();
        assert_eq!(request.principal, "bob@example.com");
        assert_eq!(request.role, ProjectRole::Viewer);
    }

    #[test]
    fn test_member_request_rejects_unknown_role() {
        let result: Result<MemberRequest, _> =
            serde_json::from_str(r#"{"principal": "bob@example.com", "role": "admin"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_member_request_requires_principal_field() {
        // The target user field is named principal, not email
        let result: Result<MemberRequest, _> =
            serde_json::from_str(r#"{"email": "bob@example.com"}"#);
        assert!(result.is_err());
    }
}
