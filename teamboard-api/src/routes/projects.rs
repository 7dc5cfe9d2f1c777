use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use teamboard_shared::auth::authorization::{authorize, ProjectAction};
use teamboard_shared::auth::middleware::AuthContext;
use teamboard_shared::models::project::{CreateProject, Project, UpdateProject};

use crate::app::AppState;
use crate::error::{validation_error, ApiError, ApiResult};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
}

/// List every project the authenticated user is a member of,
/// regardless of role.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_for_user(&state.db, auth.user_id).await?;
    Ok(Json(projects))
}

/// Create a project. The creator is recorded as its owner in the same
/// transaction, so a project is never observable without an owner
/// membership.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<impl IntoResponse> {
    request.validate().map_err(validation_error)?;

    let project = Project::create(
        &state.db,
        auth.user_id,
        CreateProject {
            title: request.title,
            description: request.description,
        },
    )
    .await?;

    tracing::info!(project_id = %project.id, owner_id = %auth.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// Fetch a single project. Non-members get 404, never 403, so the
/// response does not reveal whether the project exists.
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = Project::find_for_user(&state.db, auth.user_id, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// Partial update, owner or editor. Any denial is reported as 404.
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    request.validate().map_err(validation_error)?;

    authorize(&state.db, auth.user_id, project_id, ProjectAction::UpdateProject).await?;

    let project = Project::update(
        &state.db,
        project_id,
        UpdateProject {
            title: request.title,
            description: request.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Delete a project and, via cascade, its memberships. Owner only;
/// any denial is reported as 404.
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    authorize(&state.db, auth.user_id, project_id, ProjectAction::DeleteProject).await?;

    let deleted = Project::delete(&state.db, project_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = %project_id, user_id = %auth.user_id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_allows_empty_body() {
        let request: UpdateProjectRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.description.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_title() {
        let request = CreateProjectRequest {
            title: String::new(),
            description: None,
        };
        assert!(request.validate().is_err());
    }
}
