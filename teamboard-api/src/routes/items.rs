use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use teamboard_shared::auth::middleware::AuthContext;
use teamboard_shared::models::item::{CreateItem, Item, UpdateItem};

use crate::app::AppState;
use crate::error::{validation_error, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
}

/// List the authenticated user's items, oldest first.
pub async fn list_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = Item::list_for_owner(&state.db, auth.user_id, params.skip, params.limit).await?;
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateItemRequest>,
) -> ApiResult<impl IntoResponse> {
    request.validate().map_err(validation_error)?;

    let item = Item::create(
        &state.db,
        auth.user_id,
        CreateItem {
            title: request.title,
            description: request.description,
        },
    )
    .await?;

    tracing::debug!(item_id = %item.id, owner_id = %auth.user_id, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Fetch a single item. Items belonging to other users are reported
/// as missing rather than forbidden.
pub async fn get_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(item_id): Path<Uuid>,
) -> ApiResult<Json<Item>> {
    let item = Item::find_for_owner(&state.db, auth.user_id, item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;
    Ok(Json(item))
}

/// Partial update. Omitted fields keep their current values.
pub async fn update_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateItemRequest>,
) -> ApiResult<Json<Item>> {
    request.validate().map_err(validation_error)?;

    let item = Item::update_for_owner(
        &state.db,
        auth.user_id,
        item_id,
        UpdateItem {
            title: request.title,
            description: request.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(item_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Item::delete_for_owner(&state.db, auth.user_id, item_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Item not found".to_string()));
    }

    tracing::debug!(item_id = %item_id, owner_id = %auth.user_id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
    }

    #[test]
    fn test_create_item_request_validation() {
        let valid = CreateItemRequest {
            title: "Buy milk".to_string(),
            description: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateItemRequest {
            title: String::new(),
            description: None,
        };
        assert!(empty_title.validate().is_err());
    }
}
