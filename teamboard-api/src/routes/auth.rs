use axum::{extract::State, Form, Json};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use teamboard_shared::auth::jwt::{create_token, Claims};
use teamboard_shared::auth::password::{hash_password, validate_password_strength, verify_password};
use teamboard_shared::models::user::{CreateUser, User};

use crate::app::AppState;
use crate::error::{validation_error, ApiError, ApiResult};

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Form body for token issuance. Follows the OAuth2 password grant
/// convention: the email is carried in the `username` field.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Register a new account.
///
/// Emails are matched exactly as stored, so `User@example.com` and
/// `user@example.com` are distinct accounts. Duplicate registration
/// returns 409.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Json<UserResponse>> {
    request.validate().map_err(validation_error)?;
    validate_password_strength(&request.password).map_err(ApiError::BadRequest)?;

    if User::find_by_email(&state.db, &request.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&request.password)?;
    let user = User::create(
        &state.db,
        CreateUser {
            email: request.email,
            password_hash,
            is_superuser: false,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(UserResponse::from(user)))
}

/// Exchange credentials for a bearer token.
///
/// Unknown email and wrong password both produce the same 401 so the
/// response does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let user = User::find_by_email(&state.db, &form.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    let valid = verify_password(&form.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Incorrect email or password".to_string(),
        ));
    }

    let claims = Claims::new(
        user.id,
        Duration::hours(state.config.jwt.access_token_expire_hours),
    );
    let access_token = create_token(&claims, state.jwt_secret())?;

    tracing::debug!(user_id = %user.id, "Access token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
