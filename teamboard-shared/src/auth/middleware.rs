/// Authentication middleware for Axum
///
/// This module provides bearer-token authentication for Axum applications.
/// The middleware extracts the `Authorization: Bearer <token>` header,
/// validates the JWT, resolves the subject to a live user row, and adds an
/// [`AuthContext`] to request extensions.
///
/// # Failure policy
///
/// Every verification failure (missing header, malformed token, bad
/// signature, expired token, unknown subject, inactive user) collapses into
/// the single `AuthError::Unauthenticated` signal. Nothing about which check
/// failed reaches the client.
///
/// # Example
///
/// ```no_run
/// use axum::{Extension, Router, routing::get};
/// use teamboard_shared::auth::middleware::AuthContext;
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::validate_token;
use crate::models::user::User;

/// Authentication context added to request extensions
///
/// Handlers extract it with Axum's `Extension` extractor after the bearer
/// middleware has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Email of the authenticated user
    pub email: String,

    /// Superuser flag, resolved at request time from the user row
    pub is_superuser: bool,
}

impl AuthContext {
    /// Creates auth context from a resolved user row
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            is_superuser: user.is_superuser,
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Any credential failure; deliberately carries no detail
    Unauthenticated,

    /// Database error while resolving the subject
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Could not validate credentials").into_response()
            }
            AuthError::DatabaseError(msg) => {
                tracing::error!("Auth middleware database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Bearer-token authentication middleware
///
/// Validates the JWT from the Authorization header and resolves its subject
/// against the users table. The subject must exist and be active.
///
/// # Errors
///
/// Returns 401 Unauthorized on every credential failure, with no detail
/// about which check failed.
pub async fn bearer_auth_middleware(
    pool: PgPool,
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Unauthenticated)?;

    // Malformed, expired, wrong signature: all the same signal
    let claims = validate_token(token, &secret).map_err(|_| AuthError::Unauthenticated)?;

    // Unknown subjects are also just unauthenticated
    let user = User::find_by_id(&pool, claims.sub)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::Unauthenticated)?;

    if !user.is_active {
        return Err(AuthError::Unauthenticated);
    }

    let auth_context = AuthContext::from_user(&user);
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_auth_context_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let context = AuthContext::from_user(&user);

        assert_eq!(context.user_id, user.id);
        assert_eq!(context.email, user.email);
        assert!(!context.is_superuser);
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::DatabaseError("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
