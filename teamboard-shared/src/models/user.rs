/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing user
/// accounts. Users can belong to multiple projects via the Membership model,
/// and additionally own private items.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Email case sensitivity
///
/// Emails are stored and compared exactly as submitted. The column is plain
/// VARCHAR (not CITEXT) and no normalization is performed anywhere, so
/// `BOB@EXAMPLE.COM` and `bob@example.com` are distinct identities. Principal
/// lookups for membership changes rely on this exact-case match.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// User model representing a user account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique and case-sensitive as stored
    pub email: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// Whether the account is active; inactive users cannot authenticate
    pub is_active: bool,

    /// Superuser flag for administrative access
    pub is_superuser: bool,

    /// When the user account was created
    pub created_at: DateTime<Utc>,

    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (stored exactly as given)
    pub email: String,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,

    /// Superuser flag
    pub is_superuser: bool,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, is_superuser)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, is_active, is_superuser,
                      created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.is_superuser)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active, is_superuser,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// The lookup is exact-case: an email submitted in different case than it
    /// was registered with will not match.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, is_active, is_superuser,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user
    ///
    /// Cascades to the user's items and project memberships via foreign keys.
    ///
    /// # Returns
    ///
    /// True if a user was deleted, false if no such user existed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_serialization() {
        let data = CreateUser {
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            is_superuser: false,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["is_superuser"], false);
    }

    // Integration tests for database operations are in teamboard-api/tests/
}
