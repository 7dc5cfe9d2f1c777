/// Item model and database operations
///
/// Items are flat, per-user resources with no sharing: every operation is
/// scoped by `owner_id`, so a user can never see or touch another user's
/// items. A missing item and someone else's item both come back as None.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Item model representing a user-owned record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID (UUID v4)
    pub id: Uuid,

    /// Owning user; the only principal that can read or mutate the item
    pub owner_id: Uuid,

    /// Item title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// Item title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for a partial item update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItem {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Item {
    /// Creates a new item owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        data: CreateItem,
    ) -> Result<Self, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    /// Lists the user's items with offset/limit pagination
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM items
            WHERE owner_id = $1
            ORDER BY created_at ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Finds one of the user's items by ID
    ///
    /// # Returns
    ///
    /// The item if it exists and is owned by `owner_id`, None otherwise
    pub async fn find_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM items
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(item_id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Applies a partial update to one of the user's items
    ///
    /// Fields absent from `data` keep their current values.
    ///
    /// # Returns
    ///
    /// The updated item, None if it doesn't exist or isn't owned by the user
    pub async fn update_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        item_id: Uuid,
        data: UpdateItem,
    ) -> Result<Option<Self>, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE owner_id = $1 AND id = $2
            RETURNING id, owner_id, title, description, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(item_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Deletes one of the user's items
    ///
    /// # Returns
    ///
    /// True if an item was deleted, false if it didn't exist or wasn't owned
    /// by the user
    pub async fn delete_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        item_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE owner_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(item_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_item_empty_payload() {
        let update: UpdateItem = serde_json::from_str("{}").unwrap();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
    }

    // Integration tests for database operations are in teamboard-api/tests/
}
