/// Database models for Teamboard
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and credential storage
/// - `project`: Shared project containers
/// - `membership`: User-project relationships with roles
/// - `item`: Per-user owned items (no sharing)
///
/// # Example
///
/// ```no_run
/// use teamboard_shared::models::user::{User, CreateUser};
/// use teamboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "user@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         is_superuser: false,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub mod item;
pub mod membership;
pub mod project;
pub mod user;
