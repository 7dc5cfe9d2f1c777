/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (signup, login)
/// - `items`: Per-user item CRUD
/// - `projects`: Project CRUD
/// - `members`: Project membership management
pub mod auth;
pub mod health;
pub mod items;
pub mod members;
pub mod projects;
