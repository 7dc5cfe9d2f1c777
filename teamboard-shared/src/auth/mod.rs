/// Authentication and authorization utilities
///
/// This module provides the secure authentication primitives for Teamboard:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT access-token generation and validation
/// - [`middleware`]: Axum bearer-token middleware producing an [`middleware::AuthContext`]
/// - [`authorization`]: The project authorization gate (role policy)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Single failure signal**: token verification failures are never
///   distinguished for the caller; everything collapses to unauthenticated
pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
