/// Authentication utilities
///
/// - `password`: Argon2id password hashing and verification
/// - `token`: Opaque session token generation and hashing
/// - `middleware`: Session cookie authentication for Axum

pub mod middleware;
pub mod password;
pub mod token;
