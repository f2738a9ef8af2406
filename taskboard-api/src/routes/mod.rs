/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, logout)
/// - `projects`: Project CRUD, ownership-scoped
/// - `tasks`: Task CRUD, scoped through project ownership

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
