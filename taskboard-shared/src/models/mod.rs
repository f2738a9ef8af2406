/// Database models
///
/// Each submodule provides one record type plus its CRUD operations:
///
/// - `user`: User accounts
/// - `project`: Projects owned by a user
/// - `task`: Tasks belonging to a project
/// - `session`: Server-side login sessions

pub mod project;
pub mod session;
pub mod task;
pub mod user;
