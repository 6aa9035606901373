use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a user account.
/// Corresponds to the `user_role` SQL enum; serialized uppercase on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full access: manage users, all tasks, and comments.
    Admin,
    /// Restricted access: own tasks and their comments only.
    Employee,
}

/// A user account as stored in the database.
///
/// The email doubles as the login identifier and as the token subject.
/// `password_hash` never leaves the process: it is skipped on serialization
/// and API responses use [`UserResponse`] instead.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
}

/// Insert payload for a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Public projection of a user, safe to return from the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
