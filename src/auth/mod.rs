pub mod bootstrap;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserRole;

// Re-export necessary items
pub use bootstrap::{ensure_admin_account, DEFAULT_ADMIN_EMAIL};
pub use extractors::CurrentUser;
pub use middleware::AuthGate;
pub use password::{hash_password, verify_password};
pub use policy::{admit, AccessDecision, DenyReason};
pub use token::{issue_token, validate_token, Claims, TokenError};

lazy_static! {
    // Display names: letters, digits, spaces, and a few separators.
    static ref NAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_ .-]+$").unwrap();
}

/// Represents the payload for a user login request.
///
/// Exists only for the duration of the login call; the raw password is never
/// persisted or logged.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name for the new account.
    #[validate(
        length(min = 2, max = 64),
        regex(
            path = "NAME_REGEX",
            message = "Name may contain letters, digits, spaces, dots, underscores, or hyphens"
        )
    )]
    pub name: String,
    /// Email address for the new account; doubles as the login identifier.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed token proving authentication for subsequent requests.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
    /// The authenticated user's role, so the client can pick its surface.
    pub role: UserRole,
}
