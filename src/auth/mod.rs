pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer, TokenPair};

lazy_static! {
    // Regex for username validation: alphanumeric, dots, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap();
}

/// Represents the payload for a new account signup request.
///
/// Blank-after-trim and password-confirmation checks happen in the auth
/// service; the constraints here cover shape and length.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Desired username for the new account.
    #[validate(
        length(min = 1, max = 150),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, dots, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    pub password: String,
    /// Must match `password`.
    #[serde(alias = "confirmpassword")]
    pub confirm_password: String,
}

/// Represents the payload for a login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Represents the payload for requesting a password-reset email.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Represents the payload for confirming a password reset.
#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub password: String,
}

/// Response structure for a successful signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub tokens: TokenPair,
}

/// Response structure for a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub username: String,
    pub message: String,
}
