pub mod extractors;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::PublicUser;

// Re-export necessary items
pub use extractors::{AuthenticatedUser, TOKEN_HEADER};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

lazy_static! {
    // Display names: letters, digits, spaces, and common name punctuation
    static ref NAME_REGEX: regex::Regex = regex::Regex::new(r"^[\p{L}\p{N} .'-]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1, message = "Password is needed in the request."))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(
        length(min = 1, max = 100),
        regex(path = "NAME_REGEX", message = "Name contains unsupported characters")
    )]
    pub name: String,
    /// Email address for the new account; uniqueness is enforced
    /// case-insensitively at registration.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response to a successful login: the session token, its lifetime in
/// seconds, and the identity it was issued for.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expiration: u64,
    pub logged_user: PublicUser,
}
