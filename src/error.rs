//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management: every business-rule
//! violation, token failure, and infrastructure fault is represented as a
//! distinct variant that callers can branch on, instead of comparing message
//! strings.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with a uniform `{"error": "..."}`
//! JSON body. Store driver errors are logged and collapsed into
//! `StoreUnavailable` so no internal detail reaches the client.

use actix_web::{error::ResponseError, web, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Bad or missing input in a request payload (HTTP 400).
    Validation(String),
    /// A referenced user does not exist (HTTP 400).
    InvalidUser(String),
    /// Registration attempted with an email that is already taken (HTTP 400).
    DuplicateEmail,
    /// Login rejected: unknown email or wrong password (HTTP 401).
    InvalidCredentials(String),
    /// No `x-access-token` header was supplied (HTTP 401).
    TokenMissing,
    /// Token signature verification failed or the payload is malformed (HTTP 403).
    TokenInvalid,
    /// The token's expiration timestamp has passed (HTTP 403).
    TokenExpired,
    /// Authenticated, but the caller lacks rights over this resource (HTTP 403).
    NotAuthorized(String),
    /// No task exists with the requested id (HTTP 404).
    TaskNotFound(String),
    /// A stored password hash could not be parsed (HTTP 500).
    CorruptCredential,
    /// The persistence layer failed; the caller may retry later (HTTP 503).
    StoreUnavailable,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::InvalidUser(msg) => write!(f, "Invalid user: {}", msg),
            AppError::DuplicateEmail => {
                write!(f, "There is already an user with this email.")
            }
            AppError::InvalidCredentials(msg) => write!(f, "{}", msg),
            AppError::TokenMissing => {
                write!(f, "Token is missing in the request, please try again")
            }
            AppError::TokenInvalid => {
                write!(f, "Invalid authentication token, please login again")
            }
            AppError::TokenExpired => {
                write!(f, "Authentication token expired, please login again")
            }
            AppError::NotAuthorized(msg) => write!(f, "{}", msg),
            AppError::TaskNotFound(msg) => write!(f, "{}", msg),
            AppError::CorruptCredential => write!(f, "Stored credential is corrupt"),
            AppError::StoreUnavailable => {
                write!(f, "Storage is unavailable, please retry later")
            }
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Token errors are uniform across protected routes: 401 for a missing
/// token, 403 for an invalid or expired one.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({ "error": self.to_string() });
        match self {
            AppError::Validation(_) | AppError::InvalidUser(_) | AppError::DuplicateEmail => {
                HttpResponse::BadRequest().json(body)
            }
            AppError::InvalidCredentials(_) | AppError::TokenMissing => {
                HttpResponse::Unauthorized().json(body)
            }
            AppError::TokenInvalid | AppError::TokenExpired | AppError::NotAuthorized(_) => {
                HttpResponse::Forbidden().json(body)
            }
            AppError::TaskNotFound(_) => HttpResponse::NotFound().json(body),
            AppError::CorruptCredential => HttpResponse::InternalServerError().json(body),
            AppError::StoreUnavailable => HttpResponse::ServiceUnavailable().json(body),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the per-field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts token processing failures, distinguishing expiry from every
/// other decode failure.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        match error.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::TokenInvalid,
        }
    }
}

/// bcrypt only fails on a hash it cannot parse; a mismatched password is a
/// normal `Ok(false)` result, not an error.
impl From<bcrypt::BcryptError> for AppError {
    fn from(_: bcrypt::BcryptError) -> AppError {
        AppError::CorruptCredential
    }
}

/// Store failures have already been logged at the adapter boundary; here
/// they lose their driver detail entirely.
impl From<StoreError> for AppError {
    fn from(_: StoreError) -> AppError {
        AppError::StoreUnavailable
    }
}

/// JSON extractor configuration that reports malformed or incomplete bodies
/// through the same `{"error": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}
