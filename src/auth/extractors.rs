use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Name of the request header carrying the session token.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Extracts and validates the caller's session token.
///
/// Handlers that take this extractor never run without a valid claim:
/// a missing token is rejected with 401 and an invalid or expired one with
/// 403 before the handler body (and therefore before any store access) is
/// reached.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Claims {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                // Only reachable if the app factory forgot to register the
                // application state.
                log::error!("AppState missing from app_data; cannot validate tokens");
                return ready(Err(AppError::TokenInvalid.into()));
            }
        };

        let token = req
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());

        ready(
            state
                .tokens
                .validate(token)
                .map(AuthenticatedUser)
                .map_err(Into::into),
        )
    }
}
