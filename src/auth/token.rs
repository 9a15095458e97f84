use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// The identity payload carried by a session token: user id, email, and
/// the absolute expiration timestamp (seconds since epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub exp: usize,
}

/// Issues and validates signed, time-limited session tokens.
///
/// The signing secret is turned into key material once, at startup, and the
/// service is injected wherever tokens are handled; nothing re-reads the
/// environment per request. Tokens are stateless: there is no server-side
/// session table and no revocation before expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// The configured token lifetime, reported to clients at login.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Encodes `{id, email, exp}` into an HS256 token expiring TTL seconds
    /// from now.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::seconds(self.ttl_secs as i64))
            .ok_or(AppError::TokenInvalid)?
            .timestamp() as usize;

        let claims = Claims {
            id: user_id,
            email: email.to_string(),
            exp: expiration,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Decodes and verifies a token, yielding its claims.
    ///
    /// `TokenMissing` when the caller supplied none, `TokenExpired` when
    /// `exp` has passed, `TokenInvalid` for everything else. No expiry
    /// leeway: an expired token is rejected the second it expires.
    pub fn validate(&self, token: Option<&str>) -> Result<Claims, AppError> {
        let token = token.ok_or(AppError::TokenMissing)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
