//!
//! # User Directory Service
//!
//! Registration, credential checks, and identity lookup. The directory owns
//! the email-uniqueness policy: emails are compared case-insensitively by
//! normalizing to lowercase at registration and at login lookup.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, verify_password, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::{NewUser, PublicUser, User};
use crate::store::UserStore;

#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Creates a user. Fails with `DuplicateEmail` when the normalized email
    /// is already registered; the existing record is left untouched.
    pub async fn register(&self, input: RegisterRequest) -> Result<User, AppError> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .store
            .insert_user(NewUser {
                name: input.name,
                email,
                password_hash,
            })
            .await?;

        Ok(user)
    }

    /// Checks login credentials and returns the matching user.
    ///
    /// Which check failed (unknown email vs. wrong password) is reflected in
    /// the error message; both map to the same 401 response.
    pub async fn authenticate(&self, input: &LoginRequest) -> Result<User, AppError> {
        input.validate()?;

        let email = normalize_email(&input.email);
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::InvalidCredentials("Email not found.".into()))?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials("Invalid Password.".into()));
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.store.find_user_by_id(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .store
            .find_user_by_email(&normalize_email(email))
            .await?)
    }

    /// All users, reduced to their outward projection (id, email, name).
    pub async fn list_all(&self) -> Result<Vec<PublicUser>, AppError> {
        let users = self.store.list_users().await?;
        Ok(users.iter().map(User::public).collect())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
