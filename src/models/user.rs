use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use uuid::Uuid;

/// A user record as persisted in the `users` collection.
///
/// The password hash never leaves the process: `User` values are reduced to
/// [`PublicUser`] before crossing the HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier, assigned by the store on creation.
    pub id: Uuid,
    /// Display name, immutable after creation.
    pub name: String,
    /// Unique email, stored lowercase.
    pub email: String,
    /// bcrypt hash of the password; never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Fields of a user about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// The outward-facing projection of a user: id, email and name only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}
