//!
//! # Store Adapters
//!
//! The persistence boundary of the application. Services talk to the
//! `UserStore` and `TaskStore` traits only; the concrete adapter (Postgres
//! in production, in-memory in the test suite) is injected at construction
//! by the process entry point.
//!
//! Every adapter failure is reported as a `StoreError`. The raw driver
//! detail is logged where the failure happens and does not travel upward.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// An infrastructure-level failure at the persistence boundary.
#[derive(Debug)]
pub struct StoreError {
    detail: String,
}

impl StoreError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "store error: {}", self.detail)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        log::error!("database error: {}", error);
        StoreError::new(error.to_string())
    }
}

/// Persistence of user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user and returns it with its store-assigned id.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All users; no ordering contract beyond being stable per adapter.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
}

/// Persistence of task records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task and returns it with its store-assigned id.
    async fn insert_task(&self, new_task: NewTask) -> Result<Task, StoreError>;

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Tasks whose `created_by_uid` matches; no ordering contract.
    async fn tasks_created_by(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Tasks whose `assigned_to_uid` matches; no ordering contract.
    async fn tasks_assigned_to(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Sets the `done` flag. Returns the updated task, or `None` when the
    /// task vanished between authorization and write (delete race).
    async fn set_task_done(&self, id: Uuid, done: bool) -> Result<Option<Task>, StoreError>;

    /// Removes the task, returning the number of records deleted (0 or 1).
    async fn delete_task(&self, id: Uuid) -> Result<u64, StoreError>;
}
