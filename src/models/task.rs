use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A task as persisted in the `tasks` collection and returned by the API.
///
/// Creator and assignee names are denormalized at creation time and never
/// kept in sync with later changes to the referenced users. `done` is the
/// only field ever mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the store on creation.
    pub id: Uuid,
    /// Id of the user who created the task.
    pub created_by_uid: Uuid,
    /// Creator's display name, captured at creation time.
    pub created_by_name: String,
    /// Id of the user the task is assigned to.
    pub assigned_to_uid: Uuid,
    /// Assignee's display name, captured at creation time.
    pub assigned_to_name: String,
    /// Free-text description, non-empty.
    pub description: String,
    /// Completion flag; false on creation.
    pub done: bool,
}

/// Request payload for creating a task.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    pub assigned_to_uid: Uuid,
}

/// Fields of a task about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub created_by_uid: Uuid,
    pub created_by_name: String,
    pub assigned_to_uid: Uuid,
    pub assigned_to_name: String,
    pub description: String,
    pub done: bool,
}
