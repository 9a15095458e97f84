//!
//! # Authorization-Aware Task Service
//!
//! Task creation, listing, status updates, and deletion. Every mutating
//! call re-checks the caller's identity against the ownership fields of the
//! freshly loaded record, never against claim-embedded assumptions: only
//! the assignee may flip `done`, only the creator may delete.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::Claims;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskInput};
use crate::store::{TaskStore, UserStore};

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tasks, users }
    }

    /// Creates a task from the caller to the given assignee.
    ///
    /// Both uids must resolve in the user directory; their display names
    /// are denormalized into the task at this moment and never updated
    /// again. Nothing is persisted when a lookup misses.
    pub async fn create_task(&self, claim: &Claims, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;

        let creator = self
            .users
            .find_user_by_id(claim.id)
            .await?
            .ok_or_else(|| AppError::InvalidUser("Invalid user information".into()))?;
        let assignee = self
            .users
            .find_user_by_id(input.assigned_to_uid)
            .await?
            .ok_or_else(|| AppError::InvalidUser("Invalid user information".into()))?;

        let task = self
            .tasks
            .insert_task(NewTask {
                created_by_uid: creator.id,
                created_by_name: creator.name,
                assigned_to_uid: assignee.id,
                assigned_to_name: assignee.name,
                description: input.description,
                done: false,
            })
            .await?;

        Ok(task)
    }

    /// All tasks created by the given user.
    pub async fn list_created_by(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.tasks_created_by(user_id).await?)
    }

    /// All tasks assigned to the given user.
    pub async fn list_assigned_to(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.tasks_assigned_to(user_id).await?)
    }

    /// Sets the `done` flag. Only the assignee may do this; setting the
    /// flag to its current value is a no-op with an identical result.
    pub async fn set_done(
        &self,
        claim: &Claims,
        task_id: Uuid,
        done: bool,
    ) -> Result<Task, AppError> {
        let task = self.find_existing(task_id).await?;

        if task.assigned_to_uid != claim.id {
            return Err(AppError::NotAuthorized(
                "Users can only change status when the task is assigned to them.".into(),
            ));
        }

        // The task can vanish between the check and the write when a delete
        // wins the race; surface that as not-found, same as a stale id.
        self.tasks
            .set_task_done(task_id, done)
            .await?
            .ok_or_else(|| task_not_found(task_id))
    }

    /// Removes the task. Only the creator may do this. Returns the number
    /// of removed records (1 on success).
    pub async fn delete_task(&self, claim: &Claims, task_id: Uuid) -> Result<u64, AppError> {
        let task = self.find_existing(task_id).await?;

        if task.created_by_uid != claim.id {
            return Err(AppError::NotAuthorized(
                "Users can only delete a task they created.".into(),
            ));
        }

        let affected = self.tasks.delete_task(task_id).await?;
        if affected == 0 {
            return Err(task_not_found(task_id));
        }
        Ok(affected)
    }

    async fn find_existing(&self, task_id: Uuid) -> Result<Task, AppError> {
        self.tasks
            .find_task(task_id)
            .await?
            .ok_or_else(|| task_not_found(task_id))
    }
}

fn task_not_found(task_id: Uuid) -> AppError {
    AppError::TaskNotFound(format!("Task not found with id = {}.", task_id))
}
