use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, User};
use crate::store::{StoreError, TaskStore, UserStore};

/// In-memory store adapter backed by mutex-guarded vectors.
///
/// Backs the test suite and local experimentation; everything is lost when
/// the process exits. Vectors keep insertion order, matching the listing
/// contract of the persistent adapter.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::new("user collection lock poisoned"))
    }

    fn tasks(&self) -> Result<MutexGuard<'_, Vec<Task>>, StoreError> {
        self.tasks
            .lock()
            .map_err(|_| StoreError::new("task collection lock poisoned"))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
        };
        self.users()?.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users()?.clone())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: Uuid::new_v4(),
            created_by_uid: new_task.created_by_uid,
            created_by_name: new_task.created_by_name,
            assigned_to_uid: new_task.assigned_to_uid,
            assigned_to_name: new_task.assigned_to_name,
            description: new_task.description,
            done: new_task.done,
        };
        self.tasks()?.push(task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks()?.iter().find(|t| t.id == id).cloned())
    }

    async fn tasks_created_by(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks()?
            .iter()
            .filter(|t| t.created_by_uid == user_id)
            .cloned()
            .collect())
    }

    async fn tasks_assigned_to(&self, user_id: Uuid) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks()?
            .iter()
            .filter(|t| t.assigned_to_uid == user_id)
            .cloned()
            .collect())
    }

    async fn set_task_done(&self, id: Uuid, done: bool) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks()?;
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.done = done;
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_task(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut tasks = self.tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok((before - tasks.len()) as u64)
    }
}
