use std::sync::Arc;

use crate::auth::TokenService;
use crate::services::{TaskService, UserDirectory};
use crate::store::{TaskStore, UserStore};

/// Application state shared across workers.
///
/// Built once by the process entry point and injected into the app factory;
/// services receive their store adapters here and never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub users: UserDirectory,
    pub tasks: TaskService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        task_store: Arc<dyn TaskStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users: UserDirectory::new(user_store.clone()),
            tasks: TaskService::new(task_store, user_store),
            tokens,
        }
    }
}
