//! Application state shared across handlers

use std::sync::Arc;

use crate::jwt::TokenService;
use crate::services::{AuthService, ProfileService, TaskService};
use crate::stores::{TaskStore, UserStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub profile: ProfileService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        tokens: TokenService,
    ) -> Self {
        AppState {
            auth: AuthService::new(users.clone(), tokens),
            tasks: TaskService::new(tasks),
            profile: ProfileService::new(users),
        }
    }
}
