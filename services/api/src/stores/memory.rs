//! In-memory stores
//!
//! Same semantics as the Postgres stores, including email uniqueness and
//! stable creation-order listing. Used by the integration tests and by the
//! client crate's end-to-end tests.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{StoreError, StoreResult};
use common::models::Task;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::models::{NewUser, ProfileChanges, User};
use crate::stores::{TaskStore, UserStore};

/// User store over a `RwLock`ed map
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().expect("user store lock poisoned");

        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> StoreResult<Option<User>> {
        let mut users = self.users.write().expect("user store lock poisoned");

        if let Some(email) = &changes.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}

/// Task store over a `RwLock`ed map
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, user_id: Uuid, title: &str) -> StoreResult<Task> {
        let mut tasks = self.tasks.write().expect("task store lock poisoned");

        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            created_at: Utc::now(),
        };
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().expect("task store lock poisoned");

        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // Creation order, with the id as a tiebreak so repeated calls agree.
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().expect("task store lock poisoned");
        Ok(tasks.get(&id).cloned())
    }

    async fn update_title(&self, id: Uuid, title: &str) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().expect("task store lock poisoned");

        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.title = title.to_string();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().expect("task store lock poisoned");
        Ok(tasks.remove(&id).is_some())
    }
}
