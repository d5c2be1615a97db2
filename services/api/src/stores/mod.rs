//! Storage seams for users and tasks
//!
//! The services talk to these traits rather than to sqlx directly; the
//! Postgres implementations back the running server and the in-memory
//! implementations back the tests.

use async_trait::async_trait;
use common::error::StoreResult;
use common::models::Task;
use uuid::Uuid;

use crate::models::{NewUser, ProfileChanges, User};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

/// Persistence for user records.
///
/// Email uniqueness is enforced here: `insert` and `update_profile` fail
/// with [`common::error::StoreError::DuplicateEmail`] on a collision.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Apply the given changes; returns `None` if the user does not exist.
    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> StoreResult<Option<User>>;
}

/// Persistence for task records, always scoped to an owning user
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, user_id: Uuid, title: &str) -> StoreResult<Task>;
    /// All tasks owned by `user_id`, in creation order.
    async fn list_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<Task>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Task>>;
    /// Retitle a task; returns `None` if the id is unknown.
    async fn update_title(&self, id: Uuid, title: &str) -> StoreResult<Option<Task>>;
    /// Returns whether a task was actually removed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
