//! Task service: owner-scoped CRUD

use common::models::Task;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::stores::TaskStore;
use crate::validation;

/// Task service over the task store
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// All tasks owned by `user_id`, in creation order
    pub async fn list(&self, user_id: Uuid) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_by_owner(user_id).await?)
    }

    /// Create a task owned by `user_id`
    pub async fn create(&self, user_id: Uuid, title: &str) -> ServiceResult<Task> {
        validation::validate_title(title).map_err(ServiceError::Validation)?;
        Ok(self.tasks.insert(user_id, title).await?)
    }

    /// Retitle a task owned by `caller`
    pub async fn update(&self, caller: Uuid, task_id: Uuid, title: &str) -> ServiceResult<Task> {
        validation::validate_title(title).map_err(ServiceError::Validation)?;
        self.owned_by(caller, task_id).await?;

        self.tasks
            .update_title(task_id, title)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))
    }

    /// Permanently delete a task owned by `caller`
    pub async fn delete(&self, caller: Uuid, task_id: Uuid) -> ServiceResult<()> {
        self.owned_by(caller, task_id).await?;

        if self.tasks.delete(task_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("Task not found".to_string()))
        }
    }

    /// A task that exists but belongs to someone else is reported exactly
    /// like a missing one, so callers cannot probe foreign ids.
    async fn owned_by(&self, caller: Uuid, task_id: Uuid) -> ServiceResult<()> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

        if task.user_id != caller {
            return Err(ServiceError::NotFound("Task not found".to_string()));
        }
        Ok(())
    }
}
