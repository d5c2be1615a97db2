//! Profile service: read and update of the caller's own name/email

use common::models::UserProfile;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::ProfileChanges;
use crate::stores::UserStore;
use crate::validation;

/// Profile service over the credential store
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Public fields of the caller's own record
    pub async fn get_profile(&self, user_id: Uuid) -> ServiceResult<UserProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        Ok(user.profile())
    }

    /// Update name and/or email. Absent or empty fields are left unchanged;
    /// a new email is re-validated and may conflict with another user.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> ServiceResult<UserProfile> {
        let name = name.filter(|n| !n.trim().is_empty());
        let email = email.filter(|e| !e.trim().is_empty());

        if let Some(name) = &name {
            validation::validate_name(name).map_err(ServiceError::Validation)?;
        }
        if let Some(email) = &email {
            validation::validate_email(email).map_err(ServiceError::Validation)?;
        }

        let user = self
            .users
            .update_profile(user_id, ProfileChanges { name, email })
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        Ok(user.profile())
    }
}
