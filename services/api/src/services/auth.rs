//! Auth service: registration, credential verification, token issue/verify

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use common::models::{LoginResponse, UserProfile};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::jwt::TokenService;
use crate::models::NewUser;
use crate::stores::UserStore;
use crate::validation;

/// Auth service over the credential store
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new user.
    ///
    /// Validates every field, hashes the password with argon2, and returns
    /// the public profile. A taken email surfaces as a conflict.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<UserProfile> {
        validation::validate_name(name).map_err(ServiceError::Validation)?;
        validation::validate_email(email).map_err(ServiceError::Validation)?;
        validation::validate_password(password).map_err(ServiceError::Validation)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!("Registered user {}", user.id);
        Ok(user.profile())
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<LoginResponse> {
        let invalid = || ServiceError::Auth("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| ServiceError::Auth(format!("Failed to issue token: {}", e)))?;

        info!("User {} logged in", user.id);
        Ok(LoginResponse {
            token,
            user: user.profile(),
        })
    }

    /// Resolve a bearer token to the user id it was issued for
    pub fn verify_token(&self, token: &str) -> ServiceResult<Uuid> {
        self.tokens.verify(token)
    }
}

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::Auth(format!("Failed to hash password: {}", e)))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ServiceError::Auth(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
