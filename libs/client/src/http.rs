//! HTTP client with the logout-on-401 interceptor
//!
//! Every call goes through one request path that attaches the session's
//! bearer token and inspects the response status before anything is
//! deserialized. A 401 from any endpoint means "session expired": the
//! session flips to Anonymous and the caller sees `SessionExpired`, never
//! the raw error.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use common::models::{
    DeleteResponse, ErrorMessage, LoginRequest, LoginResponse, RegisterRequest, Task, TaskRequest,
    UpdateProfileRequest, UserProfile,
};

use crate::session::SessionManager;

/// Client-side failures
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad body)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any 401; the session has already been logged out
    #[error("Session expired")]
    SessionExpired,

    /// Non-401 API failure, surfaced as a one-line message
    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

/// Typed client for the task tracker API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionManager>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Register a new account. Does not log in; call [`Self::login`] next.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        self.request(
            Method::POST,
            "/api/auth/register",
            Some(&RegisterRequest {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                password: Some(password.to_string()),
            }),
        )
        .await
    }

    /// Log in and store the returned token in the session
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response: LoginResponse = self
            .request(
                Method::POST,
                "/api/auth/login",
                Some(&LoginRequest {
                    email: Some(email.to_string()),
                    password: Some(password.to_string()),
                }),
            )
            .await?;

        self.session.authenticate(response.token.clone());
        Ok(response)
    }

    /// Explicit logout; purely client-side, tokens are not revocable
    pub fn logout(&self) {
        self.session.logout();
    }

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.request::<(), _>(Method::GET, "/api/users/me", None)
            .await
    }

    pub async fn update_profile(
        &self,
        changes: &UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        self.request(Method::PUT, "/api/users/me", Some(changes))
            .await
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.request::<(), _>(Method::GET, "/api/tasks", None).await
    }

    pub async fn create_task(&self, title: &str) -> Result<Task, ClientError> {
        self.request(
            Method::POST,
            "/api/tasks",
            Some(&TaskRequest {
                title: Some(title.to_string()),
            }),
        )
        .await
    }

    pub async fn update_task(&self, id: Uuid, title: &str) -> Result<Task, ClientError> {
        self.request(
            Method::PUT,
            &format!("/api/tasks/{id}"),
            Some(&TaskRequest {
                title: Some(title.to_string()),
            }),
        )
        .await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<DeleteResponse, ClientError> {
        self.request::<(), _>(Method::DELETE, &format!("/api/tasks/{id}"), None)
            .await
    }

    /// The single request path every call goes through
    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            if self.session.logout() {
                warn!("Session expired, logging out");
            }
            return Err(ClientError::SessionExpired);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorMessage>()
                .await
                .map(|e| e.message)
                .unwrap_or_else(|_| "Server error".to_string());
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
