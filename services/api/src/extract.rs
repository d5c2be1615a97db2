//! Request extractors

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ServiceError;

/// `axum::Json` with the rejection folded into the service error taxonomy.
///
/// A body that fails to deserialize comes back as a 400 validation error
/// with a generic message; the serde detail is logged, never sent to the
/// client.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection);
                Err(ServiceError::Validation("Invalid request body".to_string()))
            }
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
