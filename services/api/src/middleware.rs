//! Middleware for bearer-token validation

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::state::AppState;

/// Identity of the authenticated caller, resolved from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Validate the `Authorization: Bearer` header and attach the resolved
/// identity to the request.
///
/// Applied to every route except registration and login. A missing or
/// unparsable header and an invalid token all produce the same 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ServiceError> {
    let TypedHeader(bearer) =
        bearer.ok_or_else(|| ServiceError::Auth("Not authorized, no token".to_string()))?;

    let user_id = state.auth.verify_token(bearer.token())?;

    req.extensions_mut().insert(CurrentUser { id: user_id });

    Ok(next.run(req).await)
}
