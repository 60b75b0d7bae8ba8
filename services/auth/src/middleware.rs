//! Middleware for session cookie authentication

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};

use crate::{
    AppState,
    context::RequestContext,
    error::{ApiError, ValidationError},
};

/// Validate the `session` cookie and expose the result to handlers
///
/// On success the `AuthenticationObject` is inserted into the request
/// extensions; otherwise the request is rejected with an `ApiError`.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = RequestContext::background().with_timeout(state.request_timeout);

    let auth = state
        .validator
        .validate_request(
            &ctx,
            req.headers(),
            state.session_repository.as_ref(),
            state.user_repository.as_ref(),
        )
        .await
        .map_err(|err| {
            report(&err);
            ApiError::from(err)
        })?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}

fn report(err: &ValidationError) {
    match err {
        ValidationError::UserNotFound(user_id) => {
            warn!("Session references missing user {}", user_id);
        }
        ValidationError::Repository(cause) => {
            error!("Failed to validate session: {}", cause);
        }
        other => {
            debug!("Rejected request: {} ({})", other, other.kind().as_str());
        }
    }
}
