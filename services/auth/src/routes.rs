//! Authentication service routes

use axum::{
    Extension, Json, Router, middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{
    AppState, error::ApiResult, middleware::session_auth_middleware,
    models::AuthenticationObject,
};

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(current_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "session-auth"
    }))
}

/// Return the user and session behind the request's cookie
pub async fn current_session(
    Extension(auth): Extension<AuthenticationObject>,
) -> ApiResult<Json<AuthenticationObject>> {
    Ok(Json(auth))
}
