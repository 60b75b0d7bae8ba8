//! Session cookie validation
//!
//! Resolves the `session` cookie of an inbound request to a stored session
//! and its owning user. The pipeline runs in a fixed order and stops at the
//! first failure:
//!
//! 1. read the `session` cookie
//! 2. parse it as a hyphenated UUID
//! 3. look the session up
//! 4. reject it if `now >= expires_at`
//! 5. look the owning user up
//!
//! Nothing here logs, retries or mutates a record; callers decide how to
//! report each `ValidationError`.

use std::sync::Arc;

use axum::http::{HeaderMap, header::COOKIE};
use axum_extra::extract::cookie::Cookie;
use uuid::Uuid;

use crate::{
    clock::{Clock, SystemClock},
    context::RequestContext,
    error::{RepositoryError, ValidationError},
    models::AuthenticationObject,
    repositories::{SessionRepository, UserRepository},
};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE_NAME: &str = "session";

/// Length of the canonical `8-4-4-4-12` textual form
const HYPHENATED_UUID_LEN: usize = 36;

/// Stateless session validator
#[derive(Clone)]
pub struct SessionValidator {
    clock: Arc<dyn Clock>,
}

impl Default for SessionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionValidator").finish_non_exhaustive()
    }
}

impl SessionValidator {
    /// Validator that judges expiry against the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// Authenticate a request from its headers.
    ///
    /// Each repository call is bounded by `ctx`; a cancelled or expired
    /// context surfaces as `ValidationError::Repository`.
    pub async fn validate_request(
        &self,
        ctx: &RequestContext,
        headers: &HeaderMap,
        sessions: &dyn SessionRepository,
        users: &dyn UserRepository,
    ) -> Result<AuthenticationObject, ValidationError> {
        let token = extract_session_token(headers)?;
        let session_id = parse_session_id(&token)?;

        let session = ctx
            .run(sessions.get_session_by_id(ctx, session_id))
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => ValidationError::SessionNotFound(session_id),
                other => ValidationError::Repository(other),
            })?;

        if session.is_expired_at(self.clock.now()) {
            return Err(ValidationError::SessionExpired {
                id: session.id,
                expired_at: session.expires_at,
            });
        }

        let user = ctx
            .run(users.get_user_by_id(ctx, &session.user_id))
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => ValidationError::UserNotFound(session.user_id.clone()),
                other => ValidationError::Repository(other),
            })?;

        Ok(AuthenticationObject { user, session })
    }
}

/// Validate against the system clock.
pub async fn validate_request(
    ctx: &RequestContext,
    headers: &HeaderMap,
    sessions: &dyn SessionRepository,
    users: &dyn UserRepository,
) -> Result<AuthenticationObject, ValidationError> {
    SessionValidator::new()
        .validate_request(ctx, headers, sessions, users)
        .await
}

/// Read the raw `session` cookie value.
///
/// When the name repeats, the first occurrence wins.
pub fn extract_session_token(headers: &HeaderMap) -> Result<String, ValidationError> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ValidationError::MissingCredential)
}

/// Parse a token in the hyphenated UUID form, e.g.
/// `3fa85f64-5717-4562-b3fc-2c963f66afa6`.
///
/// Simple, braced and URN encodings are rejected.
pub fn parse_session_id(token: &str) -> Result<Uuid, ValidationError> {
    if token.len() != HYPHENATED_UUID_LEN {
        return Err(ValidationError::MalformedCredential);
    }
    Uuid::parse_str(token).map_err(|_| ValidationError::MalformedCredential)
}
