//! Lookup contracts for the session and user stores
//!
//! The validator only depends on these traits; `postgres`-backed and
//! in-memory implementations live in the submodules.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    context::RequestContext,
    error::RepositoryError,
    models::{Session, User, UserId},
};

pub mod memory;
pub mod session;
pub mod user;

pub use memory::{InMemorySessionRepository, InMemoryUserRepository};
pub use session::PgSessionRepository;
pub use user::PgUserRepository;

/// Read access to stored sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the current record for `id`.
    ///
    /// ## Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such session exists, whether
    /// it was never created or has been deleted.
    async fn get_session_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Session, RepositoryError>;
}

/// Read access to stored users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the current record for `id`.
    ///
    /// ## Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such user exists.
    async fn get_user_by_id(
        &self,
        ctx: &RequestContext,
        id: &UserId,
    ) -> Result<User, RepositoryError>;
}
