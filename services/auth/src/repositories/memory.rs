//! In-memory repositories for tests and local runs

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SessionRepository, UserRepository};
use crate::{
    context::RequestContext,
    error::RepositoryError,
    models::{Session, User, UserId},
};

/// Session store held in a map
///
/// Clones share the same map and lookup counter.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.id, session);
    }

    pub async fn remove(&self, id: Uuid) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    /// Number of `get_session_by_id` calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get_session_by_id(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Session, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        ctx.check()?;

        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

/// User store held in a map
///
/// Clones share the same map and lookup counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn remove(&self, id: &UserId) -> Option<User> {
        self.users.write().await.remove(id)
    }

    /// Number of `get_user_by_id` calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user_by_id(
        &self,
        ctx: &RequestContext,
        id: &UserId,
    ) -> Result<User, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        ctx.check()?;

        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
