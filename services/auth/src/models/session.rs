//! Session model and the authenticated identity built from it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserId};

/// Session entity
///
/// A session is valid only while `now < expires_at`. Expiry is judged at
/// validation time; expired rows are not purged by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has lapsed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Request-scoped pairing of a resolved user and the session that proved it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationObject {
    pub user: User,
    pub session: Session,
}
