//! Application state shared across handlers

use std::{sync::Arc, time::Duration};

use crate::{
    repositories::{SessionRepository, UserRepository},
    validator::SessionValidator,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session_repository: Arc<dyn SessionRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub validator: SessionValidator,
    /// Deadline applied to each request's validation
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        user_repository: Arc<dyn UserRepository>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            session_repository,
            user_repository,
            validator: SessionValidator::new(),
            request_timeout,
        }
    }

    /// Replace the validator, e.g. to pin its clock
    pub fn with_validator(mut self, validator: SessionValidator) -> Self {
        self.validator = validator;
        self
    }
}
