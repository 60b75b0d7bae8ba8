//! Session cookie authentication
//!
//! Resolves the `session` cookie of an inbound request to a stored session
//! and the user that owns it. The session and user stores are reached
//! through the [`repositories::SessionRepository`] and
//! [`repositories::UserRepository`] traits, so the validator runs the same
//! against PostgreSQL or the in-memory stores.
//!
//! ```rust,no_run
//! use axum::http::HeaderMap;
//! use session_auth::{
//!     context::RequestContext,
//!     repositories::{InMemorySessionRepository, InMemoryUserRepository},
//!     validator::validate_request,
//! };
//!
//! # async fn run(headers: HeaderMap) {
//! let sessions = InMemorySessionRepository::new();
//! let users = InMemoryUserRepository::new();
//! match validate_request(&RequestContext::background(), &headers, &sessions, &users).await {
//!     Ok(auth) => println!("authenticated {}", auth.user.id),
//!     Err(err) => println!("rejected: {}", err.kind().as_str()),
//! }
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validator;

pub use state::AppState;
