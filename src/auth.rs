//! Authentication and navigation collaborator seams
//!
//! The engine never reads ambient token state; the host injects an
//! [`AuthService`] (replacing the source's global `localStorage` check) and
//! a [`Navigator`] for redirects.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Route the shell redirects to when there is no valid session
pub const LOGIN_ROUTE: &str = "/login";

/// Authentication errors; logged, never fatal to navigation
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("logout request failed: {0}")]
    Logout(String),
    #[error("no active session")]
    NoSession,
}

/// Authentication collaborator
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Whether a valid access token is present for the current user
    fn has_valid_session(&self) -> bool;

    /// Invalidate the current session
    async fn logout(&self) -> Result<(), AuthError>;
}

/// Navigation collaborator; the engine only ever redirects
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

#[async_trait]
impl<T: AuthService + ?Sized> AuthService for Arc<T> {
    fn has_valid_session(&self) -> bool {
        (**self).has_valid_session()
    }

    async fn logout(&self) -> Result<(), AuthError> {
        (**self).logout().await
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn redirect(&self, route: &str) {
        (**self).redirect(route);
    }
}
