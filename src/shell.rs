//! Host surface for the chat UI
//!
//! Reduces the source page's mount and logout flows to their logic: the
//! login guard on mount and the log-and-navigate-anyway logout. Rendering
//! and routing stay with the host; this only decides where to go.

use crate::auth::{AuthService, Navigator, LOGIN_ROUTE};
use crate::reply::ReplyGenerator;
use crate::runtime::{SessionHandle, SessionManager};
use std::sync::Arc;

/// Composition of the session engine with its host collaborators
pub struct ChatShell<A, N, G>
where
    A: AuthService,
    N: Navigator,
    G: ReplyGenerator + 'static,
{
    auth: A,
    nav: N,
    manager: Arc<SessionManager<G>>,
}

impl<A, N, G> ChatShell<A, N, G>
where
    A: AuthService,
    N: Navigator,
    G: ReplyGenerator + 'static,
{
    pub fn new(auth: A, nav: N, manager: Arc<SessionManager<G>>) -> Self {
        Self { auth, nav, manager }
    }

    /// Mount the chat surface
    ///
    /// Returns the session handle, or `None` after redirecting to the login
    /// route when there is no valid session.
    pub async fn mount(&self, session_id: &str) -> Option<SessionHandle> {
        if !self.auth.has_valid_session() {
            tracing::info!(session_id = %session_id, "No valid session, redirecting to login");
            self.nav.redirect(LOGIN_ROUTE);
            return None;
        }
        Some(self.manager.get_or_create(session_id).await)
    }

    /// Log out and navigate to the login route
    ///
    /// A failed logout is logged and otherwise ignored; the user still
    /// navigates away. All sessions are torn down either way, cancelling any
    /// pending replies.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            tracing::error!(error = %e, "Logout failed");
        }
        self.manager.shutdown().await;
        self.nav.redirect(LOGIN_ROUTE);
    }
}
