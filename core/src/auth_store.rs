//! Keeps the signed-in user in app state in step with the session provider.

use crate::error::AuthError;
use crate::session::SessionProvider;
use crate::state::AppState;

pub struct AuthStore<P> {
    sessions: P,
    state: AppState,
}

impl<P: SessionProvider> AuthStore<P> {
    pub fn new(sessions: P, state: AppState) -> Self {
        Self { sessions, state }
    }

    /// Refresh the current user from the provider's session.
    pub async fn fetch_user(&self) -> Result<(), AuthError> {
        let session = self.sessions.get_session().await?;
        let user = session.map(|s| s.user);
        tracing::debug!(signed_in = user.is_some(), "fetched current user");
        self.state.set_current_user(user).await;
        Ok(())
    }

    /// Sign out with the provider, then forget the current user. If the
    /// provider fails the user is left in place.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.sessions.sign_out().await?;
        self.state.set_current_user(None).await;
        tracing::info!("signed out");
        Ok(())
    }
}
