//! Route protection run before every navigation.
//!
//! The guard keeps no state between navigations. Each check is a single
//! session lookup with no retry and no timeout of its own; a provider that
//! hangs holds the navigation until it answers.

use crate::router::{RouteDescriptor, LOGIN_PATH, SERVER_ERROR_PATH};
use crate::session::SessionProvider;

/// Progress of one guard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Checking,
    Allowed,
    DeniedToLogin,
    DeniedToServerError,
}

impl GuardState {
    /// Where navigation must go instead, if anywhere.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GuardState::DeniedToLogin => Some(LOGIN_PATH),
            GuardState::DeniedToServerError => Some(SERVER_ERROR_PATH),
            GuardState::Idle | GuardState::Checking | GuardState::Allowed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GuardState::Idle | GuardState::Checking)
    }
}

pub struct NavigationGuard<P> {
    sessions: P,
}

impl<P: SessionProvider> NavigationGuard<P> {
    pub fn new(sessions: P) -> Self {
        Self { sessions }
    }

    /// Decide whether navigation to `target` may complete.
    pub async fn check(&self, target: &RouteDescriptor) -> GuardState {
        let mut state = GuardState::Idle;
        while !state.is_terminal() {
            state = self.step(state, target).await;
        }
        state
    }

    async fn step(&self, state: GuardState, target: &RouteDescriptor) -> GuardState {
        match state {
            GuardState::Idle if !target.requires_auth => GuardState::Allowed,
            GuardState::Idle => GuardState::Checking,
            GuardState::Checking => match self.sessions.get_session().await {
                Ok(Some(_)) => GuardState::Allowed,
                Ok(None) => {
                    tracing::debug!(path = target.path, "no session, redirecting to login");
                    GuardState::DeniedToLogin
                }
                Err(err) => {
                    tracing::error!(error = %err, path = target.path, "auth check failed");
                    GuardState::DeniedToServerError
                }
            },
            terminal => terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Route, RouteTable};
    use crate::session::{sample_session, MemorySessionProvider};

    #[tokio::test]
    async fn public_routes_never_query_sessions() {
        let provider = MemorySessionProvider::new();
        provider.set_outage(Some("down".into())).await;
        let guard = NavigationGuard::new(provider.clone());

        for route in RouteTable::standard().routes().filter(|r| !r.requires_auth) {
            assert_eq!(guard.check(route).await, GuardState::Allowed, "{}", route.path);
        }
        assert_eq!(provider.lookups().await, 0);
    }

    #[tokio::test]
    async fn protected_route_with_session_is_allowed() {
        let provider = MemorySessionProvider::signed_in(sample_session());
        let guard = NavigationGuard::new(provider.clone());
        let dashboard = RouteDescriptor::protected("/dashboard", Route::Dashboard);

        let state = guard.check(&dashboard).await;

        assert_eq!(state, GuardState::Allowed);
        assert_eq!(state.redirect(), None);
        assert_eq!(provider.lookups().await, 1);
    }

    #[tokio::test]
    async fn protected_route_without_session_goes_to_login() {
        let guard = NavigationGuard::new(MemorySessionProvider::new());
        let dashboard = RouteDescriptor::protected("/dashboard", Route::Dashboard);

        let state = guard.check(&dashboard).await;

        assert_eq!(state, GuardState::DeniedToLogin);
        assert_eq!(state.redirect(), Some("/login"));
    }

    #[tokio::test]
    async fn provider_failure_goes_to_server_error_without_retry() {
        let provider = MemorySessionProvider::signed_in(sample_session());
        provider.set_outage(Some("failed to fetch".into())).await;
        let guard = NavigationGuard::new(provider.clone());
        let dashboard = RouteDescriptor::protected("/dashboard", Route::Dashboard);

        let state = guard.check(&dashboard).await;

        assert_eq!(state, GuardState::DeniedToServerError);
        assert_eq!(state.redirect(), Some("/server-error"));
        assert_eq!(provider.lookups().await, 1);
    }

    #[test]
    fn only_denials_redirect() {
        assert_eq!(GuardState::Idle.redirect(), None);
        assert_eq!(GuardState::Checking.redirect(), None);
        assert!(!GuardState::Checking.is_terminal());
        assert!(GuardState::DeniedToLogin.is_terminal());
    }
}
