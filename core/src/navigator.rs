//! Resolves locations, runs the guard and records where navigation landed.

use thiserror::Error;

use crate::guard::{GuardState, NavigationGuard};
use crate::router::{Route, RouteTable};
use crate::session::SessionProvider;
use crate::state::AppState;

const MAX_REDIRECTS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("too many redirects navigating to {0}")]
    RedirectLoop(String),
}

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub landed: Route,
    /// Guard verdict for the requested route.
    pub verdict: GuardState,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.verdict.redirect().is_some()
    }
}

pub struct Navigator<P> {
    routes: RouteTable,
    guard: NavigationGuard<P>,
    state: AppState,
}

impl<P: SessionProvider> Navigator<P> {
    pub fn new(routes: RouteTable, guard: NavigationGuard<P>, state: AppState) -> Self {
        Self {
            routes,
            guard,
            state,
        }
    }

    pub async fn navigate(&self, location: &str) -> Result<Navigation, NavigationError> {
        let requested = self.routes.resolve(location);
        let verdict = self.guard.check(requested).await;

        let mut target = requested;
        let mut state = verdict;
        let mut hops = 0;
        while let Some(next) = state.redirect() {
            hops += 1;
            if hops > MAX_REDIRECTS {
                return Err(NavigationError::RedirectLoop(location.to_string()));
            }
            target = self.routes.resolve(next);
            state = self.guard.check(target).await;
        }

        tracing::debug!(
            from = location,
            to = target.path,
            verdict = ?verdict,
            "navigation complete"
        );
        self.state.set_current_route(target.route).await;
        Ok(Navigation {
            requested: requested.route,
            landed: target.route,
            verdict,
        })
    }
}
