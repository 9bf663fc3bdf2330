//! Shared app state, owned in one place and handed to whoever needs it.
//!
//! Every field is last-write-wins; there is no history.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::router::Route;
use crate::session::SessionUser;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub current_user: Option<SessionUser>,
    pub server_error: Option<String>,
    pub current_route: Option<Route>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    inner: Arc<RwLock<Snapshot>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.inner.read().await.current_user.clone()
    }

    pub async fn set_current_user(&self, user: Option<SessionUser>) {
        self.inner.write().await.current_user = user;
    }

    pub async fn server_error(&self) -> Option<String> {
        self.inner.read().await.server_error.clone()
    }

    pub async fn set_server_error(&self, message: impl Into<String>) {
        self.inner.write().await.server_error = Some(message.into());
    }

    pub async fn current_route(&self) -> Option<Route> {
        self.inner.read().await.current_route
    }

    pub async fn set_current_route(&self, route: Route) {
        self.inner.write().await.current_route = Some(route);
    }
}
