//! Session lookup against the hosted auth service.
//!
//! The guard and the auth store depend on [`SessionProvider`], never on a
//! concrete auth client. This crate only reads sessions; creating and
//! destroying them is the provider's job.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::AuthError;

/// The authenticated user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Proof of authentication issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: SessionUser,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<u64>,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` means "signed out"; `Err` means the provider could not answer.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    session: Option<Session>,
    outage: Option<String>,
    lookups: usize,
}

/// In-process provider. Holds at most one session and can simulate an
/// outage, in which case every call fails with [`AuthError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct MemorySessionProvider {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(session: Session) -> Self {
        let inner = MemoryInner {
            session: Some(session),
            ..MemoryInner::default()
        };
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    pub async fn sign_in(&self, session: Session) {
        self.inner.write().await.session = Some(session);
    }

    pub async fn set_outage(&self, reason: Option<String>) {
        self.inner.write().await.outage = reason;
    }

    /// Number of `get_session` calls served so far, failed ones included.
    pub async fn lookups(&self) -> usize {
        self.inner.read().await.lookups
    }
}

#[async_trait]
impl SessionProvider for MemorySessionProvider {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let mut inner = self.inner.write().await;
        inner.lookups += 1;
        if let Some(reason) = &inner.outage {
            return Err(AuthError::Unavailable(reason.clone()));
        }
        Ok(inner.session.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut inner = self.inner.write().await;
        if let Some(reason) = &inner.outage {
            return Err(AuthError::Unavailable(reason.clone()));
        }
        inner.session = None;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_session() -> Session {
    Session {
        access_token: "token-abc".to_string(),
        user: SessionUser {
            id: "user-1".to_string(),
            email: Some("ada@example.com".to_string()),
        },
        expires_at: Some(1_900_000_000),
    }
}
