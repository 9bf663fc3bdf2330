//! Decides how a caught error is shown to the user.
//!
//! Errors from this crate carry a [`FailureKind`], which settles the question
//! on its own. Foreign errors only have their message, so the message is also
//! checked against a fixed set of case-sensitive markers. A server-type
//! failure asks for navigation to the error page; every recognised error is
//! recorded as the last server error.
//!
//! Thrown values that are not errors at all ([`Caught::Value`]) are dropped
//! without a trace. That gap is known and kept as-is.

use std::error::Error;

use crate::error::{ApiError, AuthError, FailureKind};
use crate::router::SERVER_ERROR_PATH;
use crate::state::AppState;

pub const SERVER_MARKERS: [&str; 4] = ["500", "network", "failed to fetch", "supabase"];

/// Something a caller caught.
#[derive(Debug, Clone, Copy)]
pub enum Caught<'a> {
    Error(&'a (dyn Error + 'static)),
    Value(&'a serde_json::Value),
}

impl<'a> From<&'a ApiError> for Caught<'a> {
    fn from(err: &'a ApiError) -> Self {
        Caught::Error(err)
    }
}

impl<'a> From<&'a AuthError> for Caught<'a> {
    fn from(err: &'a AuthError) -> Self {
        Caught::Error(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub message: String,
    pub kind: FailureKind,
    pub server_failure: bool,
}

impl Classified {
    pub fn redirect(&self) -> Option<&'static str> {
        self.server_failure.then_some(SERVER_ERROR_PATH)
    }
}

/// Classify without side effects. `None` for unrecognised values.
pub fn classify(caught: Caught<'_>) -> Option<Classified> {
    let Caught::Error(err) = caught else {
        return None;
    };
    let message = err.to_string();
    let kind = failure_kind(err);
    let server_failure = kind.is_server_failure() || has_server_marker(&message);
    Some(Classified {
        message,
        kind,
        server_failure,
    })
}

pub fn has_server_marker(message: &str) -> bool {
    SERVER_MARKERS.iter().any(|marker| message.contains(marker))
}

fn failure_kind(err: &(dyn Error + 'static)) -> FailureKind {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        api.kind()
    } else if let Some(auth) = err.downcast_ref::<AuthError>() {
        auth.kind()
    } else {
        FailureKind::Other
    }
}

/// Records caught errors in app state and reports where to navigate.
#[derive(Debug, Clone)]
pub struct ServerErrorHandler {
    state: AppState,
}

impl ServerErrorHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Returns the error page path when the error looks server-side.
    pub async fn handle(&self, caught: Caught<'_>) -> Option<&'static str> {
        let classified = classify(caught)?;
        tracing::error!(
            error = %classified.message,
            kind = ?classified.kind,
            server_failure = classified.server_failure,
            "server error"
        );
        self.state.set_server_error(classified.message.clone()).await;
        classified.redirect()
    }
}
