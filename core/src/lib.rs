//! Client core for the todo app.
//!
//! # Overview
//! Talks to a hosted REST collection of todo items and guards the app's
//! routes behind a session held by a hosted auth service. Requests are built
//! and parsed as plain data (`TodoClient`); a `Transport` performs the round
//! trip in between, which keeps request encoding deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url` and the user id
//!   stamped on full replacements.
//! - `TodoService` does one round trip per CRUD call and never retries;
//!   read-type queries are retried by `query::with_retry` at the app level.
//! - `NavigationGuard` is stateless per navigation and consults a
//!   `SessionProvider` only for routes that require auth.
//! - Caught errors go through `classify`, which prefers the typed
//!   `FailureKind` and falls back to message markers for foreign errors.
//! - Shared state (current user, last server error, current route) lives in
//!   one owned `AppState` handed to the parts that need it.

pub mod app;
pub mod auth_store;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod navigator;
pub mod query;
pub mod router;
pub mod service;
pub mod session;
pub mod state;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use classify::{classify, Caught, Classified, ServerErrorHandler};
pub use client::TodoClient;
pub use config::Config;
pub use error::{ApiError, AuthError, FailureKind};
pub use guard::{GuardState, NavigationGuard};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use navigator::{Navigation, NavigationError, Navigator};
pub use router::{Route, RouteDescriptor, RouteTable};
pub use service::TodoService;
pub use session::{MemorySessionProvider, Session, SessionProvider, SessionUser};
pub use state::AppState;
pub use transport::{ReqwestTransport, Transport};
pub use types::{ListParams, NewTodo, SortOrder, Todo};
