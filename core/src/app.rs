//! Wires the todo service, session handling, routing and error reporting
//! around one shared [`AppState`].
//!
//! Every todo operation that fails is handed to the [`ServerErrorHandler`]
//! before the error is returned, so a server-side failure also moves the app
//! to the error page.

use crate::auth_store::AuthStore;
use crate::classify::{Caught, ServerErrorHandler};
use crate::client::TodoClient;
use crate::config::Config;
use crate::error::{ApiError, AuthError};
use crate::guard::NavigationGuard;
use crate::navigator::{Navigation, NavigationError, Navigator};
use crate::query::with_retry;
use crate::router::RouteTable;
use crate::service::TodoService;
use crate::session::SessionProvider;
use crate::state::AppState;
use crate::transport::Transport;
use crate::types::{ListParams, NewTodo, Todo};

pub struct App<P, T> {
    config: Config,
    state: AppState,
    navigator: Navigator<P>,
    auth: AuthStore<P>,
    todos: TodoService<T>,
    errors: ServerErrorHandler,
}

impl<P, T> App<P, T>
where
    P: SessionProvider + Clone,
    T: Transport,
{
    pub fn new(config: Config, sessions: P, transport: T) -> Self {
        let state = AppState::new();
        let client = TodoClient::new(&config.api_url).with_user_id(config.user_id);
        Self {
            navigator: Navigator::new(
                RouteTable::standard(),
                NavigationGuard::new(sessions.clone()),
                state.clone(),
            ),
            auth: AuthStore::new(sessions, state.clone()),
            todos: TodoService::new(client, transport),
            errors: ServerErrorHandler::new(state.clone()),
            config,
            state,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn navigate(&self, location: &str) -> Result<Navigation, NavigationError> {
        self.navigator.navigate(location).await
    }

    pub async fn fetch_user(&self) -> Result<(), AuthError> {
        self.auth.fetch_user().await
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.auth.logout().await
    }

    /// Record a caught error and follow the error-page redirect if it asks
    /// for one.
    pub async fn report_error(&self, caught: Caught<'_>) -> Option<Navigation> {
        let path = self.errors.handle(caught).await?;
        match self.navigator.navigate(path).await {
            Ok(nav) => Some(nav),
            Err(err) => {
                tracing::warn!(error = %err, "could not open error page");
                None
            }
        }
    }

    /// One dashboard page, newest first. Retried per `read_retries`.
    pub async fn load_todos(&self, page: u32) -> Result<Vec<Todo>, ApiError> {
        let params = ListParams {
            page,
            limit: self.config.page_limit,
            ..ListParams::default()
        };
        let result = with_retry(self.config.read_retries, || self.todos.list_todos(&params)).await;
        self.reported(result).await
    }

    pub async fn add_todo(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let result = self.todos.create_todo(input).await;
        self.reported(result).await
    }

    pub async fn save_todo(&self, todo: &Todo) -> Result<Todo, ApiError> {
        let result = self.todos.update_todo(todo.id, todo).await;
        self.reported(result).await
    }

    pub async fn remove_todo(&self, id: u64) -> Result<u64, ApiError> {
        let result = self.todos.delete_todo(id).await;
        self.reported(result).await
    }

    async fn reported<V>(&self, result: Result<V, ApiError>) -> Result<V, ApiError> {
        if let Err(err) = &result {
            self.report_error(err.into()).await;
        }
        result
    }
}
