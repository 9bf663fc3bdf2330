//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and the user id stamped onto full
//! replacements, and carries no mutable state between calls. Each CRUD
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. The round trip in
//! between belongs to a [`Transport`](crate::transport::Transport).

use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreatePayload, ListParams, NewTodo, Todo};

pub const DEFAULT_USER_ID: u64 = 1;

/// Synchronous, stateless client for the todo collection.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
    user_id: u64,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: DEFAULT_USER_ID,
        }
    }

    /// Override the user id written by `build_update_todo`.
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn build_list_todos(&self, params: &ListParams) -> HttpRequest {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("_page", &params.page.to_string())
            .append_pair("_limit", &params.limit.to_string())
            .append_pair("_sort", &params.sort)
            .append_pair("_order", params.order.as_str())
            .finish();
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/todos?{query}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// New items are always submitted open and with a description, even when
    /// the caller supplied neither.
    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let payload = CreatePayload {
            title: &input.title,
            completed: false,
            description: input.description.as_deref().unwrap_or(""),
            user_id: input.user_id,
        };
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/todos", self.base_url),
            headers: json_headers(),
            body: Some(to_json(&payload)?),
        })
    }

    /// Full replace of the item at `id`. The owner is always the client's
    /// configured user.
    pub fn build_update_todo(&self, id: u64, input: &Todo) -> Result<HttpRequest, ApiError> {
        let payload = Todo {
            user_id: Some(self.user_id),
            ..input.clone()
        };
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_json(&payload)?),
        })
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// Returns the id that was deleted; the body is ignored.
    pub fn parse_delete_todo(&self, id: u64, response: HttpResponse) -> Result<u64, ApiError> {
        check_status(&response)?;
        Ok(id)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
