//! In-memory stand-in for the hosted todo collection.
//!
//! Mirrors the json-server conventions the hosted API follows: numeric ids,
//! `_page` / `_limit` / `_sort` / `_order` on the list route, full replace on
//! `PUT`, and `200 {}` on delete.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

const DEFAULT_PAGE_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Body accepted by `POST` and `PUT`. Any `id` in the body is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl TodoInput {
    fn into_todo(self, id: u64) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
            description: self.description,
            user_id: self.user_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "_page")]
    pub page: Option<usize>,
    #[serde(rename = "_limit")]
    pub limit: Option<usize>,
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

impl Store {
    pub fn seeded(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            next_id,
            todos: todos.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(todos)));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(db)
}

/// A server that answers every request with `status`, for exercising
/// client-side failure handling.
pub fn failing_app(status: StatusCode) -> Router {
    Router::new().fallback(move || async move {
        tracing::warn!(%status, "mock failure");
        (status, "simulated failure")
    })
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, router).await
}

/// Apply json-server style sorting and pagination.
pub fn select(todos: &[Todo], query: &ListQuery) -> Vec<Todo> {
    let mut items = todos.to_vec();
    match query.sort.as_deref() {
        Some("title") => items.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id))),
        Some("completed") => {
            items.sort_by(|a, b| a.completed.cmp(&b.completed).then(a.id.cmp(&b.id)))
        }
        Some("userId") => items.sort_by(|a, b| a.user_id.cmp(&b.user_id).then(a.id.cmp(&b.id))),
        _ => items.sort_by_key(|t| t.id),
    }
    if query.order.as_deref() == Some("desc") {
        items.reverse();
    }

    let limit = match (query.page, query.limit) {
        (_, Some(limit)) => limit,
        (Some(_), None) => DEFAULT_PAGE_LIMIT,
        (None, None) => return items,
    };
    let page = query.page.unwrap_or(1).max(1);
    items
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect()
}

async fn list_todos(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> (HeaderMap, Json<Vec<Todo>>) {
    let store = db.read().await;
    let all: Vec<Todo> = store.todos.values().cloned().collect();
    let mut headers = HeaderMap::new();
    headers.insert("x-total-count", HeaderValue::from(all.len()));
    tracing::debug!(?query, total = all.len(), "list todos");
    (headers, Json(select(&all, &query)))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let id = store.allocate_id();
    let todo = input.into_todo(id);
    store.todos.insert(id, todo.clone());
    tracing::debug!(id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let slot = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_todo(id);
    Ok(Json(slot.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| Json(serde_json::json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, title: &str) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed: false,
            description: None,
            user_id: Some(1),
        }
    }

    fn query(page: Option<usize>, limit: Option<usize>, sort: &str, order: &str) -> ListQuery {
        ListQuery {
            page,
            limit,
            sort: Some(sort.to_string()),
            order: Some(order.to_string()),
        }
    }

    #[test]
    fn todo_without_description_omits_field() {
        let json = serde_json::to_value(todo(1, "Test")).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn input_ignores_body_id() {
        let input: TodoInput =
            serde_json::from_str(r#"{"id":99,"title":"x","completed":true}"#).unwrap();
        let todo = input.into_todo(4);
        assert_eq!(todo.id, 4);
        assert!(todo.completed);
    }

    #[test]
    fn input_rejects_missing_title() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn select_sorts_desc_and_pages() {
        let all: Vec<Todo> = (1..=25).map(|i| todo(i, "t")).collect();
        let page = select(&all, &query(Some(1), Some(10), "id", "desc"));
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, 25);
        assert_eq!(page[9].id, 16);

        let page = select(&all, &query(Some(3), Some(10), "id", "desc"));
        assert_eq!(page.iter().map(|t| t.id).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn select_without_paging_returns_everything() {
        let all: Vec<Todo> = (1..=15).map(|i| todo(i, "t")).collect();
        assert_eq!(select(&all, &ListQuery::default()).len(), 15);
    }

    #[test]
    fn select_page_without_limit_uses_default() {
        let all: Vec<Todo> = (1..=15).map(|i| todo(i, "t")).collect();
        let q = ListQuery {
            page: Some(2),
            ..ListQuery::default()
        };
        assert_eq!(select(&all, &q).len(), 5);
    }

    #[test]
    fn select_huge_page_is_empty() {
        let all: Vec<Todo> = (1..=3).map(|i| todo(i, "t")).collect();
        assert!(select(&all, &query(Some(usize::MAX), Some(10), "id", "desc")).is_empty());
        assert!(select(&all, &query(Some(2), Some(usize::MAX), "id", "asc")).is_empty());
    }

    #[test]
    fn select_sorts_by_title() {
        let all = vec![todo(1, "b"), todo(2, "a"), todo(3, "c")];
        let page = select(&all, &query(None, None, "title", "asc"));
        assert_eq!(page.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn seeded_store_continues_ids() {
        let mut store = Store::seeded(vec![todo(7, "x")]);
        assert_eq!(store.allocate_id(), 8);
    }
}
