//! CRUD operations against the remote todo collection.
//!
//! Each call performs exactly one round trip through the transport. Failures
//! are logged and handed back to the caller unchanged; retrying is the
//! caller's business (see [`crate::query`]).

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{ListParams, NewTodo, Todo};

pub struct TodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub async fn list_todos(&self, params: &ListParams) -> Result<Vec<Todo>, ApiError> {
        let result = async {
            let req = self.client.build_list_todos(params);
            let res = self.transport.execute(req).await?;
            self.client.parse_list_todos(res)
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, "error fetching todos"))
    }

    pub async fn create_todo(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let result = async {
            let req = self.client.build_create_todo(input)?;
            let res = self.transport.execute(req).await?;
            self.client.parse_create_todo(res)
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, "error creating todo"))
    }

    pub async fn update_todo(&self, id: u64, input: &Todo) -> Result<Todo, ApiError> {
        let result = async {
            let req = self.client.build_update_todo(id, input)?;
            let res = self.transport.execute(req).await?;
            self.client.parse_update_todo(res)
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, id, "error updating todo"))
    }

    pub async fn delete_todo(&self, id: u64) -> Result<u64, ApiError> {
        let result = async {
            let req = self.client.build_delete_todo(id);
            let res = self.transport.execute(req).await?;
            self.client.parse_delete_todo(id, res)
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, id, "error deleting todo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::test_support::{ok, ScriptedTransport};

    fn service(transport: ScriptedTransport) -> TodoService<ScriptedTransport> {
        TodoService::new(TodoClient::new("http://api.test"), transport)
    }

    #[tokio::test]
    async fn list_performs_one_round_trip() {
        let transport = ScriptedTransport::new(vec![ok(200, r#"[{"id":1,"title":"a"}]"#)]);
        let svc = service(transport.clone());

        let todos = svc.list_todos(&ListParams::default()).await.unwrap();

        assert_eq!(todos[0].description, "");
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url,
            "http://api.test/todos?_page=1&_limit=10&_sort=id&_order=desc"
        );
    }

    #[tokio::test]
    async fn transport_error_is_returned_unchanged() {
        let transport =
            ScriptedTransport::new(vec![Err(ApiError::Network("connection refused".into()))]);
        let svc = service(transport.clone());

        let err = svc.list_todos(&ListParams::default()).await.unwrap_err();

        assert!(matches!(err, ApiError::Network(ref msg) if msg == "connection refused"));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn create_sends_post_and_parses_item() {
        let transport = ScriptedTransport::new(vec![ok(
            201,
            r#"{"id":201,"title":"x","completed":false,"description":""}"#,
        )]);
        let svc = service(transport.clone());

        let todo = svc.create_todo(&NewTodo::new("x")).await.unwrap();

        assert_eq!(todo.id, 201);
        assert_eq!(transport.requests()[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn update_surfaces_server_status() {
        let transport = ScriptedTransport::new(vec![ok(500, "oops")]);
        let svc = service(transport);
        let todo = Todo {
            id: 1,
            title: "t".into(),
            completed: false,
            description: String::new(),
            user_id: None,
        };

        let err = svc.update_todo(1, &todo).await.unwrap_err();

        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn delete_returns_id() {
        let transport = ScriptedTransport::new(vec![ok(200, "{}")]);
        let svc = service(transport.clone());

        assert_eq!(svc.delete_todo(9).await.unwrap(), 9);
        assert_eq!(transport.requests()[0].url, "http://api.test/todos/9");
    }
}
