use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: u64, user_id: i64, title: &str, completed: bool) -> Self {
        Self {
            id,
            user_id,
            title: title.to_string(),
            completed,
        }
    }
}

/// Read-only store; the service never mutates its todos.
pub type Db = Arc<Vec<Todo>>;

/// The fixture served by `app()`.
pub fn seed() -> Vec<Todo> {
    vec![
        Todo::new(1, 1, "delectus aut autem", false),
        Todo::new(2, 1, "quis ut nam facilis et officia qui", false),
        Todo::new(3, 1, "fugiat veniam minus", false),
        Todo::new(4, 1, "et porro tempora", true),
        Todo::new(5, 1, "laboriosam mollitia et enim quasi adipisci quia provident illum", false),
        Todo::new(6, 2, "qui ullam ratione quibusdam voluptatem quia omnis", false),
        Todo::new(7, 2, "illo expedita consequatur quia in", false),
        Todo::new(8, 2, "quo adipisci enim quam ut ab", true),
        Todo::new(9, 2, "molestiae perspiciatis ipsa", false),
        Todo::new(10, 2, "illo est ratione doloremque quia maiores aut", true),
    ]
}

pub fn app() -> Router {
    app_with(seed())
}

/// Router serving exactly `todos`, in the given order.
pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(todos);
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/{id}", get(get_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, todos: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(todos)).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    debug!(count = db.len(), "GET /todos");
    Json(db.as_ref().clone())
}

/// Missing ids answer 404 with an empty object, like the public service.
async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    debug!(id, "GET /todos/{{id}}");
    db.iter()
        .find(|todo| todo.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({}))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo::new(1, 7, "Test", false);
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn todo_rejects_snake_case_owner() {
        let result: Result<Todo, _> =
            serde_json::from_str(r#"{"id":1,"user_id":1,"title":"x","completed":false}"#);
        assert!(result.is_err());
    }

    #[test]
    fn todo_accepts_negative_owner() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":1,"userId":-3,"title":"x","completed":false}"#).unwrap();
        assert_eq!(todo.user_id, -3);
    }

    #[test]
    fn seed_ids_are_unique_and_positive() {
        let todos = seed();
        let mut ids: Vec<u64> = todos.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), todos.len());
        assert!(ids.iter().all(|&id| id > 0));
    }

    #[test]
    fn seed_mixes_open_and_completed() {
        let todos = seed();
        assert!(todos.iter().any(|t| t.completed));
        assert!(todos.iter().any(|t| !t.completed));
    }
}
