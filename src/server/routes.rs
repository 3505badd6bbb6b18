use axum::Json;
use serde_json::{Value, json};

/// Demo backend endpoint.
pub async fn dummy() -> Json<Value> {
    Json(json!({
        "message": "Hello from Server 1",
    }))
}
