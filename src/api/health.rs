use axum::response::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Backend is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> crate::api::ApiError {
    crate::api::ApiError::NotFound("Endpoint not found".to_string())
}
