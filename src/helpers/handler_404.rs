use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub async fn page_not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Rota não encontrada."})))
}
