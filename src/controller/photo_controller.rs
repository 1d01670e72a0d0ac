use std::sync::Arc;
use axum::body::StreamBody;
use axum::extract::Query;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use crate::clients::google_places::GooglePlacesClient;
use crate::controller::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/photo", get(proxy_photo))
        .route_layer(Extension(app_state.places_client))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PhotoParams {
    pub r#ref: Option<String>,
    pub maxwidth: Option<String>,
}

pub async fn proxy_photo(
    Extension(places_client): Extension<Arc<GooglePlacesClient>>,
    Query(query): Query<PhotoParams>,
) -> impl IntoResponse {
    let reference = match query.r#ref {
        Some(reference) if !reference.is_empty() => reference,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Parâmetro 'ref' é obrigatório."})),
            ).into_response();
        }
    };
    let maxwidth = query.maxwidth.unwrap_or_else(|| "400".to_string());

    let upstream = match places_client.fetch_photo(&reference, &maxwidth).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Something went wrong fetching the place photo due to: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Falha ao carregar foto do Google."})),
            ).into_response();
        }
    };

    if upstream.status() != StatusCode::OK {
        return upstream.status().into_response();
    }

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    (
        [(CONTENT_TYPE, content_type)],
        StreamBody::new(upstream.bytes_stream()),
    ).into_response()
}
