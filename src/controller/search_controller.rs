use std::sync::Arc;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use crate::clients::google_places::GooglePlacesClient;
use crate::controller::AppState;
use crate::models::place::{transform_place, NormalizedPlace};

const MAX_SEARCH_PAGES: u32 = 2;
const MAX_RESULTS: usize = 40;
const MIN_RADIUS_M: i64 = 200;
const MAX_RADIUS_M: i64 = 10_000;

/// Sort sentinel that ranks places with no computable distance last.
const UNKNOWN_DISTANCE_KM: f64 = 9999.0;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/search", post(search_places))
        .route_layer(Extension(app_state.places_client))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub radius_km: Option<f64>,
    pub open_now: Option<bool>,
    pub sort_by: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub total_found: usize,
    pub returned: usize,
    pub items: Vec<NormalizedPlace>,
}

pub async fn search_places(
    Extension(places_client): Extension<Arc<GooglePlacesClient>>,
    Json(body): Json<SearchRequest>,
) -> impl IntoResponse {
    let query = body.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return validation_error("O campo 'query' é obrigatório.");
    }

    let (lat_raw, lng_raw) = match (&body.latitude, &body.longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return validation_error("Latitude e longitude são obrigatórios."),
    };
    let (lat, lng) = match (parse_coordinate(lat_raw), parse_coordinate(lng_raw)) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return validation_error("Coordenadas inválidas."),
    };

    let radius_km = body.radius_km.unwrap_or(3.0);
    let radius_m = ((radius_km * 1000.0) as i64).clamp(MIN_RADIUS_M, MAX_RADIUS_M) as u32;

    let open_now = body.open_now.unwrap_or(false);
    let sort_by = body
        .sort_by
        .as_deref()
        .unwrap_or("distance")
        .trim()
        .to_lowercase();

    let raw_places = match places_client
        .fetch_places_nearby(lat, lng, &query, radius_m, MAX_SEARCH_PAGES, open_now)
        .await
    {
        Ok(places) => places,
        Err(e) => {
            warn!("Something went wrong searching Google Places due to: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": e.to_string()})),
            ).into_response();
        }
    };

    let mut filtered: Vec<NormalizedPlace> = raw_places
        .iter()
        .map(|place| transform_place(place, lat, lng))
        .filter(|item| passes_open_now_filter(open_now, item))
        .collect();

    sort_places(&mut filtered, &sort_by);

    let total_found = filtered.len();
    filtered.truncate(MAX_RESULTS);

    let response = SearchResponse {
        total_found,
        returned: filtered.len(),
        items: filtered,
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn validation_error(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
}

/// Coordinates arrive as JSON numbers, but numeric strings are coerced too
/// so older frontends keep working.
fn parse_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// An unknown open_now is kept: only an explicit "closed" is filtered out.
fn passes_open_now_filter(requested: bool, item: &NormalizedPlace) -> bool {
    !(requested && item.open_now == Some(false))
}

fn sort_places(items: &mut [NormalizedPlace], sort_by: &str) {
    if sort_by == "rating" {
        items.sort_by(|a, b| b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)));
    } else {
        items.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(UNKNOWN_DISTANCE_KM)
                .total_cmp(&b.distance_km.unwrap_or(UNKNOWN_DISTANCE_KM))
        });
    }
}
