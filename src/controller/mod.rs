use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use crate::clients::google_places::GooglePlacesClient;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;

pub mod health_check;
pub mod home;
pub mod photo_controller;
pub mod search_controller;

#[derive(Clone)]
pub struct AppState {
    pub places_client: Arc<GooglePlacesClient>,
}

pub async fn serve(
    places_client: Arc<GooglePlacesClient>,
    config: &Config,
) -> anyhow::Result<()> {
    let app_state = AppState { places_client };

    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .map(|s| s.parse())
        .collect::<Result<Vec<HeaderValue>, _>>()
        .context("Invalid origin URL in ORIGIN_URLS")?;

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        )
        .fallback(page_not_found_handler);

    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(home::router())
        .merge(health_check::router())
        .nest(
            "/api",
            search_controller::router(app_state.clone())
                .merge(photo_controller::router(app_state)),
        )
}
