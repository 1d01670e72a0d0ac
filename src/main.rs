use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use restaurante_perto_backend::clients::google_places::GooglePlacesClient;
use restaurante_perto_backend::config::Config;
use restaurante_perto_backend::controller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    let places_client = Arc::new(GooglePlacesClient::new(config.api_key.clone())?);

    controller::serve(places_client, &config).await
}
