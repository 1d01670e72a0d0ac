use std::collections::HashSet;
use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::StatusCode;

use crate::models::google_places::{PlacesSearchResponse, RawPlace};

const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Next-page tokens only become valid a moment after Google hands them out.
const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

pub struct GooglePlacesClient {
    http: reqwest::Client,
    api_key: String,
    search_url: String,
    photo_url: String,
    page_delay: Duration,
}

impl GooglePlacesClient {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_endpoints(
            api_key,
            NEARBY_SEARCH_URL.to_string(),
            PHOTO_URL.to_string(),
            PAGE_TOKEN_DELAY,
        )
    }

    /// Endpoints and pagination delay are injectable so tests can point the
    /// client at a stub server without real waits.
    pub fn with_endpoints(
        api_key: String,
        search_url: String,
        photo_url: String,
        page_delay: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Error building the Google Places HTTP client")?;

        Ok(Self {
            http,
            api_key,
            search_url,
            photo_url,
            page_delay,
        })
    }

    pub async fn fetch_places_nearby(
        &self,
        lat: f64,
        lng: f64,
        query: &str,
        radius_m: u32,
        max_pages: u32,
        open_now: bool,
    ) -> anyhow::Result<Vec<RawPlace>> {
        let mut results: Vec<RawPlace> = Vec::new();
        let mut next_token: Option<String> = None;

        for _ in 0..max_pages {
            let mut params = vec![
                ("location", format!("{},{}", lat, lng)),
                ("radius", radius_m.to_string()),
                ("type", "restaurant".to_string()),
                ("keyword", query.to_string()),
                ("key", self.api_key.clone()),
                ("language", "pt-BR".to_string()),
            ];
            if open_now {
                params.push(("opennow", "true".to_string()));
            }
            if let Some(token) = &next_token {
                params.push(("pagetoken", token.clone()));
            }

            let response = self
                .http
                .get(&self.search_url)
                .query(&params)
                .send()
                .await
                .map_err(|e| anyhow!("Erro de conexão com Google Places: {}", e))?;

            if response.status() != StatusCode::OK {
                return Err(anyhow!(
                    "Google Places retornou HTTP {}",
                    response.status().as_u16()
                ));
            }

            let page: PlacesSearchResponse = response
                .json()
                .await
                .map_err(|e| anyhow!("Erro de conexão com Google Places: {}", e))?;

            match page.status.as_str() {
                "OK" => {
                    results.extend(page.results);
                    next_token = page.next_page_token;
                    match &next_token {
                        Some(_) => tokio::time::sleep(self.page_delay).await,
                        None => break,
                    }
                }
                "ZERO_RESULTS" => break,
                "OVER_QUERY_LIMIT" | "REQUEST_DENIED" | "INVALID_REQUEST" => {
                    let message = page.error_message.unwrap_or_else(|| page.status.clone());
                    return Err(anyhow!("Erro da API do Google Places: {}", message));
                }
                _ => {
                    let message = page.error_message.unwrap_or_else(|| page.status.clone());
                    return Err(anyhow!("Falha na busca: {}", message));
                }
            }
        }

        Ok(dedup_by_place_id(results))
    }

    pub async fn fetch_photo(
        &self,
        reference: &str,
        maxwidth: &str,
    ) -> anyhow::Result<reqwest::Response> {
        let params = [
            ("photo_reference", reference),
            ("maxwidth", maxwidth),
            ("key", self.api_key.as_str()),
        ];

        self.http
            .get(&self.photo_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| anyhow!("Falha ao carregar foto do Google: {}", e))
    }
}

fn dedup_by_place_id(places: Vec<RawPlace>) -> Vec<RawPlace> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(places.len());

    for place in places {
        match &place.place_id {
            Some(id) if seen.insert(id.clone()) => unique.push(place),
            _ => {}
        }
    }

    unique
}
