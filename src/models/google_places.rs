use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope of one Nearby Search page.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlacesSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// One place record exactly as Google returns it. Every field is optional:
/// the upstream omits anything it does not know.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RawPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i64>,
    pub opening_hours: Option<OpeningHours>,
    pub price_level: Option<Value>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    pub business_status: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Geometry {
    pub location: Option<Location>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Location {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlacePhoto {
    pub height: Option<i64>,
    #[serde(default)]
    pub html_attributions: Vec<String>,
    pub photo_reference: Option<String>,
    pub width: Option<i64>,
}
