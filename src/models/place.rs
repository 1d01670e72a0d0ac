use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::geo::haversine_km;
use crate::helpers::price::to_price_signs;
use crate::models::google_places::RawPlace;

/// The shape the frontend consumes. Misses stay as nulls rather than being
/// dropped so the payload keys are stable.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NormalizedPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub open_now: Option<bool>,
    pub price_level: Option<Value>,
    pub price_signs: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub distance_km: Option<f64>,
    pub photo_url: Option<String>,
    pub business_status: Option<String>,
}

pub fn transform_place(place: &RawPlace, origin_lat: f64, origin_lng: f64) -> NormalizedPlace {
    let location = place.geometry.as_ref().and_then(|g| g.location.as_ref());
    let lat = location.and_then(|l| l.lat);
    let lng = location.and_then(|l| l.lng);

    let distance_km = match (lat, lng) {
        (Some(place_lat), Some(place_lng)) => {
            Some(round_2(haversine_km(origin_lat, origin_lng, place_lat, place_lng)))
        }
        _ => None,
    };

    let photo_url = place
        .photos
        .first()
        .and_then(|photo| photo.photo_reference.as_ref())
        .map(|reference| format!("/api/photo?ref={}&maxwidth=400", reference));

    let open_now = place.opening_hours.as_ref().and_then(|hours| hours.open_now);

    NormalizedPlace {
        place_id: place.place_id.clone(),
        name: place.name.clone(),
        address: place.vicinity.clone().or_else(|| place.formatted_address.clone()),
        rating: place.rating,
        reviews: place.user_ratings_total,
        open_now,
        price_level: place.price_level.clone(),
        price_signs: to_price_signs(place.price_level.as_ref()),
        lat,
        lng,
        distance_km,
        photo_url,
        business_status: place.business_status.clone(),
    }
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_value, json};

    fn raw(value: serde_json::Value) -> RawPlace {
        from_value(value).unwrap()
    }

    #[test]
    fn transforms_a_full_record() {
        let place = raw(json!({
            "place_id": "abc123",
            "name": "Pizzaria do Zé",
            "vicinity": "Rua Augusta, 123",
            "rating": 4.5,
            "user_ratings_total": 230,
            "opening_hours": {"open_now": true},
            "price_level": 2,
            "geometry": {"location": {"lat": -23.5505, "lng": -46.6333}},
            "photos": [{"photo_reference": "ref-1", "height": 400, "width": 600}],
            "business_status": "OPERATIONAL"
        }));

        let normalized = transform_place(&place, -23.5505, -46.6333);
        assert_eq!(normalized.place_id.as_deref(), Some("abc123"));
        assert_eq!(normalized.address.as_deref(), Some("Rua Augusta, 123"));
        assert_eq!(normalized.reviews, Some(230));
        assert_eq!(normalized.open_now, Some(true));
        assert_eq!(normalized.price_signs, "R$R$R$");
        assert_eq!(normalized.distance_km, Some(0.0));
        assert_eq!(
            normalized.photo_url.as_deref(),
            Some("/api/photo?ref=ref-1&maxwidth=400")
        );
    }

    #[test]
    fn address_falls_back_to_formatted_address() {
        let place = raw(json!({
            "place_id": "abc",
            "formatted_address": "Av. Paulista, 1000 - São Paulo"
        }));
        let normalized = transform_place(&place, -23.5, -46.6);
        assert_eq!(
            normalized.address.as_deref(),
            Some("Av. Paulista, 1000 - São Paulo")
        );
    }

    #[test]
    fn distance_is_null_without_coordinates() {
        let no_geometry = raw(json!({"place_id": "a"}));
        assert_eq!(transform_place(&no_geometry, -23.5, -46.6).distance_km, None);

        let half_location = raw(json!({
            "place_id": "b",
            "geometry": {"location": {"lat": -23.5}}
        }));
        let normalized = transform_place(&half_location, -23.5, -46.6);
        assert_eq!(normalized.distance_km, None);
        assert_eq!(normalized.lat, Some(-23.5));
        assert_eq!(normalized.lng, None);
    }

    #[test]
    fn distance_is_rounded_to_two_decimals() {
        let place = raw(json!({
            "place_id": "c",
            "geometry": {"location": {"lat": -23.51, "lng": -46.6}}
        }));
        let normalized = transform_place(&place, -23.5, -46.6);
        let distance = normalized.distance_km.unwrap();
        assert!((distance * 100.0).fract().abs() < 1e-9);
        assert!(distance > 1.0 && distance < 1.3);
    }

    #[test]
    fn photo_url_is_null_without_a_reference() {
        let no_photos = raw(json!({"place_id": "d"}));
        assert_eq!(transform_place(&no_photos, 0.0, 0.0).photo_url, None);

        let empty_reference = raw(json!({
            "place_id": "e",
            "photos": [{"height": 100, "width": 100}]
        }));
        assert_eq!(transform_place(&empty_reference, 0.0, 0.0).photo_url, None);
    }

    #[test]
    fn open_now_is_null_without_opening_hours() {
        let place = raw(json!({"place_id": "f"}));
        assert_eq!(transform_place(&place, 0.0, 0.0).open_now, None);
    }
}
