pub mod google_places;
pub mod place;
