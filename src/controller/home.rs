use axum::response::Html;
use axum::routing::get;
use axum::Router;

pub fn router() -> Router {
    Router::new().route("/", get(render_search_page))
}

async fn render_search_page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
