use axum::response::Html;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Landing stub; the real pages are rendered elsewhere. This only has to
/// exist as the Route Gate's redirect target.
pub async fn home() -> Html<&'static str> {
    Html("<!doctype html><title>Strongbots</title>")
}
