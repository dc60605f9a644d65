use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::config::SiteConfig;
use crate::state::AppState;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "ico"];

/// Enablement of site sections keyed by first path segment, built once from
/// config so the per-request check is a single map lookup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, bool>,
}

impl RouteTable {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            routes: config.routes.clone(),
        }
    }

    /// The root and segments without a configured toggle are always open.
    pub fn is_enabled(&self, path: &str) -> bool {
        match first_segment(path) {
            Some(segment) => self.routes.get(segment).copied().unwrap_or(true),
            None => true,
        }
    }
}

fn first_segment(path: &str) -> Option<&str> {
    path.split('/').find(|s| !s.is_empty())
}

fn is_image_path(path: &str) -> bool {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Blocks traffic to disabled site sections with a redirect to the root.
pub async fn route_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !state.routes.is_enabled(path) {
        tracing::debug!(path = %path, "redirecting request for disabled route");
        return Redirect::temporary("/").into_response();
    }
    next.run(request).await
}

/// Uniform security headers on every response, plus a one-year immutable
/// cache policy for image assets.
pub async fn response_headers(request: Request, next: Next) -> Response {
    let cache_images = is_image_path(request.uri().path());
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    if cache_images {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
    }
    response
}
