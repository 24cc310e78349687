use axum::extract::{Request, State};
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderMap, HeaderValue, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use opsdeck_routing::prelude::*;

use crate::state::AppState;

pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

fn rewritten_uri(uri: &Uri, internal_path: &str) -> Option<Uri> {
    let pq = match uri.query() {
        Some(q) => format!("{internal_path}?{q}"),
        None => internal_path.to_string(),
    };
    let pq: PathAndQuery = pq.parse().ok()?;
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(pq);
    Uri::from_parts(parts).ok()
}

/// Applies the tenant resolver to every inbound request, turning
/// decisions into redirects or an internal path rewrite, and plants the
/// default role marker when the resolver asks for one.
pub async fn tenant_resolution(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost")
        .to_string();
    let path = req.uri().path().to_string();
    let resolution = resolve(&state.registry, &host, &path);
    let has_marker = cookie_value(req.headers(), ROLE_MARKER).is_some();

    let mut response = match resolution.decision {
        RouteDecision::Passthrough => next.run(req).await,
        RouteDecision::RedirectToDefaultTenant { authority, path } => {
            Redirect::temporary(&format!("http://{authority}{path}")).into_response()
        }
        RouteDecision::RedirectTenantNotFound { tenant, from } => {
            tracing::warn!(tenant = tenant.as_str(), "unknown tenant label");
            Redirect::temporary(&format!("{TENANT_NOT_FOUND_PATH}?tenant={tenant}&from={from}"))
                .into_response()
        }
        RouteDecision::RedirectToPublicPath { public_path } => {
            Redirect::temporary(&public_path).into_response()
        }
        RouteDecision::RewriteToTenant { internal_path, .. } => {
            match rewritten_uri(req.uri(), &internal_path) {
                Some(uri) => {
                    *req.uri_mut() = uri;
                    next.run(req).await
                }
                None => next.run(req).await,
            }
        }
    };

    if resolution.ensure_role_marker && !has_marker {
        if let Ok(value) =
            HeaderValue::from_str(&format!("{ROLE_MARKER}={DEFAULT_ROLE_MARKER}; Path=/; SameSite=Lax"))
        {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
