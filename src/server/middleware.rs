//! axum adapter driving [`Cors`](crate::Cors) against live requests.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::{HOST, ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use indexmap::IndexSet;

use super::SharedCors;
use crate::constants::header;
use crate::{CorsDecision, CorsResult, Headers, RequestContext};

pub async fn cors_middleware(
    State(cors): State<SharedCors>,
    request: Request,
    next: Next,
) -> Response {
    // An Origin that cannot be read as text is still cross-origin; it must
    // not fall through as a request without Origin.
    let unreadable_origin = request
        .headers()
        .get_all(ORIGIN)
        .iter()
        .any(|value| value.to_str().is_err());
    if unreadable_origin {
        tracing::debug!(method = %request.method(), "unreadable Origin header rejected");
        return StatusCode::FORBIDDEN.into_response();
    }

    let request_headers = headers_from_map(request.headers());
    let host = request_host(&request);
    let method = request.method().clone();

    let context = RequestContext {
        method: method.as_str(),
        origin: request_headers.first(header::ORIGIN),
        host: &host,
        path: request.uri().path(),
        headers: &request_headers,
    };
    let decision = cors.check(&context);
    let origin = context.origin.unwrap_or_default().to_string();

    match decision {
        CorsDecision::NotCors => next.run(request).await,
        CorsDecision::Rejected => {
            tracing::debug!(%origin, %method, host = %host, "cross-origin request rejected");
            StatusCode::FORBIDDEN.into_response()
        }
        CorsDecision::Preflight(result) => {
            tracing::debug!(%origin, "preflight accepted");
            preflight_response(&result)
        }
        CorsDecision::Simple(result) => {
            let mut response = next.run(request).await;
            apply_result(response.headers_mut(), &result);
            response
        }
    }
}

fn preflight_response(result: &CorsResult<'_>) -> Response {
    let status = result
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::NO_CONTENT);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    apply_result(response.headers_mut(), result);
    response
}

/// Merges a CORS result into a live header map with the same union
/// semantics as [`merge_into`](crate::merge_into), then writes the echoed
/// origin over any existing `Access-Control-Allow-Origin`.
pub fn apply_result(map: &mut HeaderMap, result: &CorsResult<'_>) {
    merge_into_header_map(map, result.headers);

    if let Some(origin) = &result.allow_origin
        && let Ok(value) = HeaderValue::from_str(origin)
    {
        map.insert(
            HeaderName::from_static("access-control-allow-origin"),
            value,
        );
    }
}

pub fn merge_into_header_map(map: &mut HeaderMap, configured: &Headers) {
    for (name, values) in configured.iter() {
        let Ok(header_name) = HeaderName::try_from(name) else {
            continue;
        };

        let mut union: IndexSet<HeaderValue> = map.get_all(&header_name).iter().cloned().collect();
        union.extend(
            values
                .iter()
                .filter_map(|value| HeaderValue::from_str(value).ok()),
        );

        map.remove(&header_name);
        for value in union {
            map.append(header_name.clone(), value);
        }
    }
}

/// Converts a live header map into the engine's header set. Values that are
/// not visible ASCII are skipped.
pub fn headers_from_map(map: &HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

/// Host the client addressed: the URI authority when present (HTTP/2,
/// absolute-form), otherwise the `Host` header.
fn request_host(request: &Request) -> String {
    if let Some(authority) = request.uri().authority() {
        return authority.as_str().to_string();
    }
    request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
