#![allow(dead_code)]

use cors_gateway::Headers;
use cors_gateway::constants::header;

pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers.first(name)
}

pub fn header_values(headers: &Headers, name: &str) -> Vec<String> {
    headers.get(name).map(<[String]>::to_vec).unwrap_or_default()
}

pub fn has_header(headers: &Headers, name: &str) -> bool {
    headers.contains(name)
}

pub fn has_cors_headers(headers: &Headers) -> bool {
    [
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        header::ACCESS_CONTROL_ALLOW_METHODS,
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        header::ACCESS_CONTROL_MAX_AGE,
    ]
    .iter()
    .any(|name| headers.contains(name))
}
