use crate::constants::{header, status};
use crate::headers::{Headers, merge_into};

/// Header work for an accepted cross-origin request.
///
/// `headers` borrows the set rendered at configuration time; `allow_origin`
/// carries the echoed request origin when it must be written literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsResult<'c> {
    pub headers: &'c Headers,
    pub allow_origin: Option<String>,
    pub status: Option<u16>,
    pub end_response: bool,
}

impl CorsResult<'_> {
    /// Merges the configured headers into `response` and then overwrites
    /// `Access-Control-Allow-Origin` with the echoed origin, if any.
    pub fn apply_to(&self, response: &mut Headers) {
        merge_into(response, self.headers);
        if let Some(origin) = &self.allow_origin {
            response.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.as_str());
        }
    }
}

/// Outcome of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision<'c> {
    /// No `Origin` header, or a same-origin request that still sent one.
    NotCors,
    /// The origin is not allowed; answer 403 and stop.
    Rejected,
    /// Allowed `OPTIONS` request; answer with `status` and stop.
    Preflight(CorsResult<'c>),
    /// Allowed non-preflight request; decorate the response and continue.
    Simple(CorsResult<'c>),
}

impl CorsDecision<'_> {
    /// Status the middleware must answer with when it stops the chain.
    pub fn status(&self) -> Option<u16> {
        match self {
            CorsDecision::Rejected => Some(status::FORBIDDEN),
            CorsDecision::Preflight(result) | CorsDecision::Simple(result) => result.status,
            CorsDecision::NotCors => None,
        }
    }

    /// Whether downstream handlers (the proxy included) must be skipped.
    pub fn halts(&self) -> bool {
        match self {
            CorsDecision::Rejected => true,
            CorsDecision::Preflight(result) | CorsDecision::Simple(result) => result.end_response,
            CorsDecision::NotCors => false,
        }
    }

    pub fn result(&self) -> Option<&CorsResult<'_>> {
        match self {
            CorsDecision::Preflight(result) | CorsDecision::Simple(result) => Some(result),
            CorsDecision::NotCors | CorsDecision::Rejected => None,
        }
    }
}
