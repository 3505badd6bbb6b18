use crate::config::CorsConfig;
use crate::constants::method;
use crate::context::RequestContext;
use crate::headers::Headers;
use crate::options::{CorsOptions, ValidationError};
use crate::result::{CorsDecision, CorsResult};

/// Per-request CORS engine over a compiled [`CorsConfig`].
///
/// Evaluation is synchronous and only reads the configuration, so a single
/// `Cors` can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct Cors {
    config: CorsConfig,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        Ok(Self::from_config(CorsConfig::new(options)?))
    }

    pub fn from_config(config: CorsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CorsConfig {
        &self.config
    }

    pub fn check(&self, request: &RequestContext<'_>) -> CorsDecision<'_> {
        let Some(origin) = request.origin.filter(|origin| !origin.is_empty()) else {
            return CorsDecision::NotCors;
        };

        if is_same_origin(origin, request.host) {
            return CorsDecision::NotCors;
        }

        if !self.config.is_origin_allowed(origin, request) {
            return CorsDecision::Rejected;
        }

        let allow_origin = if self.config.allow_all_origins() {
            None
        } else {
            Some(origin.to_string())
        };

        if request.method.eq_ignore_ascii_case(method::OPTIONS) {
            CorsDecision::Preflight(CorsResult {
                headers: self.config.preflight_headers(),
                allow_origin,
                status: Some(self.config.preflight_status()),
                end_response: true,
            })
        } else {
            CorsDecision::Simple(CorsResult {
                headers: self.config.normal_headers(),
                allow_origin,
                status: None,
                end_response: false,
            })
        }
    }

    /// Evaluates `request` and writes the resulting CORS headers into
    /// `response`. Rejected and non-CORS requests leave `response` untouched.
    pub fn apply(&self, request: &RequestContext<'_>, response: &mut Headers) -> CorsDecision<'_> {
        let decision = self.check(request);
        if let Some(result) = decision.result() {
            result.apply_to(response);
        }
        decision
    }
}

/// `Origin` naming the request's own host over http or https.
fn is_same_origin(origin: &str, host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    ["http://", "https://"].iter().any(|scheme| {
        origin.len() == scheme.len() + host.len()
            && origin.is_char_boundary(scheme.len())
            && origin[..scheme.len()].eq_ignore_ascii_case(scheme)
            && origin[scheme.len()..].eq_ignore_ascii_case(host)
    })
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
