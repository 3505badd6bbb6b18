use crate::constants::{method, schema, status};
use crate::context::RequestContext;
use crate::origin::{ContextOriginPredicateFn, OriginMatcher, OriginPredicateFn, WildcardOrigin};
use crate::util::{is_http_token, normalize_lower};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_MAX_AGE_SECS: u64 = 12 * 60 * 60;

/// Raw CORS configuration as supplied by the operator.
///
/// Nothing here is interpreted until [`CorsConfig::new`](crate::CorsConfig::new)
/// validates and compiles it.
#[derive(Clone)]
pub struct CorsOptions {
    /// Literal origins. `*` allows every origin; an entry with a single `*`
    /// such as `https://*.example.com` is a wildcard pattern.
    pub allow_origins: Vec<String>,
    pub allow_origin_fn: Option<Arc<OriginPredicateFn>>,
    pub allow_origin_with_context_fn: Option<Arc<ContextOriginPredicateFn>>,
    /// Extra matchers consulted after exact and wildcard origins and before
    /// the predicates.
    pub origin_matchers: Vec<Arc<dyn OriginMatcher>>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds. `None` or zero omits the header.
    pub max_age: Option<u64>,
    pub allow_private_network: bool,
    pub allow_browser_extensions: bool,
    pub allow_web_sockets: bool,
    pub allow_files: bool,
    pub custom_schemas: Vec<String>,
    /// Status for a successful preflight. Defaults to 204.
    pub options_response_status: Option<u16>,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            allow_origin_fn: None,
            allow_origin_with_context_fn: None,
            origin_matchers: Vec::new(),
            allow_methods: vec![
                method::GET.into(),
                method::POST.into(),
                method::PUT.into(),
                method::PATCH.into(),
                method::DELETE.into(),
                method::HEAD.into(),
                method::OPTIONS.into(),
            ],
            allow_headers: vec![
                "Origin".into(),
                "Content-Length".into(),
                "Content-Type".into(),
            ],
            expose_headers: Vec::new(),
            allow_credentials: false,
            max_age: Some(DEFAULT_MAX_AGE_SECS),
            allow_private_network: false,
            allow_browser_extensions: false,
            allow_web_sockets: false,
            allow_files: false,
            custom_schemas: Vec::new(),
            options_response_status: None,
        }
    }
}

impl fmt::Debug for CorsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorsOptions")
            .field("allow_origins", &self.allow_origins)
            .field("allow_origin_fn", &self.allow_origin_fn.is_some())
            .field(
                "allow_origin_with_context_fn",
                &self.allow_origin_with_context_fn.is_some(),
            )
            .field("origin_matchers", &self.origin_matchers.len())
            .field("allow_methods", &self.allow_methods)
            .field("allow_headers", &self.allow_headers)
            .field("expose_headers", &self.expose_headers)
            .field("allow_credentials", &self.allow_credentials)
            .field("max_age", &self.max_age)
            .field("allow_private_network", &self.allow_private_network)
            .field("options_response_status", &self.options_response_status)
            .finish_non_exhaustive()
    }
}

/// Reasons a configuration is refused at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "credentials cannot be combined with the `*` origin; list the allowed origins explicitly"
    )]
    CredentialsRequireSpecificOrigin,
    #[error("no allowed origin configured: set origins or an origin predicate")]
    NoOriginConfigured,
    #[error("conflicting settings: all origins are allowed, an origin predicate is not needed")]
    WildcardOriginWithPredicate,
    #[error("origin `{0}` contains more than one `*`")]
    MultipleWildcards(String),
    #[error("wildcard origin `{0}` matches every origin; use `*` instead")]
    UnboundedWildcard(String),
    #[error("origin `{0}` must be `*`, a wildcard pattern, or start with an allowed scheme")]
    InvalidOriginSchema(String),
    #[error("method `{0}` is not a valid HTTP token")]
    InvalidMethod(String),
    #[error("allowed header `{0}` is not a valid HTTP token")]
    InvalidAllowedHeader(String),
    #[error("exposed header `{0}` is not a valid HTTP token")]
    InvalidExposedHeader(String),
    #[error("preflight status {0} is outside the 2xx range")]
    InvalidPreflightStatus(u16),
}

impl CorsOptions {
    /// Default options accepting any origin.
    pub fn allow_all() -> Self {
        Self {
            allow_origins: vec!["*".into()],
            ..Self::default()
        }
    }

    pub fn with_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_origin_fn<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.allow_origin_fn = Some(Arc::new(predicate));
        self
    }

    pub fn with_origin_context_fn<F>(mut self, predicate: F) -> Self
    where
        F: for<'a> Fn(&RequestContext<'a>, &str) -> bool + Send + Sync + 'static,
    {
        self.allow_origin_with_context_fn = Some(Arc::new(predicate));
        self
    }

    pub fn with_matcher<M>(mut self, matcher: M) -> Self
    where
        M: OriginMatcher + 'static,
    {
        self.origin_matchers.push(Arc::new(matcher));
        self
    }

    pub fn preflight_status(&self) -> u16 {
        self.options_response_status.unwrap_or(status::NO_CONTENT)
    }

    pub(crate) fn allows_all_origins(&self) -> bool {
        self.allow_origins.iter().any(|origin| origin.trim() == "*")
    }

    fn has_predicate(&self) -> bool {
        self.allow_origin_fn.is_some()
            || self.allow_origin_with_context_fn.is_some()
            || !self.origin_matchers.is_empty()
    }

    /// Schemes a literal origin may start with under these options.
    pub fn allowed_schemas(&self) -> Vec<String> {
        let mut schemas: Vec<String> = schema::DEFAULT.iter().map(|s| s.to_string()).collect();
        if self.allow_browser_extensions {
            schemas.extend(schema::EXTENSION.iter().map(|s| s.to_string()));
        }
        if self.allow_web_sockets {
            schemas.extend(schema::WEB_SOCKET.iter().map(|s| s.to_string()));
        }
        if self.allow_files {
            schemas.extend(schema::FILE.iter().map(|s| s.to_string()));
        }
        schemas.extend(self.custom_schemas.iter().map(|s| normalize_lower(s.trim())));
        schemas
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let allow_all = self.allows_all_origins();

        if allow_all && self.allow_credentials {
            return Err(ValidationError::CredentialsRequireSpecificOrigin);
        }

        if allow_all && self.has_predicate() {
            return Err(ValidationError::WildcardOriginWithPredicate);
        }

        let has_origin = self
            .allow_origins
            .iter()
            .any(|origin| !origin.trim().is_empty());
        if !has_origin && !self.has_predicate() {
            return Err(ValidationError::NoOriginConfigured);
        }

        let schemas = self.allowed_schemas();
        for origin in &self.allow_origins {
            let origin = origin.trim();
            if origin.is_empty() || origin == "*" {
                continue;
            }
            match origin.matches('*').count() {
                0 => {
                    let lowered = normalize_lower(origin);
                    if !schemas.iter().any(|schema| lowered.starts_with(schema.as_str())) {
                        return Err(ValidationError::InvalidOriginSchema(origin.to_string()));
                    }
                }
                1 => {
                    let unbounded = WildcardOrigin::parse(origin).is_some_and(|pattern| {
                        pattern.prefix().is_empty() && pattern.suffix().is_empty()
                    });
                    if unbounded {
                        return Err(ValidationError::UnboundedWildcard(origin.to_string()));
                    }
                }
                _ => return Err(ValidationError::MultipleWildcards(origin.to_string())),
            }
        }

        if let Some(invalid) = first_invalid_token(&self.allow_methods) {
            return Err(ValidationError::InvalidMethod(invalid));
        }
        if let Some(invalid) = first_invalid_token(&self.allow_headers) {
            return Err(ValidationError::InvalidAllowedHeader(invalid));
        }
        if let Some(invalid) = first_invalid_token(&self.expose_headers) {
            return Err(ValidationError::InvalidExposedHeader(invalid));
        }

        let status = self.preflight_status();
        if !(200..=299).contains(&status) {
            return Err(ValidationError::InvalidPreflightStatus(status));
        }

        Ok(())
    }
}

fn first_invalid_token(values: &[String]) -> Option<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .find(|value| !is_http_token(value))
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
