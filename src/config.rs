use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::headers::Headers;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::{
    ContextOriginPredicate, ExactOrigins, OriginMatcher, OriginPredicate, WildcardOrigin,
};
use crate::util::normalize_origin;
use std::fmt;
use std::sync::Arc;

/// Validated, immutable CORS configuration.
///
/// Built once from [`CorsOptions`]; every lookup structure and header set the
/// request path needs is prepared here, so evaluating a request only reads.
pub struct CorsConfig {
    allow_all_origins: bool,
    allow_credentials: bool,
    allowed_origins: ExactOrigins,
    wildcard_patterns: Vec<WildcardOrigin>,
    matchers: Vec<Arc<dyn OriginMatcher>>,
    normal_headers: Headers,
    preflight_headers: Headers,
    preflight_status: u16,
}

impl CorsConfig {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;

        let allow_all_origins = options.allows_all_origins();
        let mut literal_origins: Vec<&str> = Vec::new();
        let mut wildcard_patterns: Vec<WildcardOrigin> = Vec::new();
        for origin in &options.allow_origins {
            let origin = origin.trim();
            if origin.is_empty() || origin == "*" {
                continue;
            }
            match WildcardOrigin::parse(origin) {
                Some(pattern) => {
                    if !wildcard_patterns.contains(&pattern) {
                        wildcard_patterns.push(pattern);
                    }
                }
                None => literal_origins.push(origin),
            }
        }
        let allowed_origins = ExactOrigins::new(literal_origins);

        let mut matchers: Vec<Arc<dyn OriginMatcher>> = options.origin_matchers.clone();
        if let Some(predicate) = &options.allow_origin_fn {
            matchers.push(Arc::new(OriginPredicate::from_arc(Arc::clone(predicate))));
        }
        if let Some(predicate) = &options.allow_origin_with_context_fn {
            matchers.push(Arc::new(ContextOriginPredicate::from_arc(Arc::clone(
                predicate,
            ))));
        }

        let builder = HeaderBuilder::new(&options);
        let normal_headers = builder.build_normal_headers();
        let preflight_headers = builder.build_preflight_headers();

        Ok(Self {
            allow_all_origins,
            allow_credentials: options.allow_credentials,
            allowed_origins,
            wildcard_patterns,
            matchers,
            normal_headers,
            preflight_headers,
            preflight_status: options.preflight_status(),
        })
    }

    /// Whether `origin` may access the resource.
    ///
    /// `*` short-circuits. Otherwise the origin is normalized once for the
    /// exact set and the wildcard patterns; custom matchers, the origin
    /// predicate and finally the contextual predicate then see the raw value.
    /// The first `true` wins.
    pub fn is_origin_allowed(&self, origin: &str, ctx: &RequestContext<'_>) -> bool {
        if self.allow_all_origins {
            return true;
        }

        let normalized = normalize_origin(origin);
        if self.allowed_origins.contains_normalized(&normalized)
            || self
                .wildcard_patterns
                .iter()
                .any(|pattern| pattern.matches_normalized(&normalized))
        {
            return true;
        }

        self.matchers.iter().any(|matcher| matcher.matches(origin, ctx))
    }

    pub fn allow_all_origins(&self) -> bool {
        self.allow_all_origins
    }

    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    pub fn allowed_origins(&self) -> &ExactOrigins {
        &self.allowed_origins
    }

    pub fn wildcard_patterns(&self) -> &[WildcardOrigin] {
        &self.wildcard_patterns
    }

    pub fn normal_headers(&self) -> &Headers {
        &self.normal_headers
    }

    pub fn preflight_headers(&self) -> &Headers {
        &self.preflight_headers
    }

    pub fn preflight_status(&self) -> u16 {
        self.preflight_status
    }
}

impl fmt::Debug for CorsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorsConfig")
            .field("allow_all_origins", &self.allow_all_origins)
            .field("allow_credentials", &self.allow_credentials)
            .field("allowed_origins", &self.allowed_origins)
            .field("wildcard_patterns", &self.wildcard_patterns)
            .field("matchers", &self.matchers.len())
            .field("normal_headers", &self.normal_headers)
            .field("preflight_headers", &self.preflight_headers)
            .field("preflight_status", &self.preflight_status)
            .finish()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
