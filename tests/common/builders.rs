#![allow(dead_code)]

use cors_gateway::constants::method;
use cors_gateway::{Cors, CorsDecision, CorsOptions, Headers, RequestContext};

/// Starts from the library defaults. Origins fall back to `*` unless a list
/// or a predicate is configured.
#[derive(Default)]
pub struct CorsBuilder {
    options: CorsOptions,
    origins: Option<Vec<String>>,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allow_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.allow_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.expose_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options.allow_credentials = enabled;
        self
    }

    pub fn max_age(mut self, seconds: Option<u64>) -> Self {
        self.options.max_age = seconds;
        self
    }

    pub fn private_network(mut self, enabled: bool) -> Self {
        self.options.allow_private_network = enabled;
        self
    }

    pub fn preflight_status(mut self, status: u16) -> Self {
        self.options.options_response_status = Some(status);
        self
    }

    pub fn origin_fn<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.options = self.options.with_origin_fn(predicate);
        self
    }

    pub fn origin_context_fn<F>(mut self, predicate: F) -> Self
    where
        F: for<'a> Fn(&RequestContext<'a>, &str) -> bool + Send + Sync + 'static,
    {
        self.options = self.options.with_origin_context_fn(predicate);
        self
    }

    pub fn options(self) -> CorsOptions {
        let has_predicate = self.options.allow_origin_fn.is_some()
            || self.options.allow_origin_with_context_fn.is_some();
        let origins = match self.origins {
            Some(origins) => origins,
            None if has_predicate => Vec::new(),
            None => vec!["*".to_string()],
        };
        CorsOptions {
            allow_origins: origins,
            ..self.options
        }
    }

    pub fn build(self) -> Cors {
        Cors::new(self.options()).expect("valid CORS configuration")
    }
}

pub struct RequestBuilder {
    method: String,
    origin: Option<String>,
    host: String,
    path: String,
    headers: Headers,
}

impl RequestBuilder {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            origin: None,
            host: "proxy.test".into(),
            path: "/".into(),
            headers: Headers::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    fn with_context<R>(&self, f: impl FnOnce(&RequestContext<'_>) -> R) -> R {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            host: &self.host,
            path: &self.path,
            headers: &self.headers,
        };
        f(&ctx)
    }

    pub fn check<'c>(self, cors: &'c Cors) -> CorsDecision<'c> {
        self.with_context(|ctx| cors.check(ctx))
    }

    pub fn apply<'c>(self, cors: &'c Cors, response: &mut Headers) -> CorsDecision<'c> {
        self.with_context(|ctx| cors.apply(ctx, response))
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}
