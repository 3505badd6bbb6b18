use crate::constants::header;
use crate::headers::{Headers, merge_into};
use crate::options::CorsOptions;
use crate::util::{canonical_header_key, dedupe_with};

/// Renders the static header sets once, at configuration time.
pub(crate) struct HeaderBuilder<'a> {
    options: &'a CorsOptions,
    allow_all_origins: bool,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(options: &'a CorsOptions) -> Self {
        Self {
            options,
            allow_all_origins: options.allows_all_origins(),
        }
    }

    /// Headers for simple (non-preflight) responses.
    pub(crate) fn build_normal_headers(&self) -> Headers {
        let mut headers = Headers::with_capacity(4);
        merge_into(&mut headers, &self.build_credentials_header());
        merge_into(&mut headers, &self.build_exposed_headers());
        merge_into(
            &mut headers,
            &self.build_origin_headers(&[header::ORIGIN]),
        );
        headers
    }

    /// Headers for successful preflight responses.
    pub(crate) fn build_preflight_headers(&self) -> Headers {
        let mut headers = Headers::with_capacity(8);
        merge_into(&mut headers, &self.build_credentials_header());
        merge_into(&mut headers, &self.build_methods_header());
        merge_into(&mut headers, &self.build_allowed_headers());
        merge_into(&mut headers, &self.build_private_network_header());
        merge_into(&mut headers, &self.build_max_age_header());
        merge_into(
            &mut headers,
            &self.build_origin_headers(&[
                header::ORIGIN,
                header::ACCESS_CONTROL_REQUEST_METHOD,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ]),
        );
        headers
    }

    fn build_origin_headers(&self, vary: &[&str]) -> Headers {
        let mut headers = Headers::with_capacity(1);
        if self.allow_all_origins {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
        } else {
            headers.set(header::VARY, vary.iter().copied());
        }
        headers
    }

    fn build_credentials_header(&self) -> Headers {
        let mut headers = Headers::new();
        if self.options.allow_credentials {
            headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
        headers
    }

    fn build_methods_header(&self) -> Headers {
        let mut headers = Headers::new();
        let methods = dedupe_with(&self.options.allow_methods, |value| {
            value.to_ascii_uppercase()
        });
        if !methods.is_empty() {
            headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, methods.join(","));
        }
        headers
    }

    fn build_allowed_headers(&self) -> Headers {
        let mut headers = Headers::new();
        let allowed = dedupe_with(&self.options.allow_headers, canonical_header_key);
        if !allowed.is_empty() {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allowed.join(","));
        }
        headers
    }

    fn build_exposed_headers(&self) -> Headers {
        let mut headers = Headers::new();
        let exposed = dedupe_with(&self.options.expose_headers, canonical_header_key);
        if !exposed.is_empty() {
            headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, exposed.join(","));
        }
        headers
    }

    fn build_private_network_header(&self) -> Headers {
        let mut headers = Headers::new();
        if self.options.allow_private_network {
            headers.insert(header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK, "true");
        }
        headers
    }

    fn build_max_age_header(&self) -> Headers {
        let mut headers = Headers::new();
        if let Some(seconds) = self.options.max_age
            && seconds > 0
        {
            headers.insert(header::ACCESS_CONTROL_MAX_AGE, seconds.to_string());
        }
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
