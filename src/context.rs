use crate::headers::Headers;

/// Read-only view of the request the engine is asked to judge.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub host: &'a str,
    pub path: &'a str,
    pub headers: &'a Headers,
}

impl<'a> RequestContext<'a> {
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers.first(name)
    }
}
