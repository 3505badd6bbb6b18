use crate::context::RequestContext;
use crate::util::{normalize_lower, normalize_origin};
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;

pub type OriginPredicateFn = dyn Fn(&str) -> bool + Send + Sync;
pub type ContextOriginPredicateFn = dyn for<'a> Fn(&RequestContext<'a>, &str) -> bool + Send + Sync;

/// One strategy for deciding whether an origin may make cross-origin requests.
///
/// The compiled configuration keeps an ordered list of matchers and stops at
/// the first one that answers `true`.
pub trait OriginMatcher: Send + Sync {
    fn matches(&self, origin: &str, ctx: &RequestContext<'_>) -> bool;
}

/// Exact origins, stored normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExactOrigins {
    origins: IndexSet<String>,
}

impl ExactOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            origins: origins
                .into_iter()
                .map(|origin| normalize_origin(origin.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.contains_normalized(&normalize_origin(origin))
    }

    /// Lookup for an origin already passed through [`normalize_origin`].
    pub fn contains_normalized(&self, origin: &str) -> bool {
        self.origins.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }
}

impl OriginMatcher for ExactOrigins {
    fn matches(&self, origin: &str, _ctx: &RequestContext<'_>) -> bool {
        self.contains(origin)
    }
}

/// An allowed origin with a single `*`, split into the text before and
/// after it. Either side may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardOrigin {
    prefix: String,
    suffix: String,
}

impl WildcardOrigin {
    pub fn new<P, S>(prefix: P, suffix: S) -> Self
    where
        P: AsRef<str>,
        S: AsRef<str>,
    {
        Self {
            prefix: normalize_lower(prefix.as_ref().trim_start()),
            suffix: normalize_origin(suffix.as_ref()),
        }
    }

    /// Splits `origin` at its only `*`. Returns `None` when the origin holds
    /// no wildcard, more than one, or is the bare `*`.
    pub fn parse(origin: &str) -> Option<Self> {
        let origin = origin.trim();
        if origin == "*" || origin.matches('*').count() != 1 {
            return None;
        }
        let (prefix, suffix) = origin.split_once('*')?;
        Some(Self::new(prefix, suffix))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn matches_origin(&self, origin: &str) -> bool {
        self.matches_normalized(&normalize_origin(origin))
    }

    /// Match for an origin already passed through [`normalize_origin`].
    pub fn matches_normalized(&self, origin: &str) -> bool {
        if self.prefix.is_empty() {
            return origin.ends_with(&self.suffix);
        }
        if self.suffix.is_empty() {
            return origin.starts_with(&self.prefix);
        }
        // Prefix and suffix may overlap inside the origin.
        origin.starts_with(&self.prefix) && origin.ends_with(&self.suffix)
    }
}

impl OriginMatcher for WildcardOrigin {
    fn matches(&self, origin: &str, _ctx: &RequestContext<'_>) -> bool {
        self.matches_origin(origin)
    }
}

/// User predicate over the raw origin value.
#[derive(Clone)]
pub struct OriginPredicate(Arc<OriginPredicateFn>);

impl OriginPredicate {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn from_arc(predicate: Arc<OriginPredicateFn>) -> Self {
        Self(predicate)
    }
}

impl fmt::Debug for OriginPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OriginPredicate(..)")
    }
}

impl OriginMatcher for OriginPredicate {
    fn matches(&self, origin: &str, _ctx: &RequestContext<'_>) -> bool {
        (self.0)(origin)
    }
}

/// User predicate that also sees the request, for host- or path-aware rules.
#[derive(Clone)]
pub struct ContextOriginPredicate(Arc<ContextOriginPredicateFn>);

impl ContextOriginPredicate {
    pub fn new<F>(predicate: F) -> Self
    where
        F: for<'a> Fn(&RequestContext<'a>, &str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn from_arc(predicate: Arc<ContextOriginPredicateFn>) -> Self {
        Self(predicate)
    }
}

impl fmt::Debug for ContextOriginPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContextOriginPredicate(..)")
    }
}

impl OriginMatcher for ContextOriginPredicate {
    fn matches(&self, origin: &str, ctx: &RequestContext<'_>) -> bool {
        (self.0)(ctx, origin)
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
