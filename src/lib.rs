pub mod constants;
mod config;
mod context;
mod cors;
mod header_builder;
mod headers;
mod options;
mod origin;
mod result;
pub mod util;

#[cfg(feature = "server")]
pub mod server;

pub use config::CorsConfig;
pub use context::RequestContext;
pub use cors::Cors;
pub use headers::{Headers, merge_headers, merge_into, union_values};
pub use options::{CorsOptions, ValidationError};
pub use origin::{
    ContextOriginPredicate, ContextOriginPredicateFn, ExactOrigins, OriginMatcher,
    OriginPredicate, OriginPredicateFn, WildcardOrigin,
};
pub use result::{CorsDecision, CorsResult};
