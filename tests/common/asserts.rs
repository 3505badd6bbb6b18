#![allow(dead_code)]

use cors_gateway::{CorsDecision, CorsResult, Headers};

pub fn assert_simple(decision: CorsDecision<'_>) -> CorsResult<'_> {
    match decision {
        CorsDecision::Simple(result) => result,
        other => panic!("expected simple decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision<'_>) -> CorsResult<'_> {
    match decision {
        CorsDecision::Preflight(result) => result,
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

/// Headers a fresh response carries after the result is applied.
pub fn applied(result: &CorsResult<'_>) -> Headers {
    let mut headers = Headers::new();
    result.apply_to(&mut headers);
    headers
}
