use axum::http::{HeaderMap, HeaderValue};

use safepath::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn given_caller_supplied_id_when_resolving_then_it_is_reused() {
    let id = RequestId::from_headers(&headers_with("mobile-42"));

    assert_eq!(id.as_str(), "mobile-42");
}

#[test]
fn given_no_header_when_resolving_then_uuid_is_generated() {
    let id = RequestId::from_headers(&HeaderMap::new());

    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
}

#[test]
fn given_blank_header_when_resolving_then_fresh_id_is_generated() {
    let id = RequestId::from_headers(&headers_with("   "));

    assert!(!id.as_str().trim().is_empty());
    assert_ne!(id.as_str(), "   ");
}

#[test]
fn given_overlong_header_when_resolving_then_it_is_replaced() {
    let long = "a".repeat(500);

    let id = RequestId::from_headers(&headers_with(&long));

    assert_ne!(id.as_str(), long);
}

#[test]
fn given_two_generated_ids_when_compared_then_they_differ() {
    assert_ne!(RequestId::generate(), RequestId::generate());
}
