use crate::ctx::RequestSummary;
use crate::respond::{MethodMatch, PathPattern, RouteTable, StaticResponse};
use http::{Method, StatusCode};

fn teapot(_request: &RequestSummary) -> StaticResponse {
    StaticResponse::text("teapot").with_status(StatusCode::IM_A_TEAPOT)
}

fn fallback(_request: &RequestSummary) -> StaticResponse {
    StaticResponse::text("fallback")
}

fn status_of(table: &RouteTable, method: Method, path: &str) -> Option<StatusCode> {
    table
        .match_route(&method, path)
        .map(|handler| handler(&RequestSummary::default()).status)
}

#[test]
fn first_match_wins() {
    let table = RouteTable::new()
        .route(MethodMatch::Only(Method::GET), PathPattern::Exact("/tea"), teapot)
        .route(MethodMatch::Any, PathPattern::Any, fallback);

    assert_eq!(status_of(&table, Method::GET, "/tea"), Some(StatusCode::IM_A_TEAPOT));
    assert_eq!(status_of(&table, Method::POST, "/tea"), Some(StatusCode::OK));
    assert_eq!(status_of(&table, Method::GET, "/coffee"), Some(StatusCode::OK));
}

#[test]
fn get_routes_answer_head() {
    let table = RouteTable::new().route(MethodMatch::Only(Method::GET), PathPattern::Exact("/tea"), teapot);

    assert!(table.match_route(&Method::HEAD, "/tea").is_some());
    assert!(table.match_route(&Method::DELETE, "/tea").is_none());
}

#[test]
fn exact_paths_do_not_match_prefixes() {
    let table = RouteTable::new().route(MethodMatch::Only(Method::GET), PathPattern::Exact("/admin"), teapot);

    assert!(table.match_route(&Method::GET, "/admin/").is_none());
    assert!(table.match_route(&Method::GET, "/administrator").is_none());
}

#[test]
fn standard_table_routes() {
    let table = RouteTable::standard();

    assert_eq!(table.len(), 5);
    assert_eq!(status_of(&table, Method::GET, "/robots.txt"), Some(StatusCode::OK));
    assert_eq!(status_of(&table, Method::GET, "/admin"), Some(StatusCode::OK));
    assert_eq!(
        status_of(&table, Method::POST, "/admin/login"),
        Some(StatusCode::UNAUTHORIZED)
    );
    // GET on the login endpoint falls through to the home shell.
    assert_eq!(status_of(&table, Method::GET, "/admin/login"), Some(StatusCode::OK));
    assert_eq!(status_of(&table, Method::DELETE, "/any/where"), Some(StatusCode::OK));
}
