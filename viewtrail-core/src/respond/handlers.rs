use crate::ctx::RequestSummary;
use crate::respond::templates::{Assets, render};
use crate::respond::StaticResponse;
use http::StatusCode;

pub(crate) const ROBOTS_TXT: &str = "User-agent: *\nAllow: /";

pub(crate) fn robots(_request: &RequestSummary) -> StaticResponse {
    StaticResponse::text(ROBOTS_TXT)
}

pub(crate) fn script(_request: &RequestSummary) -> StaticResponse {
    match Assets::get("app.js") {
        Some(file) => StaticResponse::new(
            StatusCode::OK,
            "application/javascript; charset=utf-8",
            file.data.into_owned(),
        ),
        None => missing_asset("app.js"),
    }
}

pub(crate) fn home(request: &RequestSummary) -> StaticResponse {
    page("index.html", StatusCode::OK, request)
}

pub(crate) fn admin(request: &RequestSummary) -> StaticResponse {
    page("admin.html", StatusCode::OK, request)
}

/// Every login attempt fails. The submitted form is captured by the view event.
pub(crate) fn login_failed(request: &RequestSummary) -> StaticResponse {
    page("login_failed.html", StatusCode::UNAUTHORIZED, request)
}

fn page(name: &str, status: StatusCode, request: &RequestSummary) -> StaticResponse {
    match render(name, &request.hostname) {
        Some(html) => StaticResponse::html(status, html),
        None => missing_asset(name),
    }
}

fn missing_asset(name: &str) -> StaticResponse {
    tracing::error!(asset = name, "embedded asset missing");
    StaticResponse::internal_error()
}
