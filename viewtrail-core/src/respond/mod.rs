mod handlers;
mod headers;
mod response;
mod router;
mod templates;

#[cfg(test)]
mod tests;

pub use headers::apply_response_headers;
pub use response::StaticResponse;
pub use router::{Handler, MethodMatch, PathPattern, RouteTable};
pub use templates::{Assets, render};
