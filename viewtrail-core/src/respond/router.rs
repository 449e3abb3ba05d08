use crate::ctx::RequestSummary;
use crate::respond::StaticResponse;
use crate::respond::handlers;
use http::Method;

pub type Handler = fn(&RequestSummary) -> StaticResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatch {
    Any,
    Only(Method),
}

impl MethodMatch {
    fn matches(&self, method: &Method) -> bool {
        match self {
            MethodMatch::Any => true,
            // GET routes answer HEAD as well.
            MethodMatch::Only(expected) if *expected == Method::GET => {
                method == Method::GET || method == Method::HEAD
            }
            MethodMatch::Only(expected) => expected == method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    /// `*`, matches every path.
    Any,
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(expected) => *expected == path,
            PathPattern::Any => true,
        }
    }
}

struct Route {
    method: MethodMatch,
    path: PathPattern,
    handler: Handler,
}

/// Ordered route table. The first matching route wins.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: MethodMatch, path: PathPattern, handler: Handler) -> Self {
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        self
    }

    pub fn match_route(&self, method: &Method, path: &str) -> Option<Handler> {
        self.routes
            .iter()
            .find(|r| r.method.matches(method) && r.path.matches(path))
            .map(|r| r.handler)
    }

    pub(crate) fn len(&self) -> usize {
        self.routes.len()
    }

    /// The routes served by viewtrail.
    pub fn standard() -> Self {
        Self::new()
            .route(
                MethodMatch::Only(Method::GET),
                PathPattern::Exact("/robots.txt"),
                handlers::robots,
            )
            .route(
                MethodMatch::Only(Method::GET),
                PathPattern::Exact("/app.js"),
                handlers::script,
            )
            .route(
                MethodMatch::Only(Method::GET),
                PathPattern::Exact("/admin"),
                handlers::admin,
            )
            .route(
                MethodMatch::Only(Method::POST),
                PathPattern::Exact("/admin/login"),
                handlers::login_failed,
            )
            .route(MethodMatch::Any, PathPattern::Any, handlers::home)
    }
}
