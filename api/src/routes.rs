//! Per-route security declarations
//!
//! Every route the router serves is declared here once with the capability it
//! requires and whether it must carry a CSRF token. The request pipeline looks
//! the declaration up by method and matched path; a route without one is
//! refused.

use authz::types::Capability;
use axum::http::Method;

/// Security requirements of one route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub method: Method,
    /// Path pattern exactly as registered with the router, e.g. `/journal/:id`
    pub path: &'static str,
    /// Capability the caller must hold; `None` for public routes
    pub capability: Option<Capability>,
    pub csrf_required: bool,
}

impl RouteRule {
    pub fn public(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            capability: None,
            csrf_required: false,
        }
    }

    /// A public route that changes state without a session, such as login
    pub fn exempt(method: Method, path: &'static str) -> Self {
        Self::public(method, path)
    }

    pub fn admin_view(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            capability: Some(Capability::admin()),
            csrf_required: false,
        }
    }

    pub fn admin_action(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            capability: Some(Capability::admin()),
            csrf_required: true,
        }
    }
}

/// Lookup table of route declarations
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteRule>) -> Self {
        Self { routes }
    }

    /// Declarations for every journal route
    pub fn journal() -> Self {
        Self::new(vec![
            RouteRule::public(Method::GET, "/"),
            RouteRule::admin_action(Method::POST, "/"),
            RouteRule::admin_view(Method::GET, "/journal/new-entry"),
            RouteRule::admin_action(Method::POST, "/journal/new-entry"),
            RouteRule::public(Method::GET, "/journal/:id"),
            RouteRule::admin_view(Method::GET, "/journal/:id/edit-entry"),
            RouteRule::admin_action(Method::POST, "/journal/:id/edit-entry"),
            RouteRule::public(Method::GET, "/login"),
            RouteRule::exempt(Method::POST, "/login"),
            RouteRule::public(Method::GET, "/logout"),
            RouteRule::public(Method::GET, "/health"),
        ])
    }

    /// Find the declaration for `method` on `path`. `HEAD` uses the `GET` entry.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteRule> {
        let method = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };

        self.routes
            .iter()
            .find(|route| route.method == *method && route.path == path)
    }

    pub fn routes(&self) -> &[RouteRule] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
