//! API Routes
//!
//! An explicit table mapping GET paths to the document served for them.
//! Routes are tried in order and the first match wins.

/// Document key for the profile page.
pub const PROFILE_PAGE: &str = "/profile.html";

/// Document key for the home page.
pub const HOME_PAGE: &str = "/index.html";

/// How a route matches a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// `prefix` followed by a non-empty token
    Token(String),
    /// Every path
    Any,
}

impl RoutePattern {
    /// Returns true if `path` matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Token(prefix) => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|token| !token.is_empty()),
            RoutePattern::Any => true,
        }
    }
}

#[derive(Debug, Clone)]
struct Route {
    pattern: RoutePattern,
    page: String,
}

/// Ordered GET route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates a table with no routes; every path resolves to nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a route, returning the table for chaining.
    pub fn route(mut self, pattern: RoutePattern, page: impl Into<String>) -> Self {
        self.routes.push(Route {
            pattern,
            page: page.into(),
        });
        self
    }

    /// Resolves `path` to the key of the document that serves it.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| route.pattern.matches(path))
            .map(|route| route.page.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// The server's routes: profile pages, then the home page for everything else.
pub fn create_routes() -> RouteTable {
    RouteTable::empty()
        .route(RoutePattern::Token("/profile/".to_string()), PROFILE_PAGE)
        .route(RoutePattern::Any, HOME_PAGE)
}
