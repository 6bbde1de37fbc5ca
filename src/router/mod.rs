//! Route table and navigation guard.
//!
//! The guard is a pure function from (destination, auth state) to a
//! navigation decision; it never touches the network and is evaluated before
//! each transition completes. Real access control lives on the API; this only
//! keeps unauthenticated users out of protected pages and authenticated users
//! off the public-only ones.

pub const LOGIN: &str = "/login";
pub const DASHBOARD: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

/// Static route table, fixed at startup.
pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor { path: "/", name: "home", requires_auth: false },
    RouteDescriptor { path: "/login", name: "login", requires_auth: false },
    RouteDescriptor { path: "/register", name: "register", requires_auth: false },
    RouteDescriptor { path: "/reset-password", name: "reset-password", requires_auth: false },
    RouteDescriptor { path: "/dashboard", name: "dashboard", requires_auth: true },
    RouteDescriptor { path: "/role-management", name: "role-management", requires_auth: true },
    RouteDescriptor { path: "/profile", name: "user-profile", requires_auth: true },
];

/// Pages an authenticated user is bounced away from.
const PUBLIC_ONLY: &[&str] = &["/login", "/register", "/reset-password"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavDecision {
    Allow,
    Redirect { to: String },
}

/// Decides whether a transition to `full_path` may proceed.
///
/// `full_path` may carry a query string; route matching uses the path
/// component only, while the preserved redirect target keeps the full path.
#[must_use]
pub fn decide(full_path: &str, authenticated: bool) -> NavDecision {
    let path = full_path.split(['?', '#']).next().unwrap_or(full_path);

    // The root has no content of its own and is never rendered.
    if path.is_empty() || path == "/" {
        let to = if authenticated { DASHBOARD } else { LOGIN };
        return NavDecision::Redirect { to: to.to_string() };
    }

    if authenticated && PUBLIC_ONLY.contains(&path) {
        return NavDecision::Redirect {
            to: DASHBOARD.to_string(),
        };
    }

    let requires_auth = ROUTES
        .iter()
        .any(|route| route.path == path && route.requires_auth);

    if requires_auth && !authenticated {
        return NavDecision::Redirect {
            to: format!("{LOGIN}?redirect={}", encode_query_value(full_path)),
        };
    }

    NavDecision::Allow
}

/// Resolves the post-login destination from the login page's query string.
/// Falls back to the dashboard when no usable `redirect` parameter exists.
#[must_use]
pub fn post_login_target(query: &str) -> String {
    let query = query.trim_start_matches('?');

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key == "redirect" && !value.trim().is_empty() {
            return value.into_owned();
        }
    }

    DASHBOARD.to_string()
}

/// Percent-encodes a path for use as a query value, keeping `/` readable.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Side-effect sink for forced navigations, e.g. after a 401.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str);
}

/// Navigator that only records the intent in the log; used by the CLI, which
/// has no pages to switch between.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, to: &str) {
        tracing::info!("navigation requested: {to}");
    }
}
