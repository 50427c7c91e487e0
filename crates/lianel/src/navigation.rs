//! Navigation collaborator and application paths

/// Landing page
pub const ROOT_PATH: &str = "/";

/// Signup form
pub const SIGNUP_PATH: &str = "/signup";

/// Profile listing, where a successful signup lands
pub const LISTING_PATH: &str = "/profiles";

/// Transfers the user to another view.
///
/// Paths are application paths (`/profiles`); implementations add any
/// mount prefix.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Joins a normalized base path (`""` or `/app`) with an application path
pub fn join_path(base_path: &str, path: &str) -> String {
    match (base_path, path) {
        ("", p) => p.to_string(),
        (base, "/") => format!("{}/", base),
        (base, p) => format!("{}{}", base, p),
    }
}
