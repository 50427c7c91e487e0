use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

// ============================================================================
// IntoHtml trait: accepts Maud Markup, String or &str
// ============================================================================

pub trait IntoHtml {
    fn into_html(self) -> String;
}

impl IntoHtml for maud::Markup {
    fn into_html(self) -> String { self.into_string() }
}

impl IntoHtml for String {
    fn into_html(self) -> String { self }
}

impl IntoHtml for &str {
    fn into_html(self) -> String { self.to_string() }
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) {
    if let (Ok(name), Ok(val)) = (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        headers.insert(name, val);
    }
}

// ============================================================================
// FragmentResponse
// ============================================================================

/// HTMX fragment with optional out-of-band swaps.
///
/// ```ignore
/// fragment().html(status_box).oob("signup-submit", button)
/// ```
#[derive(Debug)]
pub struct FragmentResponse {
    content: Option<String>,
    headers: HeaderMap,
    oob_updates: Vec<(String, String)>,
    status: StatusCode,
}

impl FragmentResponse {
    pub fn new() -> Self {
        Self {
            content: None,
            headers: HeaderMap::new(),
            oob_updates: Vec::new(),
            status: StatusCode::OK,
        }
    }

    /// Set the response body. Accepts Maud Markup, String, or &str.
    pub fn html(mut self, content: impl IntoHtml) -> Self {
        self.content = Some(content.into_html());
        self
    }

    /// Add an out-of-band swap replacing the element with id `target`.
    pub fn oob(mut self, target: impl Into<String>, content: impl IntoHtml) -> Self {
        self.oob_updates.push((target.into(), content.into_html()));
        self
    }

    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        insert_header(&mut self.headers, key.as_ref(), value.as_ref());
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Rendered body: main content followed by every OOB wrapper
    pub fn body(&self) -> String {
        let main = self.content.as_deref().unwrap_or_default();
        let oob: String = self
            .oob_updates
            .iter()
            .map(|(target, html)| format!(r#"<div id="{}" hx-swap-oob="true">{}</div>"#, target, html))
            .collect();
        format!("{}{}", main, oob)
    }
}

impl Default for FragmentResponse {
    fn default() -> Self { Self::new() }
}

impl IntoResponse for FragmentResponse {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, self.headers, Html(body)).into_response()
    }
}

// ============================================================================
// RedirectResponse
// ============================================================================

/// HTMX-aware redirect (sets both Location and HX-Redirect).
///
/// Browsers follow `Location` on full page loads; htmx requests follow
/// `HX-Redirect` instead.
#[derive(Debug)]
pub struct RedirectResponse {
    location: Option<String>,
    status: StatusCode,
}

impl RedirectResponse {
    pub fn new() -> Self {
        Self {
            location: None,
            status: StatusCode::SEE_OTHER,
        }
    }

    pub fn to(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the HTTP status code. htmx only reads `HX-Redirect` from 2xx
    /// responses, so polled endpoints use `200 OK`.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl Default for RedirectResponse {
    fn default() -> Self { Self::new() }
}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(ref location) = self.location {
            if let Ok(value) = HeaderValue::from_str(location) {
                headers.insert(axum::http::header::LOCATION, value.clone());
                headers.insert("HX-Redirect", value);
            }
        }
        (self.status, headers).into_response()
    }
}

pub fn fragment() -> FragmentResponse { FragmentResponse::new() }

pub fn redirect() -> RedirectResponse { RedirectResponse::new() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_with_maud() {
        let markup = maud::html! { div { "Hello" } };
        let resp = fragment().html(markup).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_fragment_oob_wrappers() {
        let body = fragment()
            .html("<div>Main</div>")
            .oob("err-username", "")
            .oob("signup-submit", maud::html! { button { "Create account" } })
            .body();
        assert!(body.starts_with("<div>Main</div>"));
        assert!(body.contains(r#"<div id="err-username" hx-swap-oob="true"></div>"#));
        assert!(body.contains(r#"<div id="signup-submit" hx-swap-oob="true"><button>Create account</button></div>"#));
    }

    #[test]
    fn test_fragment_status_and_header() {
        let resp = fragment()
            .status(StatusCode::NOT_FOUND)
            .header("HX-Reswap", "none")
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("hx-reswap").unwrap(), "none");
    }

    #[test]
    fn test_redirect() {
        let resp = redirect().to("/app/profiles").into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/app/profiles");
        assert_eq!(resp.headers().get("hx-redirect").unwrap(), "/app/profiles");
    }

    #[test]
    fn test_redirect_for_polling() {
        let resp = redirect().to("/app/profiles").status(StatusCode::OK).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("hx-redirect"));
    }
}
