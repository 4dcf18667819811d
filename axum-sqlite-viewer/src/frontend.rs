//! Shell page and static asset serving
//!
//! The browser UI is a plain HTML page plus scripts and styles embedded at
//! compile time from the crate's `static` directory.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use include_dir::{include_dir, Dir};

// Embed the static directory at compile time
static STATIC_FILES: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Directory under the mount prefix that holds the embedded files
const STATIC_PREFIX: &str = "static/";

/// Render `index.html` for the given mount prefix
///
/// The page references `{{root}}` for API calls and `{{static}}` for its
/// assets; both are substituted here, HTML-escaped.
pub fn render_index(root: &str) -> Option<String> {
    let template = STATIC_FILES.get_file("index.html")?.contents_utf8()?;
    let static_root = format!("{}{}", root, STATIC_PREFIX);

    Some(
        template
            .replace("{{root}}", &escape_html(root))
            .replace("{{static}}", &escape_html(&static_root)),
    )
}

/// Escape text for use in HTML content and quoted attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Serve the shell page at the bare mount prefix
pub fn serve_index_page(root: &str) -> Response {
    match render_index(root) {
        Some(page) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            page,
        )
            .into_response(),
        None => {
            tracing::error!("embedded index.html is missing or not UTF-8");
            (StatusCode::INTERNAL_SERVER_ERROR, "index page unavailable").into_response()
        }
    }
}

/// Serve an embedded file
///
/// `path` is relative to the mount prefix; only files below `static/` are
/// served, everything else is a 404.
pub fn serve_static_asset(path: &str) -> Response {
    let file = path
        .strip_prefix(STATIC_PREFIX)
        .and_then(|asset_path| STATIC_FILES.get_file(asset_path));

    match file {
        Some(file) => {
            let mime_type = mime_guess::from_path(file.path())
                .first_or_octet_stream()
                .to_string();

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime_type)
                .header(header::CACHE_CONTROL, "public, max-age=3600")
                .body(Body::from(file.contents()))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
        None => not_found(path),
    }
}

/// Plain-text 404 for paths with no endpoint or embedded file
pub fn not_found(path: &str) -> Response {
    tracing::debug!(path, "no such asset");
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Asset not found: {}", path),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_substitutes_roots() {
        let page = render_index("/viewer/").unwrap();
        assert!(!page.contains("{{root}}"));
        assert!(!page.contains("{{static}}"));
        assert!(page.contains("/viewer/static/app.js"));
        assert!(page.contains("data-root=\"/viewer/\""));
    }

    #[test]
    fn test_index_escapes_roots() {
        let page = render_index("/a\"b<c>&'/").unwrap();
        assert!(page.contains("data-root=\"/a&quot;b&lt;c&gt;&amp;&#39;/\""));
        assert!(page.contains("/a&quot;b&lt;c&gt;&amp;&#39;/static/app.js"));
        assert!(!page.contains("<c>"));
    }

    #[test]
    fn test_escape_html_leaves_plain_paths() {
        assert_eq!(escape_html("/viewer/"), "/viewer/");
    }

    #[test]
    fn test_mime_type_guessing() {
        use mime_guess::from_path;

        let javascript_mime = from_path("app.js").first_or_octet_stream();
        assert_eq!(javascript_mime.as_ref(), "text/javascript");

        let css_mime = from_path("style.css").first_or_octet_stream();
        assert_eq!(css_mime.as_ref(), "text/css");
    }

    #[test]
    fn test_static_asset_served() {
        let response = serve_static_asset("static/style.css");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
    }

    #[test]
    fn test_paths_outside_static_are_not_served() {
        assert_eq!(
            serve_static_asset("index.html").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            serve_static_asset("static/missing.js").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_index_page_headers() {
        let response = serve_index_page("/");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
