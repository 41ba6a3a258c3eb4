//! Response rendering.
//!
//! # Responsibilities
//! - Render the discovery page (go-import meta tag + refresh redirect)
//! - Build the fixed responses: pong, not found, bad request, root
//!   redirect, render error
//!
//! # Design Decisions
//! - The page template is compiled once at startup and shared read-only
//! - Every interpolated field is HTML-escaped; wildcard segments come
//!   straight from the request path
//! - Escaping uses the entity table of Go's html/template (`&#34;`, `&#39;`,
//!   `&#43;`, ...) instead of Handlebars' default, so pages match those of
//!   Go redirectors byte for byte. Go's extra URL normalization of `href`
//!   values is not reproduced.
//! - The redirect always targets the repository root, never the suffix

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use handlebars::Handlebars;
use serde::Serialize;

use crate::routing::Resolved;

const PAGE: &str = "page";

/// Discovery page served for every matching import path.
pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>
<meta name="go-import" content="{{import_root}} {{vcs}} {{repo_root}}">
<meta http-equiv="refresh" content="0; url={{repo_root}}">
</head>
<body>
Redirecting to <a href="{{repo_root}}">{{repo_root}}</a>...
</body>
</html>
"#;

const HTML_UTF8: &str = "text/html; charset=utf-8";
const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Error raised while compiling or rendering the page template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid page template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("{0}")]
    Render(#[from] handlebars::RenderError),
}

#[derive(Serialize)]
struct PageData<'a> {
    import_root: &'a str,
    vcs: &'a str,
    repo_root: &'a str,
}

/// Compiled discovery page bound to a VCS token.
pub struct Renderer {
    registry: Handlebars<'static>,
    vcs: String,
}

impl Renderer {
    /// Compile the standard page template.
    pub fn new(vcs: impl Into<String>) -> Result<Self, RenderError> {
        Self::with_template(vcs, PAGE_TEMPLATE)
    }

    /// Compile a custom page template.
    ///
    /// The template sees `import_root`, `vcs` and `repo_root`; referencing
    /// anything else fails at render time.
    pub fn with_template(vcs: impl Into<String>, template: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(escape_html);
        registry.register_template_string(PAGE, template)?;
        Ok(Self {
            registry,
            vcs: vcs.into(),
        })
    }

    /// Render the page body for a resolved request.
    pub fn render(&self, resolved: &Resolved) -> Result<String, RenderError> {
        let data = PageData {
            import_root: &resolved.import_root,
            vcs: &self.vcs,
            repo_root: &resolved.repo_root,
        };
        Ok(self.registry.render(PAGE, &data)?)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").field("vcs", &self.vcs).finish()
    }
}

/// HTML-escape text using the same entities as Go's html/template.
pub fn escape_html(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '"' => out.push_str("&#34;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '+' => out.push_str("&#43;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// 200 with a rendered discovery page.
pub fn page_response(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, HTML_UTF8)], body).into_response()
}

/// 200 `pong`.
pub fn pong_response() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_UTF8)], "pong").into_response()
}

/// 404 for paths outside the import root.
pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        [
            (header::CONTENT_TYPE, TEXT_UTF8),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        "404 page not found\n",
    )
        .into_response()
}

/// 400 for request paths that do not decode to UTF-8.
pub fn bad_request_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, TEXT_UTF8)],
        "400 Bad Request: invalid request path\n",
    )
        .into_response()
}

/// 302 straight to the repository root.
pub fn redirect_response(location: &str) -> Response {
    let body = format!("<a href=\"{}\">Found</a>.\n", escape_html(location));
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CONTENT_TYPE, HTML_UTF8),
        ],
        body,
    )
        .into_response()
}

/// 500 carrying the render error text.
pub fn render_error_response(err: &RenderError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [
            (header::CONTENT_TYPE, TEXT_UTF8),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{err}\n"),
    )
        .into_response()
}
