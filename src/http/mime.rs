//! MIME type module
//!
//! Content types for the two kinds of files the server hands out.

/// Content type of everything served from the CSV directory
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Content type for a report extension
///
/// Doubles as the report allowlist: `None` means the extension may not be served.
///
/// # Examples
/// ```
/// use report_server::http::mime::report_content_type;
/// assert_eq!(report_content_type("html"), Some("text/html; charset=utf-8"));
/// assert_eq!(report_content_type("json"), Some("application/json; charset=utf-8"));
/// assert_eq!(report_content_type("php"), None);
/// ```
pub fn report_content_type(extension: &str) -> Option<&'static str> {
    match extension {
        "html" => Some("text/html; charset=utf-8"),
        "txt" => Some("text/plain; charset=utf-8"),
        "json" => Some("application/json; charset=utf-8"),
        _ => None,
    }
}
