//! Reports endpoint
//!
//! Two modes behind one route:
//! - listing: scans the base directory for names ending in
//!   `report_YYYY-MM-DD.html` and renders an index, newest first
//! - file: serves one `html`, `txt` or `json` file from the base directory

use html_escape::encode_double_quoted_attribute;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{ServeError, ServeResult};
use crate::handler::files::{self, ServedFile};
use crate::http::mime;
use crate::logger;
use crate::sanitize::SafeFileName;

const REPORT_PREFIX: &str = "report_";
const REPORT_SUFFIX: &str = ".html";
/// Length of `report_YYYY-MM-DD`
const REPORT_TAIL_LEN: usize = REPORT_PREFIX.len() + 10;

/// Formats linked for every listed date
const LINKED_FORMATS: [(&str, &str); 3] = [("html", "HTML"), ("txt", "TXT"), ("json", "JSON")];

pub struct ReportsEndpoint {
    base_dir: PathBuf,
    title: String,
}

impl ReportsEndpoint {
    pub fn new(base_dir: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            title: title.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Distinct report dates found on disk, newest first.
    ///
    /// An unreadable directory yields an empty list so the index still renders.
    pub async fn list_dates(&self) -> Vec<String> {
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                logger::log_warning(&format!(
                    "Cannot list reports directory '{}': {e}",
                    self.base_dir.display()
                ));
                return Vec::new();
            }
        };

        let mut dates = BTreeSet::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    if let Some(date) = entry.file_name().to_str().and_then(report_date) {
                        dates.insert(date.to_string());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    logger::log_warning(&format!("Reports directory scan stopped early: {e}"));
                    break;
                }
            }
        }

        dates.into_iter().rev().collect()
    }

    /// Build the listing page
    pub async fn render_index(&self) -> String {
        let dates = self.list_dates().await;
        render_index(&self.title, &dates)
    }

    /// Serve one report file.
    ///
    /// The extension is checked before the filesystem is touched, so a
    /// disallowed type is rejected whether or not such a file exists.
    pub async fn serve(&self, file: &str) -> ServeResult<ServedFile> {
        let name = SafeFileName::parse(file).ok_or(ServeError::NotFound)?;
        let content_type =
            mime::report_content_type(&name.extension()).ok_or(ServeError::ForbiddenType)?;
        let data = files::read_child(&self.base_dir, &name).await?;
        Ok(ServedFile { data, content_type })
    }
}

/// Extract the date from a name ending in `report_YYYY-MM-DD.html`
///
/// Anything may precede the tail, so `old_report_2025-01-01.html` lists as 2025-01-01.
fn report_date(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(REPORT_SUFFIX)?;
    let tail = stem.get(stem.len().checked_sub(REPORT_TAIL_LEN)?..)?;
    let date = tail.strip_prefix(REPORT_PREFIX)?;
    is_iso_date(date).then_some(date)
}

/// `DDDD-DD-DD` with ASCII digits; calendar validity is not checked
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Render the index page for `dates`, which are expected newest first
pub fn render_index(title: &str, dates: &[String]) -> String {
    let title = encode_double_quoted_attribute(title);
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}
        h1 {{ color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px; }}
        ul {{ list-style-type: none; padding: 0; }}
        li {{ margin: 15px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }}
        a {{ color: #007bff; text-decoration: none; margin-right: 15px; }}
        a:hover {{ text-decoration: underline; }}
        .date {{ font-weight: bold; margin-bottom: 5px; }}
        .formats {{ font-size: 0.9em; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
"#
    );

    if dates.is_empty() {
        html.push_str("        <p>No reports available.</p>\n");
    } else {
        html.push_str("        <ul>\n");
        for date in dates {
            let date = encode_double_quoted_attribute(date);
            let _ = writeln!(html, "            <li>");
            let _ = writeln!(html, "                <div class=\"date\">{date}</div>");
            let _ = write!(html, "                <div class=\"formats\">");
            for (ext, label) in LINKED_FORMATS {
                let _ = write!(
                    html,
                    "<a href=\"?file={REPORT_PREFIX}{date}.{ext}\">{label}</a>"
                );
            }
            let _ = writeln!(html, "</div>");
            let _ = writeln!(html, "            </li>");
        }
        html.push_str("        </ul>\n");
    }

    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint_with(names: &[&str]) -> (tempfile::TempDir, ReportsEndpoint) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), format!("content of {name}")).unwrap();
        }
        let endpoint = ReportsEndpoint::new(dir.path(), "Reports");
        (dir, endpoint)
    }

    #[test]
    fn test_report_date() {
        assert_eq!(report_date("report_2025-01-05.html"), Some("2025-01-05"));
        assert_eq!(report_date("report_2025-01-05.txt"), None);
        assert_eq!(report_date("report_2025-1-05.html"), None);
        assert_eq!(report_date("report_2025-01-05.html.bak"), None);
        assert_eq!(report_date("old_report_2025-01-05.html"), Some("2025-01-05"));
        assert_eq!(report_date("daily-report_2025-02-02.html"), Some("2025-02-02"));
        assert_eq!(report_date("ünïcode_report_2025-02-02.html"), Some("2025-02-02"));
        assert_eq!(report_date("report_2025-01-05_final.html"), None);
        assert_eq!(report_date("xreport-2025-01-05.html"), None);
        assert_eq!(report_date("report_abcd-ef-gh.html"), None);
        assert_eq!(report_date("report_.html"), None);
    }

    #[tokio::test]
    async fn test_dates_sorted_descending() {
        let (_dir, endpoint) = endpoint_with(&[
            "report_2025-01-05.html",
            "report_2025-03-01.html",
            "report_2024-12-31.html",
            "report_2025-03-01.json",
            "report_2026-01-01.txt",
            "notes.html",
        ]);
        assert_eq!(
            endpoint.list_dates().await,
            vec!["2025-03-01", "2025-01-05", "2024-12-31"]
        );
    }

    #[tokio::test]
    async fn test_prefixed_report_names_are_listed() {
        let (_dir, endpoint) = endpoint_with(&[
            "old_report_2025-01-01.html",
            "daily-report_2025-02-02.html",
            "report_2025-02-02.html",
        ]);
        assert_eq!(endpoint.list_dates().await, vec!["2025-02-02", "2025-01-01"]);
    }

    #[tokio::test]
    async fn test_missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let endpoint = ReportsEndpoint::new(dir.path().join("absent"), "Reports");
        assert!(endpoint.list_dates().await.is_empty());
        assert!(endpoint.render_index().await.contains("No reports available."));
    }

    #[test]
    fn test_render_links_all_formats() {
        let html = render_index("Reports", &["2025-03-01".to_string()]);
        assert!(html.contains("href=\"?file=report_2025-03-01.html\""));
        assert!(html.contains("href=\"?file=report_2025-03-01.txt\""));
        assert!(html.contains("href=\"?file=report_2025-03-01.json\""));
        assert!(!html.contains("No reports available."));
    }

    #[test]
    fn test_render_keeps_order_and_escapes_title() {
        let dates = vec!["2025-03-01".to_string(), "2024-12-31".to_string()];
        let html = render_index("<Market> & Co", &dates);
        assert!(html.contains("<title>&lt;Market&gt; &amp; Co</title>"));
        let newer = html.find("2025-03-01").unwrap();
        let older = html.find("2024-12-31").unwrap();
        assert!(newer < older);
    }

    #[tokio::test]
    async fn test_serve_allowed_types() {
        let (_dir, endpoint) = endpoint_with(&[
            "report_2025-01-05.html",
            "report_2025-01-05.txt",
            "report_2025-01-05.json",
        ]);

        let served = endpoint.serve("report_2025-01-05.html").await.unwrap();
        assert_eq!(served.content_type, "text/html; charset=utf-8");
        assert_eq!(&served.data[..], b"content of report_2025-01-05.html");

        let served = endpoint.serve("report_2025-01-05.txt").await.unwrap();
        assert_eq!(served.content_type, "text/plain; charset=utf-8");

        let served = endpoint.serve("../../report_2025-01-05.json").await.unwrap();
        assert_eq!(served.content_type, "application/json; charset=utf-8");
    }

    #[tokio::test]
    async fn test_forbidden_type_even_when_present() {
        let (_dir, endpoint) = endpoint_with(&["data.csv", "script.php", "README"]);
        for file in ["data.csv", "script.php", "README", "missing.exe"] {
            let err = endpoint.serve(file).await.unwrap_err();
            assert!(matches!(err, ServeError::ForbiddenType), "file: {file}");
        }
    }

    #[tokio::test]
    async fn test_uppercase_extension_is_allowed() {
        let (_dir, endpoint) = endpoint_with(&["summary.JSON"]);
        let served = endpoint.serve("summary.JSON").await.unwrap();
        assert_eq!(served.content_type, "application/json; charset=utf-8");
    }

    #[tokio::test]
    async fn test_missing_report_is_not_found() {
        let (_dir, endpoint) = endpoint_with(&[]);
        for file in ["report_2030-01-01.html", "..", "/"] {
            let err = endpoint.serve(file).await.unwrap_err();
            assert!(matches!(err, ServeError::NotFound), "file: {file}");
        }
    }
}
