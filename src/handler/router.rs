//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation, route matching, and dispatching.

use crate::config::AppState;
use crate::error::ServeResult;
use crate::handler::files::ServedFile;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response, Uri};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Query parameter naming the requested file on both endpoints
pub const FILE_PARAM: &str = "file";

/// Main entry point for HTTP request handling
///
/// Request bodies are never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();
    let is_head = parts.method == Method::HEAD;

    // 1. Check HTTP method, then dispatch
    let mut response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => route_request(&parts.uri, is_head, &state).await,
    };

    // 2. Common headers
    match HeaderValue::from_str(&state.config.http.server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!("Invalid http.server_name: {e}")),
    }

    // 3. Access log
    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::from_request(&peer_addr, &parts);
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path and configuration
async fn route_request(uri: &Uri, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    let path = uri.path();
    let config = &state.config;

    // 0. Health check (highest priority, always fast)
    if config.health.enabled && path == config.health.path {
        return http::build_health_response("ok");
    }

    let file = http::query_param(uri.query(), FILE_PARAM);

    // 1. CSV files
    if path == config.csv.route {
        return file_response(state.csv.serve(file.as_deref()).await, is_head);
    }

    // 2. Reports: listing without a file, otherwise a single report
    if path == config.reports.route {
        return match file.as_deref().filter(|f| !f.is_empty()) {
            None => http::build_html_response(state.reports.render_index().await, is_head),
            Some(name) => file_response(state.reports.serve(name).await, is_head),
        };
    }

    http::build_404_response()
}

fn file_response(result: ServeResult<ServedFile>, is_head: bool) -> Response<Full<Bytes>> {
    match result {
        Ok(served) => http::build_file_response(served.data, served.content_type, is_head),
        Err(e) => e.into_response(),
    }
}
