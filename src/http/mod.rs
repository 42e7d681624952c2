//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the file endpoints.

pub mod mime;
pub mod query;
pub mod response;

// Re-export commonly used types
pub use query::query_param;
pub use response::{
    build_404_response, build_405_response, build_file_response, build_health_response,
    build_html_response, build_options_response, build_text_response,
};
