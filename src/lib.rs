//! Report file server
//!
//! Serves pre-generated CSV files and dated html/txt/json reports from
//! configured directories, plus an index page listing the available report dates.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod sanitize;
pub mod server;
