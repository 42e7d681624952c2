//! Request handler module
//!
//! Responsible for request routing dispatch and the two file endpoints.

pub mod csv;
pub mod files;
pub mod reports;
pub mod router;

// Re-export main entry points
pub use csv::CsvEndpoint;
pub use reports::ReportsEndpoint;
pub use router::handle_request;
