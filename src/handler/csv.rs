//! CSV endpoint
//!
//! Serves any regular file from its base directory as `text/csv`.

use std::path::{Path, PathBuf};

use crate::error::{ServeError, ServeResult};
use crate::handler::files::{self, ServedFile};
use crate::http::mime::CSV_CONTENT_TYPE;
use crate::sanitize::SafeFileName;

pub struct CsvEndpoint {
    base_dir: PathBuf,
}

impl CsvEndpoint {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Serve the file named by the `file` parameter.
    ///
    /// A missing parameter, or one that sanitizes to nothing, is "not found".
    pub async fn serve(&self, file: Option<&str>) -> ServeResult<ServedFile> {
        let name = file
            .and_then(SafeFileName::parse)
            .ok_or(ServeError::NotFound)?;
        let data = files::read_child(&self.base_dir, &name).await?;
        Ok(ServedFile {
            data,
            content_type: CSV_CONTENT_TYPE,
        })
    }
}
