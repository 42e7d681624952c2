//! Shared file loading
//!
//! Locates a sanitized name inside a base directory and reads it whole.

use hyper::body::Bytes;
use std::path::Path;
use tokio::fs;

use crate::error::{ServeError, ServeResult};
use crate::logger;
use crate::sanitize::SafeFileName;

/// A file ready to be written to the response
#[derive(Debug)]
pub struct ServedFile {
    pub data: Bytes,
    pub content_type: &'static str,
}

/// Read `name` from `base_dir`.
///
/// Anything that is not a regular file (a subdirectory, say) counts as absent,
/// and so does a symlink whose target lies outside `base_dir`.
/// I/O failures other than absence surface as [`ServeError::Io`].
pub async fn read_child(base_dir: &Path, name: &SafeFileName) -> ServeResult<Bytes> {
    let path = name.resolve(base_dir);

    let metadata = fs::metadata(&path).await?;
    if !metadata.is_file() {
        return Err(ServeError::NotFound);
    }

    // Security: the real target must still live inside base_dir
    let base_canonical = fs::canonicalize(base_dir).await?;
    let path_canonical = fs::canonicalize(&path).await?;
    if !path_canonical.starts_with(&base_canonical) {
        logger::log_warning(&format!(
            "Symlink escape blocked: {name} -> {}",
            path_canonical.display()
        ));
        return Err(ServeError::NotFound);
    }

    let data = fs::read(&path).await?;
    Ok(Bytes::from(data))
}
