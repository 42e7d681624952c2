//! Filename sanitization
//!
//! Reduces an untrusted filename to its last path component before it ever
//! touches the filesystem. This is the only guard between the `file` query
//! parameter and the base directories, so every handler goes through it.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Separators stripped regardless of the host platform
const SEPARATORS: [char; 2] = ['/', '\\'];

/// Longest name common filesystems accept for a single component (`NAME_MAX`)
pub const MAX_NAME_LEN: usize = 255;

/// A filename that is guaranteed to be a single, normal path component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeFileName(String);

impl SafeFileName {
    /// Take the basename of `input`.
    ///
    /// Trailing separators are ignored (`reports/` yields `reports`).
    /// Returns `None` when nothing usable remains: empty input, separator-only
    /// input, `.`, `..`, a name longer than [`MAX_NAME_LEN`] bytes, or a name
    /// the host platform would not treat as one plain component.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim_end_matches(SEPARATORS);
        let name = trimmed.rsplit(SEPARATORS).next().unwrap_or(trimmed);

        if name.is_empty()
            || name.len() > MAX_NAME_LEN
            || name == "."
            || name == ".."
            || name.contains('\0')
        {
            return None;
        }

        // Catches platform specifics such as Windows drive prefixes
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name => Some(Self(name.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased text after the final `.`, empty when there is none
    pub fn extension(&self) -> String {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Join onto `base`; the result is always a direct child of `base`
    pub fn resolve(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }
}

impl fmt::Display for SafeFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
