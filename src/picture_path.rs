// src/picture_path.rs
use tracing::warn;

use crate::core::fs_ops::UPLOADS_PREFIX;

/// A stored picture path that passed [`safe_profile_picture_path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafePicturePath<'a>(&'a str);

impl<'a> SafePicturePath<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Return the stored picture path only if it points inside the uploads root.
/// Anything else is treated as if no picture was stored.
pub fn safe_profile_picture_path(path: Option<&str>) -> Option<SafePicturePath<'_>> {
    let path = path?;
    if path.is_empty() {
        return None;
    }

    // Stored pictures are flat file names directly under the uploads root
    let inside_uploads = path
        .strip_prefix(UPLOADS_PREFIX)
        .map(is_plain_file_name)
        .unwrap_or(false);

    if inside_uploads {
        Some(SafePicturePath(path))
    } else {
        warn!("Ignoring profile picture path outside uploads: {}", path);
        None
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
