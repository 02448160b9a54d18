//! Various helper functions for other modules.
//!
//! Paths in GRUB configuration files always use `/` as the separator regardless of the platform, so they are handled
//! purely lexically here instead of through a platform path type.

use alloc::{format, string::String, vec::Vec};

/// Joins a relative path onto a base directory, then cleans the result with [`clean_path`].
///
/// An empty base directory is ignored. If both paths are empty, the result is empty as well.
#[must_use = "Has no effect if the result is unused"]
pub fn join_path(base: &str, path: &str) -> String {
    match (base.is_empty(), path.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean_path(path),
        (false, true) => clean_path(base),
        (false, false) => clean_path(&format!("{base}/{path}")),
    }
}

/// Returns the shortest path that is lexically equivalent to the given path.
///
/// Repeated separators are collapsed, `.` elements are removed, and `..` elements remove the element before them.
/// A `..` at the start of a rooted path is removed, since the parent of the root is the root itself. The result never
/// has a trailing separator, unless it is the root. An empty path becomes `.`.
#[must_use = "Has no effect if the result is unused"]
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => (),
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            part => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".into()
    } else {
        joined
    }
}

/// Gets a [`uefi::CString16`] path from a `/` separated path, replacing every separator with `\`.
///
/// # Errors
///
/// May return an `Error` if the path contains a character that cannot be represented in UCS-2, or a nul character.
#[cfg(feature = "uefi")]
pub(crate) fn str_to_uefi_path(
    path: &str,
) -> Result<uefi::CString16, uefi::data_types::FromStrError> {
    uefi::CString16::try_from(&*path.replace('/', "\\"))
}
