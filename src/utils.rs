/*!
 * Utility functions for snapfs
 */

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and resolve `..` against
/// preceding normal components. Does not touch the filesystem, so it works for
/// paths that do not exist (which still have to render in not-found entries).
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Only pop a real component; keep ".." at the front of a
                // relative path or right after the root.
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if popped {
                    normalized.pop();
                } else {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }

    normalized
}

/// Render a relative path with `/` separators regardless of platform, the form
/// gitignore patterns are matched against.
pub fn unix_path_str(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Basename of a path as a lossy string, empty for paths like `/` or `..`.
pub fn file_name_str(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
