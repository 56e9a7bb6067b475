/*!
 * Path-list extraction
 *
 * Parses a previously rendered tree (a `Directory:` header plus `+---` lines)
 * back into a flat list of full paths, optionally filtered by kind and by a
 * regex on file basenames. Input that is already a flat list of paths is
 * passed through with only the kind filter applied.
 *
 * Whether an entry is a file or a directory is a heuristic: a basename
 * containing a `.` is treated as a file.
 */

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::PathType;
use crate::error::{Result, SnapFsError};

const BRANCH_MARKER: &str = "+---";
const INDENT_WIDTH: usize = 4;

/// Extract paths from tree text or a flat path list
pub fn extract_paths(
    input: &str,
    path_type: PathType,
    pattern: Option<&Regex>,
) -> Result<Vec<String>> {
    if !input.trim_start().starts_with("Directory:") && !input.contains(BRANCH_MARKER) {
        return Ok(flat_list(input, path_type));
    }
    parse_tree(input, path_type, pattern)
}

/// Format extracted paths as a YAML-style list
pub fn format_as_yaml(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

fn looks_like_file(name: &str) -> bool {
    name.contains('.')
}

fn kind_matches(path_type: PathType, is_file: bool) -> bool {
    match path_type {
        PathType::Files => is_file,
        PathType::Dirs => !is_file,
        PathType::Both => true,
    }
}

/// Input already is one path per line; only the kind filter applies
fn flat_list(input: &str, path_type: PathType) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let basename = Path::new(line)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            kind_matches(path_type, looks_like_file(&basename))
        })
        .map(String::from)
        .collect()
}

/// Walk the `+---` lines, maintaining a segment stack keyed on indentation
/// depth, and join each entry onto the base directory from the header.
fn parse_tree(input: &str, path_type: PathType, pattern: Option<&Regex>) -> Result<Vec<String>> {
    let base_dir = input
        .lines()
        .find_map(|line| line.trim().strip_prefix("Directory:"))
        .map(|rest| PathBuf::from(rest.trim()))
        .ok_or_else(|| {
            SnapFsError::TreeParse("cannot find a 'Directory:' header in the input".into())
        })?;

    let mut stack: Vec<String> = Vec::new();
    let mut paths = Vec::new();

    for line in input.lines() {
        let Some(indent) = line.find(BRANCH_MARKER) else {
            // Root basename lines and headers carry no marker
            continue;
        };
        let depth = indent / INDENT_WIDTH;
        let name = line[indent + BRANCH_MARKER.len()..].trim().to_string();

        // An entry at depth d has d-1 ancestor segments on the stack
        stack.truncate(depth.saturating_sub(1));
        stack.push(name.clone());

        let is_file = looks_like_file(&name);
        if !kind_matches(path_type, is_file) {
            continue;
        }

        // The regex only filters files; directories pass through untouched
        if is_file {
            if let Some(regex) = pattern {
                if !regex.is_match(&name) {
                    continue;
                }
            }
        }

        let mut path = base_dir.clone();
        for segment in &stack {
            path.push(segment);
        }
        paths.push(path.display().to_string());
    }

    Ok(paths)
}
