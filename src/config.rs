/*!
 * Configuration handling for snapfs
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use serde::Deserialize;

use crate::error::{Result, SnapFsError};

/// Which entries the path-list mode should emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PathType {
    /// Only entries that look like files (basename contains a `.`)
    Files,
    /// Only entries that look like directories
    Dirs,
    /// Both files and directories
    #[default]
    Both,
}

/// Command-line arguments for snapfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "snapfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate deterministic text snapshots of project directories and files for LLM context",
    long_about = "Renders a directory tree plus the contents of selected files as a single \
                  text document, suitable for pasting into code review tools or AI chat \
                  assistants. Selection is driven by a YAML configuration file with \
                  gitignore-style exclusion support."
)]
pub struct Args {
    /// Path to the YAML configuration file
    #[clap(long, default_value = "proj.yml")]
    pub config: String,

    /// Copy output to system clipboard
    #[clap(long)]
    pub clipboard: bool,

    /// Print only the directory structure, no file contents
    #[clap(long)]
    pub dironly: bool,

    /// Suppress the directory tree section
    #[clap(long)]
    pub nodirtree: bool,

    /// Parse a previously rendered tree from this file and list its paths
    #[clap(long, value_name = "FILE")]
    pub list_paths: Option<PathBuf>,

    /// Which path kinds to list in --list-paths mode
    #[clap(long, value_enum, default_value_t = PathType::Both)]
    pub path_type: PathType,

    /// Regex filter on file basenames in --list-paths mode
    #[clap(long, value_name = "REGEX")]
    pub path_pattern: Option<String>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// One regex-driven file selection entry.
///
/// Entries missing `dir` or `pattern` are tolerated at the type level and
/// skipped by the resolver with a warning.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegexSelector {
    /// Directory to scan
    pub dir: Option<PathBuf>,
    /// Regex matched against file basenames (full-match anchored)
    pub pattern: Option<String>,
    /// Recurse into subdirectories
    #[serde(default)]
    pub subdirs: bool,
}

/// Project selection loaded from the YAML configuration file.
///
/// Insertion order of `dirs`, `files` and `regexfiles` is preserved and
/// determines output order.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Directory roots to render as trees
    #[serde(default)]
    pub dirs: Vec<PathBuf>,

    /// Files whose contents are included verbatim
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Regex-driven file selections
    #[serde(default)]
    pub regexfiles: Vec<RegexSelector>,

    /// Optional gitignore-style exclusion file
    #[serde(default)]
    pub gitignore: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load the configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SnapFsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: ProjectConfig = serde_yml::from_str(&content)?;
        Ok(config)
    }
}
