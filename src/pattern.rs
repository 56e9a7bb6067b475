/*!
 * Gitignore-style exclusion rules
 *
 * Compiles the rule file once into a list of `Rule`s and answers exclusion
 * queries for relative paths. Evaluation follows gitignore precedence: every
 * rule that matches flips the state, the last match wins, and negation (`!`)
 * re-includes a previously excluded path.
 */

use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use log::{debug, warn};

use crate::utils::{file_name_str, unix_path_str};

/// One compiled rule from the ignore file
#[derive(Debug, Clone)]
pub struct Rule {
    /// Original line as it appeared in the file
    pub raw: String,
    /// `!pattern` re-includes matching paths
    pub negation: bool,
    /// `pattern/` only ever matches directories
    pub dir_only: bool,
    /// Patterns containing `/` match against the whole relative path;
    /// others match the basename at any depth
    pub anchored: bool,
    /// Glob pattern with the `!`, leading `/` and trailing `/` stripped
    pub pattern: String,
}

impl Rule {
    /// Parse a single line of the ignore file. Returns `None` for blank lines
    /// and `#` comments.
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let raw = trimmed.to_string();
        let mut pattern = trimmed;

        let negation = pattern.starts_with('!');
        if negation {
            pattern = &pattern[1..];
        }

        let dir_only = pattern.ends_with('/');
        if dir_only {
            pattern = &pattern[..pattern.len() - 1];
        }

        let anchored = pattern.contains('/');
        if anchored {
            pattern = pattern.strip_prefix('/').unwrap_or(pattern);
        }

        if pattern.is_empty() {
            return None;
        }

        Some(Rule {
            raw,
            negation,
            dir_only,
            anchored,
            pattern: pattern.to_string(),
        })
    }

    /// Structural match of this rule against a path, ignoring negation
    fn matches(&self, rel_unix: &str, basename: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            glob_match(&self.pattern, rel_unix)
        } else {
            glob_match(&self.pattern, basename)
        }
    }
}

/// Compiled set of exclusion rules
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    rules: Vec<Rule>,
    /// Directory the ignore file lives in; anchored patterns are relative to it
    base: Option<PathBuf>,
}

impl Matcher {
    /// A matcher that excludes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile rules from an ignore file. An absent or unreadable file yields
    /// an empty matcher rather than an error.
    pub fn compile(gitignore_path: &Path) -> Self {
        let content = match fs::read_to_string(gitignore_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "ignore file {} not readable ({}), excluding nothing",
                    gitignore_path.display(),
                    e
                );
                return Self::empty();
            }
        };

        let rules: Vec<Rule> = content.lines().filter_map(Rule::parse).collect();
        debug!(
            "compiled {} rules from {}",
            rules.len(),
            gitignore_path.display()
        );

        Self {
            rules,
            base: gitignore_path.parent().map(Path::to_path_buf),
        }
    }

    /// Compile from an optional configured path
    pub fn from_config(gitignore_path: Option<&Path>) -> Self {
        match gitignore_path {
            Some(path) => Self::compile(path),
            None => Self::empty(),
        }
    }

    /// Exclusion state of a path relative to the ignore file's directory.
    /// Starts included; each matching rule sets the state to `!negation`;
    /// the last matching rule decides.
    pub fn is_excluded(&self, relative_path: &Path, is_dir: bool) -> bool {
        let rel_unix = unix_path_str(relative_path);
        let basename = file_name_str(relative_path);

        let mut excluded = false;
        for rule in &self.rules {
            if rule.matches(&rel_unix, &basename, is_dir) {
                excluded = !rule.negation;
            }
        }
        excluded
    }

    /// Exclusion state of an absolute path. Paths outside the ignore file's
    /// directory only see basename rules, since anchored patterns have nothing
    /// to anchor against.
    pub fn is_excluded_abs(&self, abs_path: &Path, is_dir: bool) -> bool {
        match &self.base {
            Some(base) => match abs_path.strip_prefix(base) {
                Ok(rel) => self.is_excluded(rel, is_dir),
                Err(_) => {
                    let basename = file_name_str(abs_path);
                    self.is_excluded(Path::new(&basename), is_dir)
                }
            },
            None => self.is_excluded(abs_path, is_dir),
        }
    }

    /// Number of compiled rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are loaded
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(lines: &[&str]) -> Matcher {
        Matcher {
            rules: lines.iter().filter_map(|l| Rule::parse(l)).collect(),
            base: None,
        }
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        assert!(Rule::parse("# comment").is_none());
        assert!(Rule::parse("").is_none());
        assert!(Rule::parse("   ").is_none());
    }

    #[test]
    fn parse_recognizes_modifiers() {
        let rule = Rule::parse("!build/").unwrap();
        assert!(rule.negation);
        assert!(rule.dir_only);
        assert!(!rule.anchored);
        assert_eq!(rule.pattern, "build");

        let rule = Rule::parse("/src/main.rs").unwrap();
        assert!(rule.anchored);
        assert_eq!(rule.pattern, "src/main.rs");
    }

    #[test]
    fn basename_patterns_match_at_any_depth() {
        let m = matcher(&["*.txt"]);
        assert!(m.is_excluded(Path::new("a.txt"), false));
        assert!(m.is_excluded(Path::new("deep/nested/b.txt"), false));
        assert!(!m.is_excluded(Path::new("a.rs"), false));
    }

    #[test]
    fn anchored_patterns_match_relative_path() {
        let m = matcher(&["sub/*.txt"]);
        assert!(m.is_excluded(Path::new("sub/a.txt"), false));
        assert!(!m.is_excluded(Path::new("other/sub/a.txt"), false));
    }

    #[test]
    fn last_matching_rule_wins() {
        let m = matcher(&["*.txt", "!keep.txt"]);
        assert!(m.is_excluded(Path::new("drop.txt"), false));
        assert!(!m.is_excluded(Path::new("keep.txt"), false));

        // Re-excluded by a later rule
        let m = matcher(&["*.txt", "!keep.txt", "keep.*"]);
        assert!(m.is_excluded(Path::new("keep.txt"), false));
    }

    #[test]
    fn dir_only_rules_never_match_files() {
        let m = matcher(&["build/"]);
        assert!(m.is_excluded(Path::new("build"), true));
        assert!(!m.is_excluded(Path::new("build"), false));
    }

    #[test]
    fn double_star_spans_segments() {
        let m = matcher(&["docs/**/draft.md"]);
        assert!(m.is_excluded(Path::new("docs/a/b/draft.md"), false));
        assert!(m.is_excluded(Path::new("docs/draft.md"), false));
        assert!(!m.is_excluded(Path::new("src/draft.md"), false));
    }

    #[test]
    fn question_mark_matches_single_char() {
        let m = matcher(&["file?.rs"]);
        assert!(m.is_excluded(Path::new("file1.rs"), false));
        assert!(!m.is_excluded(Path::new("file10.rs"), false));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = matcher(&["README.md"]);
        assert!(m.is_excluded(Path::new("README.md"), false));
        assert!(!m.is_excluded(Path::new("readme.md"), false));
    }

    #[test]
    fn missing_file_excludes_nothing() {
        let m = Matcher::compile(Path::new("/nonexistent/.gitignore"));
        assert!(m.is_empty());
        assert!(!m.is_excluded(Path::new("anything"), false));
    }
}
