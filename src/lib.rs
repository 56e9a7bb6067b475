/*!
 * snapfs - Generate deterministic text snapshots of project directories and
 * files for LLM context
 *
 * This library renders a directory tree plus the contents of a selected
 * subset of files as a single stable text document, for pasting into code
 * review tools or AI chat assistants. Selection is driven by a YAML
 * configuration with gitignore-style exclusion support.
 */

pub mod clipboard;
pub mod config;
pub mod content;
pub mod error;
pub mod pathlist;
pub mod pattern;
pub mod render;
pub mod resolver;
pub mod tree;
pub mod utils;


// Re-export main components for easier access
pub use config::{Args, PathType, ProjectConfig, RegexSelector};
pub use content::{BlockKind, ContentBlock};
pub use error::{Result, SnapFsError};
pub use pattern::Matcher;
pub use render::RenderOptions;
pub use resolver::{ItemKind, ResolvedItem, Resolver, Source};
pub use tree::{DirTree, Forest, TreeNode};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the full pipeline for one configuration: compile the exclusion rules,
/// resolve all configured paths, build the forest, serialize file contents,
/// and render the final document.
///
/// Path-level failures never abort the run; they surface as not-found entries
/// at the end of the rendered output.
pub fn generate_snapshot(config: &ProjectConfig, options: &RenderOptions) -> String {
    let matcher = Matcher::from_config(config.gitignore.as_deref());
    let items = Resolver::new(config, &matcher).resolve();
    let mut forest = tree::build(&items);

    let mut blocks = Vec::new();
    if !options.dir_only {
        for item in &items {
            if item.kind != ItemKind::File {
                continue;
            }
            if !matches!(item.source, Source::ExplicitFile | Source::Regex) {
                continue;
            }
            match content::serialize(&item.path) {
                Ok(block) => blocks.push(block),
                Err(e) => {
                    // A file that vanished or failed to parse between
                    // resolution and read is reported, not fatal. Listed as a
                    // missing file regardless of which step selected it.
                    forest.not_found.push(ResolvedItem::not_found(
                        item.path.clone(),
                        Source::ExplicitFile,
                        Some(e.to_string()),
                    ));
                }
            }
        }
    }

    render::render(&forest, &blocks, options)
}
