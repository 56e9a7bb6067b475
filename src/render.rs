/*!
 * Output rendering
 *
 * Pure composition of tree text and content blocks into the final document.
 * Performs no I/O, so the same inputs always produce byte-identical output for
 * both the terminal and the clipboard.
 *
 * Document order: tree section, content section, then every not-found entry.
 * Placing not-found entries in one final merge step (instead of inside the
 * recursive tree render) keeps the not-found-last invariant independently
 * testable.
 */

use std::fmt::Write;

use crate::content::ContentBlock;
use crate::resolver::{ResolvedItem, Source};
use crate::tree::{DirTree, Forest, TreeNode};

/// Independent section toggles
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Suppress all content blocks (tree only)
    pub dir_only: bool,
    /// Suppress the tree section
    pub no_dir_tree: bool,
}

/// Render the final document from a forest and its content blocks
pub fn render(forest: &Forest, blocks: &[ContentBlock], options: &RenderOptions) -> String {
    let mut out = String::new();

    if !options.no_dir_tree {
        for tree in &forest.trees {
            render_tree(&mut out, tree);
        }
    }

    if !options.dir_only {
        for block in blocks {
            render_block(&mut out, block);
        }
    }

    render_not_found(&mut out, &forest.not_found, options);

    out.trim().to_string()
}

/// One tree section: a `Directory:` header, the root basename, then one line
/// per descendant with 4 spaces of indent per depth level and a `+---` marker.
fn render_tree(out: &mut String, tree: &DirTree) {
    let _ = writeln!(out, "\nDirectory: {}", tree.root.display());
    let _ = writeln!(out, "{}", tree.node.name);
    for child in &tree.node.children {
        render_node(out, child, 1);
    }
}

fn render_node(out: &mut String, node: &TreeNode, depth: usize) {
    // Excluded nodes are filtered before tree assembly; skipping here guards
    // the invariant rather than implementing a second filter pass.
    if node.excluded {
        return;
    }
    let _ = writeln!(out, "{}+---{}", "    ".repeat(depth), node.name);
    for child in &node.children {
        render_node(out, child, depth + 1);
    }
}

/// One content section: a `File:` header and the lines inside a literal fence
fn render_block(out: &mut String, block: &ContentBlock) {
    let _ = writeln!(out, "\nFile: {}", block.path.display());
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "{}", block.lines.join("\n"));
    let _ = writeln!(out, "```");
}

/// Final merge of every not-found entry, strictly after all resolved output
fn render_not_found(out: &mut String, not_found: &[ResolvedItem], options: &RenderOptions) {
    let mut missing_files = Vec::new();

    for item in not_found {
        match item.source {
            Source::ExplicitDir => {
                let _ = writeln!(out, "\nDirectory not found: {}", item.path.display());
                if let Some(reason) = &item.reason {
                    let _ = writeln!(out, "  ({})", reason);
                }
            }
            // Walk failures can be files as well as directories
            Source::DirWalk => {
                let _ = writeln!(out, "\nPath not found: {}", item.path.display());
                if let Some(reason) = &item.reason {
                    let _ = writeln!(out, "  ({})", reason);
                }
            }
            Source::Regex => match &item.reason {
                Some(reason) => {
                    let _ = writeln!(out, "\n{}", reason);
                }
                None => {
                    let _ = writeln!(out, "\nBase directory not found: {}", item.path.display());
                }
            },
            Source::ExplicitFile => missing_files.push(item),
        }
    }

    // Missing files are only reported when contents are shown
    if options.dir_only || missing_files.is_empty() {
        return;
    }

    let _ = writeln!(out, "\nFiles not found or ignored:");
    for item in missing_files {
        match &item.reason {
            Some(reason) => {
                let _ = writeln!(out, "{} ({})", item.path.display(), reason);
            }
            None => {
                let _ = writeln!(out, "{}", item.path.display());
            }
        }
    }
}
