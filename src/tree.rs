/*!
 * Tree assembly
 *
 * Groups resolved directory-walk items by their configured root and builds one
 * trie per root, keyed by path segments and preserving the resolver's
 * deterministic encounter order. `NotFound` items never enter a trie; they are
 * carried alongside the forest so the renderer can place them last.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::warn;

use crate::resolver::{ItemKind, ResolvedItem, Source};
use crate::utils::file_name_str;

/// Node kind within a rendered tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Directory with children
    Directory,
    /// Leaf file
    File,
}

/// One entry in a directory tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Entry basename
    pub name: String,
    /// Directory or file
    pub kind: NodeKind,
    /// Children in encounter order (files first, then directories)
    pub children: Vec<TreeNode>,
    /// Defensive invariant flag: resolver output is already filtered, so this
    /// stays false; the renderer skips any node where it is not.
    pub excluded: bool,
}

impl TreeNode {
    fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            children: Vec::new(),
            excluded: false,
        }
    }
}

/// A tree built from one configured `dirs` entry
#[derive(Debug, Clone)]
pub struct DirTree {
    /// Absolute (configured) root path, used for the section header
    pub root: PathBuf,
    /// Root node, named after the root's basename
    pub node: TreeNode,
}

/// All trees plus the not-found items carried through for final placement
#[derive(Debug, Clone, Default)]
pub struct Forest {
    /// One tree per existing configured dir, in configuration order
    pub trees: Vec<DirTree>,
    /// Every `NotFound` item, in resolution order
    pub not_found: Vec<ResolvedItem>,
}

/// Build the forest from resolver output. Items from `files`/`regexfiles`
/// select content and do not appear in trees.
pub fn build(items: &[ResolvedItem]) -> Forest {
    let mut forest = Forest::default();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for item in items {
        match (&item.kind, item.source) {
            (ItemKind::NotFound, _) => forest.not_found.push(item.clone()),
            (ItemKind::Directory, Source::ExplicitDir) => {
                let name = root_name(&item.path);
                index.insert(item.path.clone(), forest.trees.len());
                forest.trees.push(DirTree {
                    root: item.path.clone(),
                    node: TreeNode::new(name, NodeKind::Directory),
                });
            }
            (kind, Source::DirWalk) => {
                let Some(root) = &item.root else {
                    warn!("walk item without root: {}", item.path.display());
                    continue;
                };
                let Some(&tree_idx) = index.get(root) else {
                    warn!("walk item for unknown root: {}", root.display());
                    continue;
                };
                let node_kind = match kind {
                    ItemKind::Directory => NodeKind::Directory,
                    _ => NodeKind::File,
                };
                insert(&mut forest.trees[tree_idx].node, root, &item.path, node_kind);
            }
            // Content selections (files/regexfiles) are not tree entries
            _ => {}
        }
    }

    forest
}

/// Display name for a tree root; falls back to the full path for roots
/// without a basename (e.g. `/`).
fn root_name(path: &Path) -> String {
    let name = file_name_str(path);
    if name.is_empty() {
        path.display().to_string()
    } else {
        name
    }
}

/// Insert a path into the trie, creating intermediate directory nodes as
/// needed. The resolver emits parents before children, so intermediates are
/// normally already present.
fn insert(root: &mut TreeNode, root_path: &Path, path: &Path, kind: NodeKind) {
    let Ok(rel) = path.strip_prefix(root_path) else {
        warn!(
            "walk item {} outside its root {}",
            path.display(),
            root_path.display()
        );
        return;
    };

    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if segments.is_empty() {
        return;
    }

    let mut node = root;
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        let child_kind = if i == last { kind } else { NodeKind::Directory };
        let pos = match node.children.iter().position(|c| &c.name == segment) {
            Some(pos) => pos,
            None => {
                node.children
                    .push(TreeNode::new(segment.clone(), child_kind));
                node.children.len() - 1
            }
        };
        node = &mut node.children[pos];
    }
}
