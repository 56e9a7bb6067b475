/*!
 * Content serialization
 *
 * Turns one resolved file into a display-ready block of lines. Plain text is
 * passed through verbatim; `.ipynb` notebooks are converted to a plain-code
 * form so the rendered output stays readable instead of showing raw JSON.
 * Binary content becomes a placeholder block; read and parse failures bubble
 * up so the caller can downgrade the item to not-found.
 */

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// How a block's lines were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Verbatim text file contents
    PlainText,
    /// Notebook converted to plain code
    ConvertedNotebook,
    /// Binary or undecodable file, lines hold a placeholder message
    NonText,
}

/// Display-ready content for one resolved file
#[derive(Debug, Clone)]
pub struct ContentBlock {
    /// Path the block was read from
    pub path: PathBuf,
    /// Plain text, converted notebook, or placeholder
    pub kind: BlockKind,
    /// Content split into lines, without trailing newlines
    pub lines: Vec<String>,
}

/// Notebook cell source: nbformat allows both a list of lines and a single
/// string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Lines(Vec::new())
    }
}

impl CellSource {
    fn text(&self) -> String {
        match self {
            CellSource::Lines(lines) => lines.concat(),
            CellSource::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NotebookCell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<NotebookCell>,
}

/// Serialize one resolved file into a content block.
///
/// Errors are returned for files that disappeared or notebooks that fail to
/// parse; the caller renders those as not-found entries rather than aborting
/// the remaining files.
pub fn serialize(path: &Path) -> Result<ContentBlock> {
    if path.extension().is_some_and(|ext| ext == "ipynb") {
        return convert_notebook(path);
    }

    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(ContentBlock {
            path: path.to_path_buf(),
            kind: BlockKind::PlainText,
            lines: text.lines().map(String::from).collect(),
        }),
        Err(e) => {
            debug!("{} is not valid UTF-8, emitting placeholder", path.display());
            let size = e.as_bytes().len();
            Ok(ContentBlock {
                path: path.to_path_buf(),
                kind: BlockKind::NonText,
                lines: vec![format!(
                    "(binary or non-text file, {} bytes, content omitted)",
                    size
                )],
            })
        }
    }
}

/// Convert a notebook to plain code lines: a `# Generated from` header, then
/// each non-empty code cell under a `# Code cell <n>` header. `n` counts code
/// cells only; markdown and other cell types are skipped entirely.
fn convert_notebook(path: &Path) -> Result<ContentBlock> {
    let raw = fs::read_to_string(path)?;
    let notebook: Notebook = serde_json::from_str(&raw)?;

    let mut lines = vec![format!("# Generated from {}", path.display())];
    let mut code_ordinal = 0;

    for cell in &notebook.cells {
        if cell.cell_type != "code" {
            continue;
        }
        code_ordinal += 1;

        let text = cell.source.text();
        if text.trim().is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("# Code cell {}", code_ordinal));
        lines.extend(text.lines().map(String::from));
    }

    Ok(ContentBlock {
        path: path.to_path_buf(),
        kind: BlockKind::ConvertedNotebook,
        lines,
    })
}
