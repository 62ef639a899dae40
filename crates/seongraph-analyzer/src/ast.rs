//! Parsed source file container

use std::path::{Path, PathBuf};

use tree_sitter::Tree;

use crate::language::Language;

/// A parse tree together with the path and text it came from.
pub struct SourceTree {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

/// Parse one file. Files that are not valid UTF-8 or that the grammar cannot
/// produce a tree for are skipped.
pub fn parse_file(path: &Path, language: Language) -> Option<SourceTree> {
    let bytes = std::fs::read(path).ok()?;
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(_) => {
            tracing::debug!("skipping non-UTF-8 file {}", path.display());
            return None;
        }
    };

    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language.grammar()).ok()?;
    let tree = parser.parse(&source, None)?;

    Some(SourceTree {
        path: path.to_path_buf(),
        source,
        tree,
    })
}
