//! Position bridge between parse-tree coordinates and the wire protocol
//!
//! Parse trees hand us 1-based lines and 0-based columns; the protocol wants
//! 0-based lines. The bridge converts on the way out, normalizes returned
//! lines back to 1-based, and caches definition answers, since the same
//! position is queried many times over a two-phase analysis.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::debug;

use crate::resolver::SymbolResolver;

/// A normalized resolution result: 1-based line, 0-based column, URI as the
/// server reported it. Callers decide what to do with non-`file://` schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub uri: String,
    pub line: u32,
    pub column: u32,
}

pub struct LspBridge {
    resolver: Box<dyn SymbolResolver>,
    root: PathBuf,
    definition_cache: DashMap<(PathBuf, u32, u32), Vec<ResolvedLocation>>,
}

impl LspBridge {
    pub fn new(resolver: Box<dyn SymbolResolver>, root: impl Into<PathBuf>) -> Self {
        LspBridge {
            resolver,
            root: root.into(),
            definition_cache: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative<'p>(&self, file: &'p Path) -> &'p Path {
        file.strip_prefix(&self.root).unwrap_or(file)
    }

    /// Definition of the symbol at `(line, column)` of `file`; `line` is
    /// 1-based. Errors from the server count as "no result".
    pub fn definition(&self, file: &Path, line: u32, column: u32) -> Vec<ResolvedLocation> {
        let relative = self.relative(file).to_path_buf();
        let key = (relative.clone(), line, column);
        if let Some(hit) = self.definition_cache.get(&key) {
            return hit.value().clone();
        }

        let resolved = match self
            .resolver
            .definition(&relative, line.saturating_sub(1), column)
        {
            Ok(locations) => locations
                .into_iter()
                .map(|raw| ResolvedLocation {
                    uri: raw.uri,
                    line: raw.line + 1,
                    column: raw.character,
                })
                .collect(),
            Err(error) => {
                debug!("definition lookup failed for {}:{line}:{column}: {error}", relative.display());
                Vec::new()
            }
        };
        self.definition_cache.insert(key, resolved.clone());
        resolved
    }

    /// References to the symbol at `(line, column)` of `file`; `line` is
    /// 1-based.
    pub fn references(&self, file: &Path, line: u32, column: u32) -> Vec<ResolvedLocation> {
        let relative = self.relative(file);
        match self
            .resolver
            .references(relative, line.saturating_sub(1), column)
        {
            Ok(locations) => locations
                .into_iter()
                .map(|raw| ResolvedLocation {
                    uri: raw.uri,
                    line: raw.line + 1,
                    column: raw.character,
                })
                .collect(),
            Err(error) => {
                debug!("references lookup failed for {}:{line}:{column}: {error}", relative.display());
                Vec::new()
            }
        }
    }
}
