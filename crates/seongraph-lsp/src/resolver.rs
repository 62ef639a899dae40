//! Resolver seam between the analysis engine and a language server

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A location exactly as the protocol reports it: 0-based line and character,
/// URI untouched (`file://` for in-repository declarations, other schemes for
/// external symbols).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLocation {
    pub uri: String,
    pub line: u32,
    pub character: u32,
}

/// Cross-file symbol resolution. Paths are repository-relative; lines and
/// characters are 0-based on both sides, per the wire protocol.
pub trait SymbolResolver {
    fn definition(&self, file: &Path, line: u32, character: u32) -> Result<Vec<RawLocation>>;

    fn references(&self, file: &Path, line: u32, character: u32) -> Result<Vec<RawLocation>>;
}

/// Table-driven resolver for tests: answers are registered up front, every
/// unknown position resolves to nothing.
#[derive(Debug, Default)]
pub struct StaticResolver {
    definitions: HashMap<(PathBuf, u32, u32), Vec<RawLocation>>,
    references: HashMap<(PathBuf, u32, u32), Vec<RawLocation>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(
        mut self,
        file: impl Into<PathBuf>,
        line: u32,
        character: u32,
        locations: Vec<RawLocation>,
    ) -> Self {
        self.definitions
            .insert((file.into(), line, character), locations);
        self
    }

    pub fn refer(
        mut self,
        file: impl Into<PathBuf>,
        line: u32,
        character: u32,
        locations: Vec<RawLocation>,
    ) -> Self {
        self.references
            .insert((file.into(), line, character), locations);
        self
    }
}

impl SymbolResolver for StaticResolver {
    fn definition(&self, file: &Path, line: u32, character: u32) -> Result<Vec<RawLocation>> {
        Ok(self
            .definitions
            .get(&(file.to_path_buf(), line, character))
            .cloned()
            .unwrap_or_default())
    }

    fn references(&self, file: &Path, line: u32, character: u32) -> Result<Vec<RawLocation>> {
        Ok(self
            .references
            .get(&(file.to_path_buf(), line, character))
            .cloned()
            .unwrap_or_default())
    }
}
