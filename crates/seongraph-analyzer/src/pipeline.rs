//! Per-language orchestration: discover, parse, resolve, walk, merge

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use seongraph_core::vocab::ns;
use seongraph_core::{xml, TripleStore, Vocabulary};
use seongraph_lsp::{LspBridge, LspClient, SymbolResolver};

use crate::ast::{parse_file, SourceTree};
use crate::language::Language;
use crate::listeners::{CppListener, JavaListener};
use crate::walk::{ParseListener, TwoPhaseWalker};

pub type ResolverFactory =
    Box<dyn Fn(Language, &Path) -> seongraph_lsp::Result<Box<dyn SymbolResolver>>>;

pub struct Pipeline {
    resolver_factory: ResolverFactory,
}

impl Pipeline {
    /// Production pipeline: one language server child process per language,
    /// rooted at the analyzed directory.
    pub fn new() -> Self {
        Pipeline {
            resolver_factory: Box::new(|language, root| {
                let (program, args) = language.server_command();
                let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
                let client = LspClient::start(program, &args, root)?;
                Ok(Box::new(client) as Box<dyn SymbolResolver>)
            }),
        }
    }

    /// Pipeline with injected resolution; tests run on a static table
    /// instead of a live server.
    pub fn with_resolver_factory(resolver_factory: ResolverFactory) -> Self {
        Pipeline { resolver_factory }
    }

    /// Analyze every supported language under `root` and return the merged
    /// graph.
    pub fn analyze_graph(&self, root: &Path) -> anyhow::Result<TripleStore> {
        let root = root
            .canonicalize()
            .with_context(|| format!("input path does not exist: {}", root.display()))?;

        let mut merged = TripleStore::new();
        for language in Language::ALL {
            let files = discover_files(&root, language);
            if files.is_empty() {
                tracing::info!("no files found for {}", language.name());
                continue;
            }
            tracing::info!("{}: {} files", language.name(), files.len());

            let asts: Vec<SourceTree> = files
                .iter()
                .filter_map(|file| parse_file(file, language))
                .collect();
            if asts.is_empty() {
                continue;
            }

            tracing::info!("starting language server for {}", language.name());
            let resolver = (self.resolver_factory)(language, &root)
                .with_context(|| format!("language server for {} failed", language.name()))?;
            let bridge = LspBridge::new(resolver, root.clone());

            let graph = match language {
                Language::Java => run_language(JavaListener::new(bridge), &asts),
                Language::Cpp => run_language(CppListener::new(bridge), &asts),
            };
            merged.merge(&graph);
        }
        Ok(merged)
    }

    /// Analyze and serialize. An input with no supported files still yields a
    /// well-formed empty document with the required prefixes.
    pub fn analyze(&self, root: &Path) -> anyhow::Result<String> {
        let graph = self.analyze_graph(root)?;
        let mut vocab = Vocabulary::new();
        vocab.register_language("SEON_java", ns::SEON_JAVA, &["JavaPackage"], &[], &["hasJavaDoc"]);
        Ok(xml::to_rdf_xml(&graph, &vocab)?)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// All initialization walks complete before the first regular walk, so the
/// regular phase resolves against a fully populated graph.
pub(crate) fn run_language<L: ParseListener>(mut listener: L, asts: &[SourceTree]) -> TripleStore {
    for ast in asts {
        TwoPhaseWalker::initialization_walk(&mut listener, ast);
    }
    for ast in asts {
        TwoPhaseWalker::regular_walk(&mut listener, ast);
    }
    listener.finalize();
    listener.engine_mut().take_store()
}

/// Files of a language under the root, sorted for reproducible walks.
fn discover_files(root: &Path, language: Language) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| Language::from_path(path) == Some(language))
        .collect();
    files.sort();
    files
}
