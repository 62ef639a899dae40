//! Two-phase parse-tree walker
//!
//! Every file is walked twice: the initialization walk creates nodes, data
//! properties and simple edges; the regular walk creates complex edges, which
//! need the graph to already hold every identity. All initialization walks of
//! a language complete before its first regular walk.

use tree_sitter::Node;

use crate::ast::SourceTree;
use crate::engine::{OntologyEngine, Phase};

/// Listener driven by the walker. `enter` fires preorder, `exit` postorder;
/// `finalize` runs once after the last regular walk of the language.
pub trait ParseListener {
    fn engine_mut(&mut self) -> &mut OntologyEngine;

    fn enter(&mut self, node: Node, source: &str);

    fn exit(&mut self, node: Node, source: &str);

    fn finalize(&mut self) {}
}

pub struct TwoPhaseWalker;

impl TwoPhaseWalker {
    /// Phase 1: nodes, data properties, and simple edges.
    pub fn initialization_walk<L: ParseListener>(listener: &mut L, ast: &SourceTree) {
        tracing::info!(
            "phase 1 (nodes, data properties, simple edges): {}",
            ast.path.display()
        );
        listener
            .engine_mut()
            .begin_file(Phase::Initialization, &ast.path);
        Self::walk(listener, ast);
    }

    /// Phase 2: complex edges, resolved against the fully populated graph.
    pub fn regular_walk<L: ParseListener>(listener: &mut L, ast: &SourceTree) {
        tracing::info!("phase 2 (complex edges): {}", ast.path.display());
        listener.engine_mut().begin_file(Phase::Regular, &ast.path);
        Self::walk(listener, ast);
    }

    /// Depth-first traversal with enter/exit events, visitation order
    /// identical in both phases.
    fn walk<L: ParseListener>(listener: &mut L, ast: &SourceTree) {
        let mut cursor = ast.tree.walk();
        loop {
            listener.enter(cursor.node(), &ast.source);
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                listener.exit(cursor.node(), &ast.source);
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }
}
