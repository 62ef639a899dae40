//! Node identity derived from parse-tree positions
//!
//! Identity must land on the *name token* of a declaration, because that is
//! the position a language server reports when a use site is resolved to its
//! definition. Both walker phases derive ids through the same rules, which is
//! what keeps addressing stable.

use std::path::Path;

use tree_sitter::Node;

use seongraph_core::{node_id, random_node_id};

/// Position (1-based line, 0-based column) of the name token of a node.
///
/// Rules, in order: descend into the `name` field when the grammar exposes
/// one; otherwise skip the `enum`/`enum class` keyword of a C++ enum head or
/// the `namespace ` prefix of a namespace definition; otherwise the node's
/// own start.
pub fn name_position(node: Node) -> (u32, u32) {
    if let Some(name) = node.child_by_field_name("name") {
        let start = name.start_position();
        return (start.row as u32 + 1, start.column as u32);
    }

    let start = node.start_position();
    let line = start.row as u32 + 1;
    let mut column = start.column as u32;
    match node.kind() {
        "enum_specifier" => {
            column += "enum ".len() as u32;
            if let Some(scope) = node.child(1) {
                if scope.kind() == "class" || scope.kind() == "struct" {
                    column += scope.kind().len() as u32 + 1;
                }
            }
        }
        "namespace_definition" => column += "namespace ".len() as u32,
        _ => {}
    }
    (line, column)
}

/// Deterministic id for a node of `file`; no node means no position, which
/// falls back to a UUID-derived id.
pub fn node_identity(node: Option<Node>, file: Option<&Path>) -> String {
    match (node, file) {
        (Some(node), Some(file)) => {
            let (line, column) = name_position(node);
            node_id(&file.to_string_lossy(), line, column)
        }
        _ => random_node_id(),
    }
}

/// Start position of a node as (1-based line, 0-based column), the shape
/// resolver queries are issued in.
pub fn start_position(node: Node) -> (u32, u32) {
    let start = node.start_position();
    (start.row as u32 + 1, start.column as u32)
}
