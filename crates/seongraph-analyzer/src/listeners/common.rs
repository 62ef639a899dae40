//! Nesting context and helpers shared by the language listeners

use tree_sitter::Node;

use seongraph_core::Iri;

use crate::engine::OntologyEngine;

/// One enclosing complex type. `is_abstract` accumulates while members are
/// walked (a pure virtual member marks the whole type).
#[derive(Debug)]
pub struct ComplexTypeFrame {
    pub instance: Iri,
    pub is_abstract: bool,
    pub modifiers: Vec<String>,
}

/// The listener's stack machine: complex types, namespaces, methods, and
/// access modifiers. Every `enter` that pushes has a matching `exit` that
/// pops.
#[derive(Debug, Default)]
pub struct NestingState {
    pub complex_types: Vec<ComplexTypeFrame>,
    pub namespaces: Vec<Iri>,
    pub methods: Vec<Iri>,
    pub modifiers: Vec<String>,
}

impl NestingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_complex_type(&self) -> Option<&Iri> {
        self.complex_types.last().map(|frame| &frame.instance)
    }

    pub fn current_method(&self) -> Option<&Iri> {
        self.methods.last()
    }

    pub fn current_namespace(&self) -> Option<&Iri> {
        self.namespaces.last()
    }

    pub fn current_modifier(&self) -> Option<&str> {
        self.modifiers.last().map(String::as_str)
    }

    pub fn push_complex_type(&mut self, instance: Iri, modifiers: Vec<String>) {
        self.complex_types.push(ComplexTypeFrame {
            instance,
            is_abstract: false,
            modifiers,
        });
    }

    pub fn mark_current_abstract(&mut self) {
        if let Some(frame) = self.complex_types.last_mut() {
            frame.is_abstract = true;
        }
    }
}

/// The node's text slice, empty on a range error.
pub fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// `hasLength` and `startsAt` of a declaration node.
pub fn length_and_start(engine: &mut OntologyEngine, instance: &Iri, node: Node) {
    engine.create_data_property(instance, "hasLength", node.end_byte() - node.start_byte());
    engine.create_data_property(instance, "startsAt", node.start_position().row + 1);
}

/// Emit a relation and its inverse.
pub fn link_inverse(
    engine: &mut OntologyEngine,
    from: &Iri,
    to: &Iri,
    forward: &str,
    inverse: &str,
) {
    engine.create_object_property(from, to, forward);
    engine.create_object_property(to, from, inverse);
}

/// First child of the given kind.
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// Whether `(line, column)` falls inside the extent of a declaration given by
/// its start and end positions (1-based lines).
pub fn within_extent(
    line: u32,
    column: u32,
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
) -> bool {
    (line > start_line && line < end_line)
        || (line == start_line && line == end_line && column >= start_column && column <= end_column)
        || (line == start_line && line < end_line && column >= start_column)
        || (line > start_line && line == end_line && column <= end_column)
}
