//! C++ listener
//!
//! Classes, structs, enums, namespaces, functions, members, and expression
//! sites. Exception types are recognized heuristically (`std::exception` base
//! text, or a base that already resolved to an `ExceptionType`); `.cpp` files
//! are paired with the headers they implement through per-line definition
//! queries; `virtual` members mark their enclosing type abstract, which is
//! written when the type is exited.

use std::collections::HashMap;

use tree_sitter::Node;

use seongraph_core::{Iri, Term};
use seongraph_lsp::LspBridge;

use crate::engine::OntologyEngine;
use crate::ident;
use crate::listeners::common::{
    child_of_kind, length_and_start, link_inverse, node_text, NestingState,
};
use crate::walk::ParseListener;

/// Multi-word primitives are registered with underscores so they survive as
/// URI fragments.
const PRIMITIVE_TYPES: &[&str] = &[
    "int",
    "short",
    "long",
    "long_long",
    "unsigned_int",
    "unsigned_short",
    "unsigned_long",
    "unsigned_long_long",
    "char",
    "wchar_t",
    "char16_t",
    "char32_t",
    "float",
    "double",
    "long_double",
    "bool",
    "void",
];

const ACCESS_MODIFIERS: &[&str] = &["private", "protected", "public"];

pub struct CppListener {
    engine: OntologyEngine,
    state: NestingState,
    access_modifiers: HashMap<String, Iri>,
    /// Creation-site id → constructor instance, pre-built from LSP references
    /// during the initialization walk.
    constructor_sites: HashMap<String, Iri>,
}

impl CppListener {
    pub fn new(bridge: LspBridge) -> Self {
        let mut engine = OntologyEngine::new(bridge);

        for primitive in PRIMITIVE_TYPES {
            if let Some(instance) = engine.create_class_instance(None, "PrimitiveType", primitive)
            {
                engine.create_data_property(&instance, "hasCodeIdentifier", primitive);
            }
        }

        let mut access_modifiers = HashMap::new();
        for modifier in ACCESS_MODIFIERS {
            if let Some(instance) = engine.create_class_instance(None, "AccessModifier", modifier)
            {
                engine.create_data_property(&instance, "hasCodeIdentifier", modifier);
                access_modifiers.insert(modifier.to_string(), instance);
            }
        }

        CppListener {
            engine,
            state: NestingState::new(),
            access_modifiers,
            constructor_sites: HashMap::new(),
        }
    }

    /// Innermost declarator of a possibly pointer/reference-wrapped chain,
    /// the node carrying the declared name.
    fn declared_name_node(node: Node) -> Option<Node> {
        let mut current = node.child_by_field_name("declarator")?;
        loop {
            match current.kind() {
                "function_declarator"
                | "pointer_declarator"
                | "reference_declarator"
                | "parenthesized_declarator" => {
                    current = current
                        .child_by_field_name("declarator")
                        .or_else(|| current.named_child(0))?;
                }
                _ => return Some(current),
            }
        }
    }

    /// Whether the declarator chain declares a function.
    fn declares_function(node: Node) -> bool {
        let mut current = node.child_by_field_name("declarator");
        while let Some(declarator) = current {
            if declarator.kind() == "function_declarator" {
                return true;
            }
            current = declarator.child_by_field_name("declarator");
        }
        false
    }

    fn has_child_of_kind(node: Node, kinds: &[&str]) -> bool {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor)
            .any(|child| kinds.contains(&child.kind()));
        result
    }

    fn is_virtual(node: Node) -> bool {
        Self::has_child_of_kind(node, &["virtual", "virtual_function_specifier"])
    }

    fn is_static(node: Node, source: &str) -> bool {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor).any(|child| {
            child.kind() == "storage_class_specifier" && node_text(child, source) == "static"
        });
        result
    }

    fn is_const(node: Node, source: &str) -> bool {
        let mut cursor = node.walk();
        let result = node.children(&mut cursor)
            .any(|child| child.kind() == "type_qualifier" && node_text(child, source) == "const");
        result
    }

    fn access_modifier_edge(&mut self, instance: &Iri) {
        let modifier = self.state.current_modifier().unwrap_or("public").to_string();
        if let Some(target) = self.access_modifiers.get(&modifier) {
            self.engine
                .create_object_property(instance, target, "hasAccessModifier");
        }
    }

    /// Membership, modifier, and extent bookkeeping shared by classes,
    /// structs, and enums. Pushes the complex-type frame.
    fn class_enum_common(&mut self, node: Node, instance: &Iri) {
        if self.state.current_namespace().is_some() && self.state.complex_types.is_empty() {
            let namespace = self.state.current_namespace().cloned();
            if let Some(namespace) = namespace {
                link_inverse(
                    &mut self.engine,
                    instance,
                    &namespace,
                    "isNamespaceMemberOf",
                    "hasNamespaceMember",
                );
            }
        } else if let Some(enclosing) = self.state.current_complex_type().cloned() {
            link_inverse(
                &mut self.engine,
                instance,
                &enclosing,
                "isNestedComplexTypeIn",
                "hasNestedComplexTypeMember",
            );
        }

        self.access_modifier_edge(instance);
        length_and_start(&mut self.engine, instance, node);
        self.state.push_complex_type(instance.clone(), Vec::new());
    }

    /// The instance for a type use site, or none. Primitive and sized types
    /// go through the code-identifier table, everything else through the
    /// language server.
    fn type_use_instance(&mut self, type_node: Node, source: &str) -> Option<Iri> {
        let text = node_text(type_node, source);
        match type_node.kind() {
            "primitive_type" | "sized_type_specifier" => {
                if text == "void" {
                    return None;
                }
                self.engine
                    .instance_by_code_identifier(&text.replace(' ', "_"), "Datatype")
            }
            _ => self.engine.resolve_by_definition(type_node, text, None, false),
        }
    }

    fn enter_translation_unit(&mut self, node: Node) {
        let _ = self.engine.create_file_node(node);
        self.state.modifiers = vec!["public".to_string()];

        // Implementation files implement the headers their first lines refer
        // to (includes resolve to the header file).
        let is_implementation = self
            .engine
            .current_file()
            .and_then(|path| path.extension())
            .and_then(|extension| extension.to_str())
            == Some("cpp");
        if !is_implementation {
            return;
        }
        let Some(current) = self.engine.current_file_instance().cloned() else {
            return;
        };

        let first_line = node
            .named_child(0)
            .map(|child| child.start_position().row as u32 + 1)
            .unwrap_or(1);
        for line in 1..=first_line {
            for header in self.engine.files_defined_at(line, 0) {
                if header.as_str().contains(".h_") || header.as_str().contains(".hpp_") {
                    link_inverse(
                        &mut self.engine,
                        &current,
                        &header,
                        "implementsInterface",
                        "isImplementedBy",
                    );
                }
            }
        }
    }

    fn enter_namespace(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "Namespace", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        if let Some(enclosing) = self.state.current_namespace().cloned() {
            link_inverse(
                &mut self.engine,
                &instance,
                &enclosing,
                "isNestedNamespaceIn",
                "hasNestedNamespaceMember",
            );
        }

        self.state.namespaces.push(instance);
        self.state.modifiers.push("public".to_string());
    }

    fn enter_enum(&mut self, node: Node, source: &str) {
        if node.child_by_field_name("body").is_none() {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "EnumerationType", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        self.class_enum_common(node, &instance);
        self.state.modifiers.push("public".to_string());
        self.engine
            .create_data_property(&instance, "isAbstract", false);
    }

    fn enter_class(&mut self, node: Node, source: &str) {
        if node.child_by_field_name("body").is_none() {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();

        // Exception heuristic: a literal `std::exception` base, or a base
        // that already resolved to an exception type. The lookup runs with
        // the initialization override because classification happens in
        // phase 1.
        let base_node = child_of_kind(node, "base_class_clause").and_then(|clause| {
            let mut cursor = clause.walk();
            let found = clause
                .named_children(&mut cursor)
                .find(|child| child.kind() != "access_specifier");
            found
        });
        let mut tag = "ClassType";
        let mut base_instance = None;
        if let Some(base) = base_node {
            let base_text = node_text(base, source);
            if base_text == "std::exception" {
                tag = "ExceptionType";
            } else {
                base_instance = self
                    .engine
                    .resolve_by_definition(base, base_text, None, true);
                if let Some(ref resolved) = base_instance {
                    if let Some(resource) = self.engine.resource_type(resolved, true) {
                        if resource.as_str().contains("ExceptionType") {
                            tag = "ExceptionType";
                        }
                    }
                }
            }
        }

        let Some(instance) = self.engine.create_class_instance(Some(node), tag, &name) else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        self.class_enum_common(node, &instance);

        if let Some(base) = base_instance {
            link_inverse(&mut self.engine, &instance, &base, "hasSuperClass", "hasSubClass");
        }

        let default_access = if node.kind() == "struct_specifier" {
            "public"
        } else {
            "private"
        };
        self.state.modifiers.push(default_access.to_string());
    }

    fn enter_function_definition(&mut self, node: Node, source: &str) {
        let Some(name_node) = Self::declared_name_node(node) else {
            return;
        };
        let name = node_text(name_node, source).to_string();

        let instance = if node.child_by_field_name("type").is_some() {
            let Some(instance) = self
                .engine
                .create_class_instance(Some(name_node), "Method", &name)
            else {
                return;
            };
            self.engine
                .create_data_property(&instance, "hasCodeIdentifier", &name);

            if Self::is_virtual(node) {
                self.engine.create_data_property(&instance, "isAbstract", true);
                self.state.mark_current_abstract();
            } else {
                self.engine
                    .create_data_property(&instance, "isAbstract", false);
            }
            self.engine
                .create_data_property(&instance, "isStatic", Self::is_static(node, source));

            if let Some(owner) = self.state.current_complex_type().cloned() {
                link_inverse(
                    &mut self.engine,
                    &owner,
                    &instance,
                    "declaresMethod",
                    "isDeclaredMethodOf",
                );
            }

            if let Some(type_node) = node.child_by_field_name("type") {
                if let Some(return_type) = self.type_use_instance(type_node, source) {
                    link_inverse(
                        &mut self.engine,
                        &instance,
                        &return_type,
                        "hasReturnType",
                        "isReturnTypeOf",
                    );
                }
            }
            instance
        } else {
            // No declared type: constructor (or destructor) definition.
            let Some(instance) = self
                .engine
                .create_class_instance(Some(name_node), "Constructor", &name)
            else {
                return;
            };
            self.engine
                .create_data_property(&instance, "hasCodeIdentifier", &name);

            if let Some(owner) = self.state.current_complex_type().cloned() {
                link_inverse(
                    &mut self.engine,
                    &owner,
                    &instance,
                    "declaresConstructor",
                    "isDeclaredConstructorOf",
                );
            }

            if self.engine.in_initialization() {
                let (line, column) = ident::start_position(name_node);
                for (file, line, column) in self.engine.reference_locations(line, column) {
                    let id = seongraph_core::node_id(&file, line, column);
                    self.constructor_sites.insert(id, instance.clone());
                }
            }
            instance
        };

        length_and_start(&mut self.engine, &instance, node);
        self.state.methods.push(instance);
        self.state.modifiers.push("private".to_string());
    }

    /// Class members: fields, method prototypes (pure virtual ones mark the
    /// type abstract), and in-class constructor declarations.
    fn enter_member(&mut self, node: Node, source: &str) {
        if Self::declares_function(node) {
            let Some(name_node) = Self::declared_name_node(node) else {
                return;
            };
            let name = node_text(name_node, source).to_string();

            if node.child_by_field_name("type").is_none() {
                // In-class constructor or destructor declaration.
                let Some(instance) = self
                    .engine
                    .create_class_instance(Some(name_node), "Constructor", &name)
                else {
                    return;
                };
                self.engine
                    .create_data_property(&instance, "hasCodeIdentifier", &name);
                if let Some(owner) = self.state.current_complex_type().cloned() {
                    link_inverse(
                        &mut self.engine,
                        &owner,
                        &instance,
                        "declaresConstructor",
                        "isDeclaredConstructorOf",
                    );
                }
                if self.engine.in_initialization() {
                    let (line, column) = ident::start_position(name_node);
                    for (file, line, column) in self.engine.reference_locations(line, column) {
                        let id = seongraph_core::node_id(&file, line, column);
                        self.constructor_sites.insert(id, instance.clone());
                    }
                }
                self.access_modifier_edge(&instance);
                return;
            }

            // Method prototype. `virtual` (pure `= 0` or not) marks the
            // enclosing type abstract.
            let Some(instance) = self
                .engine
                .create_class_instance(Some(name_node), "Method", &name)
            else {
                return;
            };
            self.engine
                .create_data_property(&instance, "hasCodeIdentifier", &name);

            if let Some(owner) = self.state.current_complex_type().cloned() {
                link_inverse(
                    &mut self.engine,
                    &owner,
                    &instance,
                    "declaresMethod",
                    "isDeclaredMethodOf",
                );
            }

            if Self::is_virtual(node) {
                self.engine.create_data_property(&instance, "isAbstract", true);
                self.state.mark_current_abstract();
            } else {
                self.engine
                    .create_data_property(&instance, "isAbstract", false);
            }

            length_and_start(&mut self.engine, &instance, node);
            self.access_modifier_edge(&instance);
            return;
        }

        // Plain field.
        let Some(declarator) = node.child_by_field_name("declarator") else {
            return;
        };
        let name = node_text(declarator, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(declarator), "Field", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        if let Some(owner) = self.state.current_complex_type().cloned() {
            link_inverse(
                &mut self.engine,
                &owner,
                &instance,
                "declaresField",
                "isDeclaredFieldOf",
            );
        }

        self.engine
            .create_data_property(&instance, "isConstant", Self::is_const(node, source));
        length_and_start(&mut self.engine, &instance, node);
        self.access_modifier_edge(&instance);
    }

    /// A `declaration` inside a class body with a function declarator and no
    /// type is a constructor (or destructor) declaration.
    fn enter_declaration(&mut self, node: Node, source: &str) {
        if self.state.complex_types.is_empty()
            || !Self::declares_function(node)
            || node.child_by_field_name("type").is_some()
        {
            return;
        }
        let Some(name_node) = Self::declared_name_node(node) else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(name_node), "Constructor", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);
        if let Some(owner) = self.state.current_complex_type().cloned() {
            link_inverse(
                &mut self.engine,
                &owner,
                &instance,
                "declaresConstructor",
                "isDeclaredConstructorOf",
            );
        }
        if self.engine.in_initialization() {
            let (line, column) = ident::start_position(name_node);
            for (file, line, column) in self.engine.reference_locations(line, column) {
                let id = seongraph_core::node_id(&file, line, column);
                self.constructor_sites.insert(id, instance.clone());
            }
        }
        self.access_modifier_edge(&instance);
    }

    fn enter_parameter(&mut self, node: Node, source: &str) {
        // Catch-clause parameters are exception declarations, handled by the
        // catch handler.
        if node
            .parent()
            .and_then(|list| list.parent())
            .map(|grandparent| grandparent.kind() == "catch_clause")
            .unwrap_or(false)
        {
            return;
        }
        let Some(declarator) = node.child_by_field_name("declarator") else {
            return;
        };
        let name = node_text(declarator, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(declarator), "Parameter", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        let position = node
            .parent()
            .map(|parameters| {
                let mut cursor = parameters.walk();
                parameters
                    .children(&mut cursor)
                    .filter(|child| child.kind() == "parameter_declaration")
                    .take_while(|child| child.id() != node.id())
                    .count()
            })
            .unwrap_or(0);
        self.engine
            .create_data_property(&instance, "hasPosition", position);
        self.engine
            .create_data_property(&instance, "isConstant", Self::is_const(node, source));
        length_and_start(&mut self.engine, &instance, node);

        if let Some(method) = self.state.current_method().cloned() {
            link_inverse(
                &mut self.engine,
                &method,
                &instance,
                "hasParameter",
                "isParameterOf",
            );
            if let Some(type_node) = node.child_by_field_name("type") {
                if let Some(datatype) = self.type_use_instance(type_node, source) {
                    link_inverse(
                        &mut self.engine,
                        &method,
                        &datatype,
                        "expectsDatatype",
                        "isExpectedDatatype",
                    );
                }
            }
        }
    }

    fn enter_variable(&mut self, node: Node, source: &str) {
        let Some(declaration) = node.parent().filter(|parent| parent.kind() == "declaration")
        else {
            return;
        };
        let Some(declarator) = node.child_by_field_name("declarator") else {
            return;
        };
        let name = node_text(declarator, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(declarator), "Variable", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);
        self.engine
            .create_data_property(&instance, "isConstant", Self::is_const(declaration, source));
        length_and_start(&mut self.engine, &instance, node);
        self.engine.create_data_property(
            &instance,
            "isStaticVariable",
            Self::is_static(declaration, source),
        );

        if let Some(type_node) = declaration.child_by_field_name("type") {
            if let Some(datatype) = self.type_use_instance(type_node, source) {
                link_inverse(&mut self.engine, &instance, &datatype, "hasDatatype", "isDatatypeOf");
            }
        }
    }

    fn enter_access_specifier(&mut self, node: Node, source: &str) {
        let modifier = node_text(node, source).trim_end_matches(':').to_string();
        self.state.modifiers.pop();
        self.state.modifiers.push(modifier);
    }

    fn enter_catch(&mut self, node: Node, source: &str) {
        let Some(method) = self.state.current_method().cloned() else {
            return;
        };
        let Some(type_node) = node
            .child_by_field_name("parameters")
            .and_then(|parameters| child_of_kind(parameters, "parameter_declaration"))
            .and_then(|parameter| parameter.child_by_field_name("type"))
        else {
            return;
        };
        let exception_name = node_text(type_node, source);
        if let Some(exception) =
            self.engine
                .resolve_by_definition(type_node, exception_name, None, false)
        {
            link_inverse(
                &mut self.engine,
                &method,
                &exception,
                "catchesException",
                "isCaughtBy",
            );
        }
    }

    fn enter_throw(&mut self, node: Node, source: &str) {
        let Some(thrown) = node.named_child(0) else {
            return;
        };
        let target = match thrown.kind() {
            "call_expression" => thrown.child_by_field_name("function"),
            "new_expression" => thrown.child_by_field_name("type"),
            "identifier" | "qualified_identifier" => Some(thrown),
            _ => None,
        };
        let Some(target) = target else {
            return;
        };
        let name = node_text(target, source);
        let Some(exception) = self.engine.resolve_by_definition(target, name, None, false) else {
            return;
        };
        if let Some(method) = self.state.current_method().cloned() {
            link_inverse(
                &mut self.engine,
                &method,
                &exception,
                "throwsException",
                "isThrownBy",
            );
        }
    }

    /// Resolution and edges for a member use site (call or access). The kind
    /// of edge follows the resolved node's type.
    fn member_use(&mut self, name_node: Node, source: &str) {
        let name = node_text(name_node, source);
        let Some(resolved) = self.engine.resolve_by_definition(name_node, name, None, false)
        else {
            return;
        };
        let Some(resource) = self.engine.resource_type(&resolved, false) else {
            return;
        };

        if let Some(method) = self.state.current_method().cloned() {
            if resource.as_str().contains("Method") {
                link_inverse(
                    &mut self.engine,
                    &method,
                    &resolved,
                    "invokesMethod",
                    "methodIsInvokedBy",
                );
            }
            if resource.as_str().contains("Field") {
                link_inverse(
                    &mut self.engine,
                    &method,
                    &resolved,
                    "accessesField",
                    "isAccessedBy",
                );
            }
        }

        if let Some(current) = self.state.current_complex_type().cloned() {
            let owner = match self.engine.attribute(&resolved, "isDeclaredFieldOf") {
                Some(Term::Iri(owner)) => Some(owner),
                _ => match self.engine.attribute(&resolved, "isDeclaredMethodOf") {
                    Some(Term::Iri(owner)) => Some(owner),
                    _ => None,
                },
            };
            if let Some(owner) = owner {
                if owner != current {
                    self.engine
                        .create_object_property(&current, &owner, "usesComplexType");
                }
            }
        }
    }

    fn enter_call(&mut self, node: Node, source: &str) {
        let Some(function) = node.child_by_field_name("function") else {
            return;
        };
        let name_node = match function.kind() {
            "identifier" => Some(function),
            "field_expression" => function.child_by_field_name("field"),
            "qualified_identifier" => function.child_by_field_name("name"),
            _ => None,
        };
        if let Some(name_node) = name_node {
            self.member_use(name_node, source);
        }
    }

    fn enter_field_expression(&mut self, node: Node, source: &str) {
        // The callee of a call expression is handled by the call handler.
        if let Some(parent) = node.parent() {
            if parent.kind() == "call_expression"
                && parent.child_by_field_name("function").map(|n| n.id()) == Some(node.id())
            {
                return;
            }
        }
        if let Some(field) = node.child_by_field_name("field") {
            self.member_use(field, source);
        }
    }

    fn enter_new(&mut self, node: Node, source: &str) {
        let Some(method) = self.state.current_method().cloned() else {
            return;
        };
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };
        let name = node_text(type_node, source);

        if let Some(class) = self.engine.resolve_by_definition(type_node, name, None, false) {
            if let Some(resource) = self.engine.resource_type(&class, false) {
                if resource.as_str().contains("ClassType") {
                    link_inverse(
                        &mut self.engine,
                        &method,
                        &class,
                        "instantiatesClass",
                        "isInstantiatedBy",
                    );
                }
            }
        }

        let site_id = ident::node_identity(Some(type_node), self.engine.current_file());
        if let Some(constructor) = self.constructor_sites.get(&site_id).cloned() {
            link_inverse(
                &mut self.engine,
                &method,
                &constructor,
                "invokesConstructor",
                "constructorIsInvokedBy",
            );
        }
    }
}

impl ParseListener for CppListener {
    fn engine_mut(&mut self) -> &mut OntologyEngine {
        &mut self.engine
    }

    fn enter(&mut self, node: Node, source: &str) {
        match node.kind() {
            "translation_unit" => self.enter_translation_unit(node),
            "namespace_definition" => self.enter_namespace(node, source),
            "enum_specifier" => self.enter_enum(node, source),
            "class_specifier" | "struct_specifier" => self.enter_class(node, source),
            "function_definition" => self.enter_function_definition(node, source),
            "field_declaration" => self.enter_member(node, source),
            "declaration" => self.enter_declaration(node, source),
            "parameter_declaration" => self.enter_parameter(node, source),
            "init_declarator" => self.enter_variable(node, source),
            "access_specifier" => self.enter_access_specifier(node, source),
            "catch_clause" => self.enter_catch(node, source),
            "throw_statement" => self.enter_throw(node, source),
            "call_expression" => self.enter_call(node, source),
            "field_expression" => self.enter_field_expression(node, source),
            "new_expression" => self.enter_new(node, source),
            _ => {}
        }
    }

    fn exit(&mut self, node: Node, _source: &str) {
        match node.kind() {
            "namespace_definition" => {
                if node.child_by_field_name("name").is_some() {
                    self.state.namespaces.pop();
                    self.state.modifiers.pop();
                }
            }
            "enum_specifier" => {
                if node.child_by_field_name("body").is_some()
                    && node.child_by_field_name("name").is_some()
                {
                    self.state.modifiers.pop();
                    self.state.complex_types.pop();
                }
            }
            "class_specifier" | "struct_specifier" => {
                if node.child_by_field_name("body").is_none()
                    || node.child_by_field_name("name").is_none()
                {
                    return;
                }
                // Accumulated abstractness is only known once every member
                // has been walked; an abstract nested type also marks its
                // enclosing type.
                if let Some(frame) = self.state.complex_types.pop() {
                    self.state.modifiers.pop();
                    if frame.is_abstract {
                        self.state.mark_current_abstract();
                    }
                    self.engine
                        .create_data_property(&frame.instance, "isAbstract", frame.is_abstract);
                }
            }
            "function_definition" => {
                if Self::declared_name_node(node).is_some() {
                    self.state.modifiers.pop();
                    self.state.methods.pop();
                }
            }
            _ => {}
        }
    }
}
