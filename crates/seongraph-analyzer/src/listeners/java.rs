//! Java listener
//!
//! Maps Java parse-tree productions to SEON nodes and edges. Packages are
//! deduplicated by code identifier; field accesses are attributed to methods
//! through a deferred reference map; nested packages are reconciled after all
//! walks because declaration order across files is arbitrary.

use std::collections::{BTreeMap, HashMap};

use tree_sitter::Node;

use seongraph_core::vocab::ns;
use seongraph_core::{Iri, Term};
use seongraph_lsp::LspBridge;

use crate::engine::OntologyEngine;
use crate::ident;
use crate::listeners::common::{
    child_of_kind, length_and_start, link_inverse, node_text, within_extent, NestingState,
};
use crate::walk::ParseListener;

const PRIMITIVE_TYPES: &[&str] = &[
    "byte", "char", "short", "int", "long", "float", "double", "boolean",
];

const ACCESS_MODIFIERS: &[&str] = &["default", "private", "protected", "public"];

const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "default",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "strictfp",
];

pub struct JavaListener {
    engine: OntologyEngine,
    state: NestingState,
    access_modifiers: HashMap<String, Iri>,
    /// Call-site id → constructor instance, pre-built from LSP references
    /// during the initialization walk.
    constructor_sites: HashMap<String, Iri>,
    /// Field instance → unconsumed reference locations `(file, line, column)`.
    field_references: HashMap<Iri, Vec<(String, u32, u32)>>,
    current_package: Option<String>,
}

impl JavaListener {
    pub fn new(bridge: LspBridge) -> Self {
        let mut engine = OntologyEngine::new(bridge);
        engine.vocab_mut().register_language(
            "SEON_java",
            ns::SEON_JAVA,
            &["JavaPackage"],
            &[],
            &["hasJavaDoc"],
        );

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

        JavaListener {
            engine,
            state: NestingState::new(),
            access_modifiers,
            constructor_sites: HashMap::new(),
            field_references: HashMap::new(),
            current_package: None,
        }
    }

    /// Modifier keywords attached to a declaration.
    fn modifier_list(node: Node) -> Vec<String> {
        let Some(modifiers) = child_of_kind(node, "modifiers") else {
            return Vec::new();
        };
        let mut cursor = modifiers.walk();
        modifiers
            .children(&mut cursor)
            .filter(|child| MODIFIER_KEYWORDS.contains(&child.kind()))
            .map(|child| child.kind().to_string())
            .collect()
    }

    /// `hasAccessModifier` edges; the `default` node stands in when no access
    /// keyword is present.
    fn access_modifier_edges(&mut self, instance: &Iri, modifiers: &[String]) {
        let mut linked = false;
        for modifier in modifiers {
            if let Some(target) = self.access_modifiers.get(modifier) {
                self.engine
                    .create_object_property(instance, target, "hasAccessModifier");
                linked = true;
            }
        }
        if !linked {
            if let Some(target) = self.access_modifiers.get("default") {
                self.engine
                    .create_object_property(instance, target, "hasAccessModifier");
            }
        }
    }

    fn is_primitive(type_node: Node) -> bool {
        match type_node.kind() {
            "integral_type" | "floating_point_type" | "boolean_type" => true,
            "array_type" => type_node
                .child_by_field_name("element")
                .map_or(false, Self::is_primitive),
            _ => false,
        }
    }

    /// The instance for a type use: primitive types by code identifier, all
    /// others through the language server.
    fn datatype_instance(&mut self, type_node: Node, source: &str) -> Option<Iri> {
        let text = node_text(type_node, source);
        if Self::is_primitive(type_node) {
            self.engine.instance_by_code_identifier(text, "Datatype")
        } else {
            self.engine
                .resolve_by_definition(type_node, text, Some("Datatype"), false)
        }
    }

    /// Properties and edges common to fields, local variables, and
    /// parameters.
    fn variable_common(&mut self, node: Node, instance: &Iri, modifiers: &[String], source: &str) {
        self.engine.create_data_property(
            instance,
            "isConstant",
            modifiers.iter().any(|m| m == "final"),
        );
        self.engine.create_data_property(
            instance,
            "isStatic",
            modifiers.iter().any(|m| m == "static"),
        );
        length_and_start(&mut self.engine, instance, node);

        if let Some(type_node) = node.child_by_field_name("type") {
            if let Some(datatype) = self.datatype_instance(type_node, source) {
                link_inverse(&mut self.engine, instance, &datatype, "hasDatatype", "isDatatypeOf");
            }
        }
    }

    /// Membership, access modifiers, nesting edges, and extent properties
    /// common to classes, interfaces, enums, and annotation types. Pushes the
    /// new complex-type frame.
    fn complex_type_common(&mut self, node: Node, instance: &Iri, modifiers: Vec<String>) {
        if let Some(enclosing) = self.state.current_complex_type().cloned() {
            link_inverse(
                &mut self.engine,
                instance,
                &enclosing,
                "isNestedComplexTypeIn",
                "hasNestedComplexTypeMember",
            );
        }

        self.access_modifier_edges(instance, &modifiers);

        if let Some(package_name) = self.current_package.clone() {
            if let Some(package) = self
                .engine
                .instance_by_code_identifier(&package_name, "JavaPackage")
            {
                link_inverse(
                    &mut self.engine,
                    &package,
                    instance,
                    "hasNamespaceMember",
                    "isNamespaceMemberOf",
                );
            }
        }

        length_and_start(&mut self.engine, instance, node);
        self.engine.create_data_property(
            instance,
            "isStaticComplexType",
            modifiers.iter().any(|m| m == "static"),
        );
        self.engine.create_data_property(
            instance,
            "isAbstract",
            modifiers.iter().any(|m| m == "abstract"),
        );

        self.state.push_complex_type(instance.clone(), modifiers);
    }

    fn enter_package(&mut self, node: Node, source: &str) {
        let Some(name_node) = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))
        else {
            return;
        };
        let name = node_text(name_node, source).to_string();

        // One node per package name, whichever file declared it first.
        if self
            .engine
            .instance_by_code_identifier(&name, "JavaPackage")
            .is_none()
        {
            if let Some(instance) = self
                .engine
                .create_class_instance(Some(node), "JavaPackage", &name)
            {
                self.engine
                    .create_data_property(&instance, "hasCodeIdentifier", &name);
            }
        }
        self.current_package = Some(name);
    }

    fn enter_class(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();

        let superclass_type = node
            .child_by_field_name("superclass")
            .and_then(|clause| clause.named_child(0));
        let tag = match superclass_type {
            Some(type_node) if node_text(type_node, source) == "Exception" => "ExceptionType",
            _ => "ClassType",
        };

        let Some(instance) = self.engine.create_class_instance(Some(node), tag, &name) else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);
        self.engine
            .create_data_property(&instance, "isExternalImport", false);

        if let Some(type_node) = superclass_type {
            let type_text = node_text(type_node, source);
            if let Some(superclass) =
                self.engine
                    .resolve_by_definition(type_node, type_text, Some("ClassType"), false)
            {
                link_inverse(
                    &mut self.engine,
                    &instance,
                    &superclass,
                    "hasSuperClass",
                    "hasSubClass",
                );
            }
        }

        if let Some(interfaces) = node.child_by_field_name("interfaces") {
            for type_node in Self::type_list(interfaces) {
                let type_text = node_text(type_node, source);
                if let Some(interface) = self.engine.resolve_by_definition(
                    type_node,
                    type_text,
                    Some("InterfaceType"),
                    false,
                ) {
                    link_inverse(
                        &mut self.engine,
                        &instance,
                        &interface,
                        "implementsInterface",
                        "isImplementedBy",
                    );
                }
            }
        }

        self.complex_type_common(node, &instance, Self::modifier_list(node));
    }

    fn enter_interface(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "InterfaceType", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);
        self.engine
            .create_data_property(&instance, "isExternalImport", false);

        if let Some(extends) = child_of_kind(node, "extends_interfaces") {
            for type_node in Self::type_list(extends) {
                let type_text = node_text(type_node, source);
                if let Some(superinterface) = self.engine.resolve_by_definition(
                    type_node,
                    type_text,
                    Some("InterfaceType"),
                    false,
                ) {
                    link_inverse(
                        &mut self.engine,
                        &instance,
                        &superinterface,
                        "hasSuperInterface",
                        "hasSubInterface",
                    );
                }
            }
        }

        self.complex_type_common(node, &instance, Self::modifier_list(node));
    }

    fn enter_enum(&mut self, node: Node, source: &str) {
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
        self.complex_type_common(node, &instance, Self::modifier_list(node));
    }

    fn enter_annotation_type(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "AnnotationType", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);
        self.complex_type_common(node, &instance, Self::modifier_list(node));
    }

    fn enter_field(&mut self, node: Node, source: &str) {
        let Some(name_node) = node
            .child_by_field_name("declarator")
            .and_then(|declarator| declarator.child_by_field_name("name"))
        else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self.engine.create_class_instance(Some(node), "Field", &name) else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        let modifiers = Self::modifier_list(node);
        self.access_modifier_edges(&instance, &modifiers);

        if let Some(owner) = self.state.current_complex_type().cloned() {
            link_inverse(
                &mut self.engine,
                &owner,
                &instance,
                "declaresField",
                "isDeclaredFieldOf",
            );
        }

        // Pre-build the deferred access map while identities are being laid
        // down; regular-phase method entries consume it.
        if self.engine.in_initialization() {
            let (line, column) = ident::start_position(name_node);
            let locations = self.engine.reference_locations(line, column + 1);
            if !locations.is_empty() {
                self.field_references
                    .entry(instance.clone())
                    .or_default()
                    .extend(locations);
            }
        }

        self.variable_common(node, &instance, &modifiers, source);
    }

    fn enter_local_variable(&mut self, node: Node, source: &str) {
        let Some(name_node) = node
            .child_by_field_name("declarator")
            .and_then(|declarator| declarator.child_by_field_name("name"))
        else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "Variable", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);
        let modifiers = Self::modifier_list(node);
        self.variable_common(node, &instance, &modifiers, source);
    }

    fn enter_method(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self.engine.create_class_instance(Some(node), "Method", &name)
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

        if let Some(type_node) = node.child_by_field_name("type") {
            if type_node.kind() != "void_type" {
                let type_text = node_text(type_node, source);
                let return_type = if Self::is_primitive(type_node) {
                    self.engine
                        .instance_by_code_identifier(type_text, "Datatype")
                } else {
                    self.engine
                        .resolve_by_definition(type_node, type_text, Some("Datatype"), false)
                };
                if let Some(return_type) = return_type {
                    link_inverse(
                        &mut self.engine,
                        &instance,
                        &return_type,
                        "hasReturnType",
                        "isReturnTypeOf",
                    );
                }
            }
        }

        if let Some(throws) = child_of_kind(node, "throws") {
            for exception_node in Self::type_list(throws) {
                let exception_name = node_text(exception_node, source);
                if let Some(exception) = self.engine.resolve_by_definition(
                    exception_node,
                    exception_name,
                    Some("ExceptionType"),
                    false,
                ) {
                    link_inverse(
                        &mut self.engine,
                        &instance,
                        &exception,
                        "throwsException",
                        "isThrownBy",
                    );
                }
            }
        }

        let modifiers = Self::modifier_list(node);
        if modifiers.iter().any(|m| m == "static") {
            self.engine.create_data_property(&instance, "isStatic", true);
        }
        length_and_start(&mut self.engine, &instance, node);
        self.access_modifier_edges(&instance, &modifiers);

        self.state.methods.push(instance.clone());
        self.consume_field_accesses(node, &instance);
    }

    fn enter_constructor(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "Constructor", &name)
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

        // Map every call site of this constructor to its instance; creation
        // expressions look the id up when they are walked.
        if self.engine.in_initialization() {
            let (line, column) = ident::start_position(name_node);
            for (file, line, column) in self.engine.reference_locations(line, column) {
                let id = seongraph_core::node_id(&file, line, column);
                self.constructor_sites.insert(id, instance.clone());
            }
        }

        let modifiers = Self::modifier_list(node);
        length_and_start(&mut self.engine, &instance, node);
        self.access_modifier_edges(&instance, &modifiers);

        self.state.methods.push(instance.clone());
        self.consume_field_accesses(node, &instance);
    }

    fn enter_parameter(&mut self, node: Node, source: &str) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, source).to_string();
        let Some(instance) = self
            .engine
            .create_class_instance(Some(node), "Parameter", &name)
        else {
            return;
        };
        self.engine
            .create_data_property(&instance, "hasCodeIdentifier", &name);

        // Index among the sibling parameters.
        let position = node
            .parent()
            .map(|parameters| {
                let mut cursor = parameters.walk();
                parameters
                    .children(&mut cursor)
                    .filter(|child| child.kind() == "formal_parameter")
                    .take_while(|child| child.id() != node.id())
                    .count()
            })
            .unwrap_or(0);
        self.engine
            .create_data_property(&instance, "hasPosition", position);

        if let Some(method) = self.state.current_method().cloned() {
            link_inverse(
                &mut self.engine,
                &method,
                &instance,
                "hasParameter",
                "isParameterOf",
            );
            if let Some(type_node) = node.child_by_field_name("type") {
                if let Some(datatype) = self.datatype_instance(type_node, source) {
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

        let modifiers = Self::modifier_list(node);
        self.variable_common(node, &instance, &modifiers, source);
    }

    fn enter_invocation(&mut self, node: Node, source: &str) {
        let Some(method) = self.state.current_method().cloned() else {
            return;
        };
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let invoked_name = node_text(name_node, source);
        let Some(invoked) = self
            .engine
            .resolve_by_definition(name_node, invoked_name, None, false)
        else {
            return;
        };

        link_inverse(
            &mut self.engine,
            &method,
            &invoked,
            "invokesMethod",
            "methodIsInvokedBy",
        );

        if let (Some(Term::Iri(owner)), Some(current)) = (
            self.engine.attribute(&invoked, "isDeclaredMethodOf"),
            self.state.current_complex_type(),
        ) {
            if &owner != current {
                let current = current.clone();
                self.engine
                    .create_object_property(&current, &owner, "usesComplexType");
            }
        }
    }

    fn enter_creation(&mut self, node: Node, source: &str) {
        let Some(method) = self.state.current_method().cloned() else {
            return;
        };
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };

        // For a nested `new a.B()`, resolve at the rightmost name segment.
        let (created_node, created_name) = Self::creation_target(type_node, source);

        if let Some(mut created) = self.engine.resolve_by_definition(
            created_node,
            &created_name,
            Some("ClassType"),
            false,
        ) {
            // The definition may point at a constructor; redirect to its
            // declaring class.
            if let Some(Term::Iri(declaring)) =
                self.engine.attribute(&created, "isDeclaredConstructorOf")
            {
                created = declaring;
            }

            link_inverse(
                &mut self.engine,
                &method,
                &created,
                "instantiatesClass",
                "isInstantiatedBy",
            );
            if let Some(current) = self.state.current_complex_type().cloned() {
                if created != current {
                    self.engine
                        .create_object_property(&current, &created, "usesComplexType");
                }
            }
        }

        let site_id = ident::node_identity(Some(node), self.engine.current_file());
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

    fn enter_catch(&mut self, node: Node, source: &str) {
        let Some(method) = self.state.current_method().cloned() else {
            return;
        };
        let Some(catch_type) = node
            .named_child(0)
            .and_then(|parameter| child_of_kind(parameter, "catch_type"))
        else {
            return;
        };
        let exception_name = node_text(catch_type, source);
        if let Some(exception) = self.engine.resolve_by_definition(
            catch_type,
            exception_name,
            Some("ExceptionType"),
            false,
        ) {
            link_inverse(
                &mut self.engine,
                &method,
                &exception,
                "catchesException",
                "isCaughtBy",
            );
        }
    }

    /// Emit `accessesField` for every deferred reference falling inside this
    /// method's extent; consumed locations are removed.
    fn consume_field_accesses(&mut self, node: Node, method: &Iri) {
        if self.engine.in_initialization() {
            return;
        }
        let Some(file) = self
            .engine
            .current_file()
            .map(|path| path.to_string_lossy().into_owned())
        else {
            return;
        };
        let (start_line, start_column) = ident::start_position(node);
        let end = node.end_position();
        let (end_line, end_column) = (end.row as u32 + 1, end.column as u32);

        let mut consumed: Vec<(Iri, usize)> = Vec::new();
        for (field, locations) in &self.field_references {
            for (index, (location_file, line, column)) in locations.iter().enumerate() {
                if location_file == &file
                    && within_extent(*line, *column, start_line, start_column, end_line, end_column)
                {
                    consumed.push((field.clone(), index));
                    break;
                }
            }
        }

        for (field, index) in consumed {
            link_inverse(&mut self.engine, method, &field, "accessesField", "isAccessedBy");
            if let (Some(Term::Iri(owner)), Some(current)) = (
                self.engine.attribute(&field, "isDeclaredFieldOf"),
                self.state.current_complex_type(),
            ) {
                if &owner != current {
                    let current = current.clone();
                    self.engine
                        .create_object_property(&current, &owner, "usesComplexType");
                }
            }
            if let Some(locations) = self.field_references.get_mut(&field) {
                locations.remove(index);
            }
        }
    }

    /// Named types of a `type_list` clause (`implements A, B` / `extends A`).
    fn type_list(clause: Node) -> Vec<Node> {
        let mut types = Vec::new();
        let mut cursor = clause.walk();
        for child in clause.named_children(&mut cursor) {
            if child.kind() == "type_list" {
                let mut inner = child.walk();
                types.extend(child.named_children(&mut inner));
            } else {
                types.push(child);
            }
        }
        types
    }

    /// Rightmost name segment of a creation type, with the node to resolve
    /// at.
    fn creation_target<'t>(type_node: Node<'t>, source: &str) -> (Node<'t>, String) {
        if type_node.kind() == "scoped_type_identifier" {
            let mut cursor = type_node.walk();
            if let Some(last) = type_node
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "type_identifier")
                .last()
            {
                return (last, node_text(last, source).to_string());
            }
        }
        (type_node, node_text(type_node, source).to_string())
    }
}

impl ParseListener for JavaListener {
    fn engine_mut(&mut self) -> &mut OntologyEngine {
        &mut self.engine
    }

    fn enter(&mut self, node: Node, source: &str) {
        match node.kind() {
            "program" => {
                let _ = self.engine.create_file_node(node);
            }
            "package_declaration" => self.enter_package(node, source),
            "class_declaration" => self.enter_class(node, source),
            "interface_declaration" => self.enter_interface(node, source),
            "enum_declaration" => self.enter_enum(node, source),
            "annotation_type_declaration" => self.enter_annotation_type(node, source),
            "field_declaration" => self.enter_field(node, source),
            "local_variable_declaration" => self.enter_local_variable(node, source),
            "method_declaration" => self.enter_method(node, source),
            "constructor_declaration" => self.enter_constructor(node, source),
            "formal_parameter" => self.enter_parameter(node, source),
            "method_invocation" => self.enter_invocation(node, source),
            "object_creation_expression" => self.enter_creation(node, source),
            "catch_clause" => self.enter_catch(node, source),
            _ => {}
        }
    }

    fn exit(&mut self, node: Node, _source: &str) {
        match node.kind() {
            "program" => self.current_package = None,
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "annotation_type_declaration" => {
                self.state.complex_types.pop();
            }
            "method_declaration" | "constructor_declaration" => {
                self.state.methods.pop();
            }
            _ => {}
        }
    }

    /// Nested-package reconciliation: packages are declared in arbitrary
    /// order across files and intermediate packages may never be declared at
    /// all, so the hierarchy can only be stitched together after every walk.
    fn finalize(&mut self) {
        let packages = self.engine.store().instances_by_code_identifier(
            self.engine.vocab(),
            None,
            "JavaPackage",
        );
        let mut by_name: BTreeMap<String, Iri> = BTreeMap::new();
        for instance in packages {
            if let Some(Term::Literal(name)) = self.engine.attribute(&instance, "hasCodeIdentifier")
            {
                by_name.insert(name, instance);
            }
        }

        // Synthesize undeclared intermediate packages with ids derived from
        // the package name, so runs stay deterministic.
        let declared: Vec<String> = by_name.keys().cloned().collect();
        for name in &declared {
            let segments: Vec<&str> = name.split('.').collect();
            for length in 1..segments.len() {
                let prefix = segments[..length].join(".");
                if !by_name.contains_key(&prefix) {
                    let id = seongraph_core::node_id(&prefix, 0, 0);
                    if let Some(instance) =
                        self.engine.synthesize_instance("JavaPackage", &prefix, &id)
                    {
                        by_name.insert(prefix, instance);
                    }
                }
            }
        }

        // Link every package to its immediate parent prefix.
        for (name, instance) in &by_name {
            if let Some((parent_name, _)) = name.rsplit_once('.') {
                if let Some(parent) = by_name.get(parent_name) {
                    link_inverse(
                        &mut self.engine,
                        parent,
                        instance,
                        "hasNestedNamespaceMember",
                        "isNestedNamespaceIn",
                    );
                }
            }
        }
    }
}
