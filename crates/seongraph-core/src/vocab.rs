//! SEON vocabulary — classes, partitioned object properties, data properties

use std::collections::{HashMap, HashSet};

use crate::term::Iri;

/// Namespace URIs the vocabulary is built from.
pub mod ns {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const SEON_GENERAL: &str = "http://www.w3.org/2002/07/owl";
    pub const SEON_MAIN: &str = "http://se-on.org/ontologies/general/2012/2/main.owl#";
    pub const SEON_CODE: &str = "http://se-on.org/ontologies/domain-specific/2012/02/code.owl#";
    pub const SEON_JAVA: &str = "http://se-on.org/ontologies/system-specific/2012/02/java.owl#";
    pub const CUSTOM_DEFINITIONS: &str = "http://definitions.moonshot.sep/_#";
    pub const INSTANCES: &str = "http://instances.moonshot.sep/_#";
}

/// Which walker phase an object property may be emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgePartition {
    /// Local to the declaration being processed; emitted during initialization.
    Simple,
    /// Requires cross-declaration resolution; emitted during the regular phase.
    Complex,
}

/// Classes named by the SEON code ontology plus the custom extension.
const CLASSES: &[(&str, &str)] = &[
    ("Thing", ns::SEON_GENERAL),
    ("Nothing", ns::SEON_GENERAL),
    ("AccessModifier", ns::SEON_CODE),
    ("AnnotationType", ns::SEON_CODE),
    ("Artifact", ns::SEON_MAIN),
    ("ClassType", ns::SEON_CODE),
    ("CodeEntity", ns::SEON_CODE),
    ("ComplexType", ns::SEON_CODE),
    ("Constructor", ns::SEON_CODE),
    ("Datatype", ns::SEON_CODE),
    ("EnumerationType", ns::SEON_CODE),
    ("ExceptionType", ns::SEON_CODE),
    ("Field", ns::SEON_CODE),
    ("File", ns::SEON_MAIN),
    ("InterfaceType", ns::SEON_CODE),
    ("Method", ns::SEON_CODE),
    ("Namespace", ns::SEON_CODE),
    ("Parameter", ns::SEON_CODE),
    ("PrimitiveType", ns::SEON_CODE),
    ("SeonThing", ns::SEON_MAIN),
    ("Variable", ns::SEON_CODE),
];

/// `rdfs:subClassOf` fragment of the loaded schema, `(subclass, superclass)`.
///
/// `File`, `Artifact` and `AccessModifier` are deliberately outside the
/// `CodeEntity` subtree: file and modifier nodes never receive a
/// `containsCodeEntity` edge.
const SUB_CLASS_OF: &[(&str, &str)] = &[
    ("SeonThing", "Thing"),
    ("Artifact", "SeonThing"),
    ("File", "Artifact"),
    ("CodeEntity", "SeonThing"),
    ("Datatype", "CodeEntity"),
    ("ComplexType", "Datatype"),
    ("PrimitiveType", "Datatype"),
    ("ClassType", "ComplexType"),
    ("InterfaceType", "ComplexType"),
    ("EnumerationType", "ComplexType"),
    ("AnnotationType", "ComplexType"),
    ("ExceptionType", "ClassType"),
    ("Method", "CodeEntity"),
    ("Constructor", "CodeEntity"),
    ("Field", "CodeEntity"),
    ("Variable", "CodeEntity"),
    ("Parameter", "CodeEntity"),
    ("Namespace", "CodeEntity"),
];

const SIMPLE_OBJECT_PROPERTIES: &[(&str, &str)] = &[
    ("containsCodeEntity", ns::SEON_CODE),
    ("declaresField", ns::SEON_CODE),
    ("declaresMethod", ns::SEON_CODE),
    ("declaresConstructor", ns::SEON_CODE),
    ("hasAccessModifier", ns::SEON_CODE),
    ("hasNamespaceMember", ns::SEON_CODE),
    ("hasParameter", ns::SEON_CODE),
    ("isDeclaredConstructorOf", ns::SEON_CODE),
    ("isDeclaredFieldOf", ns::SEON_CODE),
    ("isDeclaredMethodOf", ns::SEON_CODE),
    ("isNamespaceMemberOf", ns::SEON_CODE),
    ("isParameterOf", ns::SEON_CODE),
];

const COMPLEX_OBJECT_PROPERTIES: &[(&str, &str)] = &[
    ("accessesField", ns::SEON_CODE),
    ("catchesException", ns::SEON_CODE),
    ("constructorIsInvokedBy", ns::SEON_CODE),
    ("expectsDatatype", ns::SEON_CODE),
    ("hasDatatype", ns::SEON_CODE),
    ("hasReturnType", ns::SEON_CODE),
    ("hasSubClass", ns::SEON_CODE),
    ("hasSubInterface", ns::SEON_CODE),
    ("hasSuperClass", ns::SEON_CODE),
    ("hasSuperInterface", ns::SEON_CODE),
    ("implementsInterface", ns::SEON_CODE),
    ("instantiatesClass", ns::SEON_CODE),
    ("invokesConstructor", ns::SEON_CODE),
    ("invokesMethod", ns::SEON_CODE),
    ("isAccessedBy", ns::SEON_CODE),
    ("isCaughtBy", ns::SEON_CODE),
    ("isDatatypeOf", ns::SEON_CODE),
    ("isExpectedDatatype", ns::SEON_CODE),
    ("isImplementedBy", ns::SEON_CODE),
    ("isInstantiatedBy", ns::SEON_CODE),
    ("isReturnTypeOf", ns::SEON_CODE),
    ("isThrownBy", ns::SEON_CODE),
    ("methodIsInvokedBy", ns::SEON_CODE),
    ("throwsException", ns::SEON_CODE),
    ("usesComplexType", ns::SEON_CODE),
    ("isNestedNamespaceIn", ns::CUSTOM_DEFINITIONS),
    ("hasNestedNamespaceMember", ns::CUSTOM_DEFINITIONS),
    ("isNestedComplexTypeIn", ns::CUSTOM_DEFINITIONS),
    ("hasNestedComplexTypeMember", ns::CUSTOM_DEFINITIONS),
];

const DATA_PROPERTIES: &[(&str, &str)] = &[
    ("hasCodeIdentifier", ns::SEON_CODE),
    ("hasDoc", ns::SEON_CODE),
    ("hasIdentifier", ns::SEON_CODE),
    ("hasLength", ns::SEON_CODE),
    ("hasPosition", ns::SEON_CODE),
    ("isAbstract", ns::SEON_CODE),
    ("isConstant", ns::SEON_CODE),
    ("isStatic", ns::SEON_CODE),
    ("startsAt", ns::SEON_CODE),
    ("isStaticComplexType", ns::CUSTOM_DEFINITIONS),
    ("isStaticVariable", ns::CUSTOM_DEFINITIONS),
    ("isExternalImport", ns::CUSTOM_DEFINITIONS),
];

/// The ontology schema: immutable tables consulted by the engine instead of
/// per-call branching on names.
#[derive(Debug)]
pub struct Vocabulary {
    classes: HashMap<String, Iri>,
    /// Descendant closure per class, including the class itself.
    sub_classes: HashMap<String, HashSet<String>>,
    object_properties: HashMap<String, (Iri, EdgePartition)>,
    data_properties: HashMap<String, Iri>,
    prefixes: Vec<(String, String)>,
}

impl Vocabulary {
    pub fn new() -> Self {
        let mut classes = HashMap::new();
        for (name, namespace) in CLASSES {
            classes.insert(name.to_string(), Iri::new(format!("{namespace}{name}")));
        }

        let mut object_properties = HashMap::new();
        for (name, namespace) in SIMPLE_OBJECT_PROPERTIES {
            object_properties.insert(
                name.to_string(),
                (Iri::new(format!("{namespace}{name}")), EdgePartition::Simple),
            );
        }
        for (name, namespace) in COMPLEX_OBJECT_PROPERTIES {
            object_properties.insert(
                name.to_string(),
                (Iri::new(format!("{namespace}{name}")), EdgePartition::Complex),
            );
        }

        let mut data_properties = HashMap::new();
        for (name, namespace) in DATA_PROPERTIES {
            data_properties.insert(name.to_string(), Iri::new(format!("{namespace}{name}")));
        }

        let prefixes = vec![
            ("rdf".to_string(), ns::RDF.to_string()),
            ("ns1".to_string(), ns::CUSTOM_DEFINITIONS.to_string()),
            ("SEON_general".to_string(), ns::SEON_GENERAL.to_string()),
            ("SEON_main".to_string(), ns::SEON_MAIN.to_string()),
            ("SEON_code".to_string(), ns::SEON_CODE.to_string()),
        ];

        Vocabulary {
            classes,
            sub_classes: Self::closure(SUB_CLASS_OF),
            object_properties,
            data_properties,
            prefixes,
        }
    }

    /// Computes the descendant closure of the subclass table once, the same
    /// result a recursive `rdfs:subClassOf` query would produce.
    fn closure(pairs: &[(&str, &str)]) -> HashMap<String, HashSet<String>> {
        let mut direct: HashMap<&str, Vec<&str>> = HashMap::new();
        for (sub, sup) in pairs {
            direct.entry(*sup).or_default().push(*sub);
        }

        fn collect(
            class: &str,
            direct: &HashMap<&str, Vec<&str>>,
            into: &mut HashSet<String>,
        ) {
            into.insert(class.to_string());
            for sub in direct.get(class).map(Vec::as_slice).unwrap_or_default() {
                collect(sub, direct, into);
            }
        }

        let mut closure = HashMap::new();
        for (name, _) in CLASSES {
            let mut descendants = HashSet::new();
            collect(name, &direct, &mut descendants);
            closure.insert(name.to_string(), descendants);
        }
        closure
    }

    /// Binds an additional language-specific namespace and its vocabulary.
    /// Added classes are roots in the subclass hierarchy; added object
    /// properties land in the complex partition.
    pub fn register_language(
        &mut self,
        prefix: &str,
        namespace: &str,
        classes: &[&str],
        object_properties: &[&str],
        data_properties: &[&str],
    ) {
        self.prefixes
            .push((prefix.to_string(), namespace.to_string()));
        for name in classes {
            self.classes
                .insert(name.to_string(), Iri::new(format!("{namespace}{name}")));
            self.sub_classes
                .insert(name.to_string(), HashSet::from([name.to_string()]));
        }
        for name in object_properties {
            self.object_properties.insert(
                name.to_string(),
                (Iri::new(format!("{namespace}{name}")), EdgePartition::Complex),
            );
        }
        for name in data_properties {
            self.data_properties
                .insert(name.to_string(), Iri::new(format!("{namespace}{name}")));
        }
    }

    pub fn rdf_type(&self) -> Iri {
        Iri::new(format!("{}type", ns::RDF))
    }

    pub fn class(&self, tag: &str) -> Option<&Iri> {
        self.classes.get(tag)
    }

    pub fn object_property(&self, name: &str) -> Option<&(Iri, EdgePartition)> {
        self.object_properties.get(name)
    }

    pub fn data_property(&self, name: &str) -> Option<&Iri> {
        self.data_properties.get(name)
    }

    pub fn is_simple_object_property(&self, name: &str) -> bool {
        matches!(
            self.object_properties.get(name),
            Some((_, EdgePartition::Simple))
        )
    }

    /// All classes that are `tag` or a subtype of it.
    pub fn sub_classes_of(&self, tag: &str) -> Vec<&Iri> {
        let mut iris: Vec<&Iri> = self
            .sub_classes
            .get(tag)
            .into_iter()
            .flatten()
            .filter_map(|name| self.classes.get(name))
            .collect();
        iris.sort();
        iris
    }

    /// Whether `tag` names a `CodeEntity` subtype per the loaded schema.
    pub fn is_code_entity(&self, tag: &str) -> bool {
        self.sub_classes
            .get("CodeEntity")
            .map_or(false, |set| set.contains(tag))
    }

    /// Prefix bindings for serialization, in declaration order.
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Deterministic instance URI for a cleaned name and identifier.
    pub fn instance_iri(&self, clean_name: &str, id: &str) -> Iri {
        Iri::new(format!("{}{clean_name}_{id}", ns::INSTANCES))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
