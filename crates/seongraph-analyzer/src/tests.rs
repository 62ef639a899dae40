//! Listener and pipeline tests
//!
//! Fixtures are parsed with the real grammars; cross-file resolution runs
//! against a table-driven resolver registered with the exact positions the
//! listeners query.

use std::path::{Path, PathBuf};

use seongraph_core::vocab::ns;
use seongraph_core::{node_id, Iri, Term, TripleStore, Vocabulary};
use seongraph_lsp::{LspBridge, RawLocation, StaticResolver};

use crate::ast::SourceTree;
use crate::engine::{OntologyEngine, Phase};
use crate::language::Language;
use crate::listeners::{CppListener, JavaListener};
use crate::pipeline::{run_language, Pipeline};
use crate::walk::{ParseListener, TwoPhaseWalker};

fn test_vocab() -> Vocabulary {
    let mut vocab = Vocabulary::new();
    vocab.register_language("SEON_java", ns::SEON_JAVA, &["JavaPackage"], &[], &["hasJavaDoc"]);
    vocab
}

fn source_tree(path: &str, source: &str, language: Language) -> SourceTree {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language.grammar()).unwrap();
    let tree = parser.parse(source, None).unwrap();
    SourceTree {
        path: PathBuf::from(path),
        source: source.to_string(),
        tree,
    }
}

fn run_java(files: &[(&str, &str)], resolver: StaticResolver) -> TripleStore {
    let asts: Vec<SourceTree> = files
        .iter()
        .map(|(path, source)| source_tree(path, source, Language::Java))
        .collect();
    let bridge = LspBridge::new(Box::new(resolver), "/repo");
    run_language(JavaListener::new(bridge), &asts)
}

fn run_cpp(files: &[(&str, &str)], resolver: StaticResolver) -> TripleStore {
    let asts: Vec<SourceTree> = files
        .iter()
        .map(|(path, source)| source_tree(path, source, Language::Cpp))
        .collect();
    let bridge = LspBridge::new(Box::new(resolver), "/repo");
    run_language(CppListener::new(bridge), &asts)
}

fn only_instance(store: &TripleStore, vocab: &Vocabulary, name: &str, tag: &str) -> Iri {
    let instances = store.instances_by_code_identifier(vocab, Some(name), tag);
    assert_eq!(instances.len(), 1, "expected exactly one {tag} named {name}, got {instances:?}");
    instances.into_iter().next().unwrap()
}

fn edge(store: &TripleStore, vocab: &Vocabulary, from: &Iri, name: &str, to: &Iri) -> bool {
    let (predicate, _) = vocab.object_property(name).unwrap();
    store.contains(from, predicate, &Term::Iri(to.clone()))
}

fn literal_attr(
    store: &TripleStore,
    vocab: &Vocabulary,
    instance: &Iri,
    property: &str,
) -> Option<String> {
    match store.attribute(vocab, instance, property) {
        Some(Term::Literal(value)) => Some(value),
        _ => None,
    }
}

fn file_node(store: &TripleStore, vocab: &Vocabulary, path_fragment: &str) -> Iri {
    let files = store.subjects(
        &vocab.rdf_type(),
        &Term::Iri(vocab.class("File").unwrap().clone()),
    );
    files
        .into_iter()
        .find(|file| file.as_str().contains(path_fragment))
        .expect("file node missing")
}

/// Every directed relation with a named inverse must be present in both
/// directions or neither.
fn assert_inverse_closure(store: &TripleStore, vocab: &Vocabulary) {
    const INVERSES: &[(&str, &str)] = &[
        ("declaresMethod", "isDeclaredMethodOf"),
        ("declaresField", "isDeclaredFieldOf"),
        ("declaresConstructor", "isDeclaredConstructorOf"),
        ("hasNamespaceMember", "isNamespaceMemberOf"),
        ("hasParameter", "isParameterOf"),
        ("hasSuperClass", "hasSubClass"),
        ("hasSuperInterface", "hasSubInterface"),
        ("implementsInterface", "isImplementedBy"),
        ("hasDatatype", "isDatatypeOf"),
        ("hasReturnType", "isReturnTypeOf"),
        ("expectsDatatype", "isExpectedDatatype"),
        ("invokesMethod", "methodIsInvokedBy"),
        ("invokesConstructor", "constructorIsInvokedBy"),
        ("instantiatesClass", "isInstantiatedBy"),
        ("accessesField", "isAccessedBy"),
        ("throwsException", "isThrownBy"),
        ("catchesException", "isCaughtBy"),
        ("isNestedComplexTypeIn", "hasNestedComplexTypeMember"),
        ("isNestedNamespaceIn", "hasNestedNamespaceMember"),
    ];
    for (forward, inverse) in INVERSES {
        let forward_iri = vocab.object_property(forward).unwrap().0.clone();
        let inverse_iri = vocab.object_property(inverse).unwrap().0.clone();
        for triple in store.triples() {
            if triple.predicate == forward_iri {
                let Term::Iri(object) = &triple.object else { continue };
                assert!(
                    store.contains(object, &inverse_iri, &Term::Iri(triple.subject.clone())),
                    "missing inverse {inverse} for {forward}: {} -> {object}",
                    triple.subject
                );
            }
        }
    }
}

/// Every subject carries at most one `rdf:type`.
fn assert_single_type(store: &TripleStore, vocab: &Vocabulary) {
    let rdf_type = vocab.rdf_type();
    for triple in store.triples() {
        if triple.predicate == rdf_type {
            assert_eq!(
                store.objects(&triple.subject, &rdf_type).len(),
                1,
                "{} has more than one rdf:type",
                triple.subject
            );
        }
    }
}

// ── Java ────────────────────────────────────────────────

const JAVA_A: &str = "\
package p;

public class A {
    private int x;

    public int get() {
        return x;
    }
}
";

fn java_a_resolver() -> StaticResolver {
    // References of field `x` (queried one column into the name) point at the
    // `x` inside `return x;`.
    StaticResolver::new().refer(
        "A.java",
        3,
        17,
        vec![RawLocation {
            uri: "file:///repo/A.java".to_string(),
            line: 6,
            character: 15,
        }],
    )
}

#[test]
fn java_single_class_nodes_and_edges() {
    let store = run_java(&[("/repo/A.java", JAVA_A)], java_a_resolver());
    let vocab = test_vocab();

    let package = only_instance(&store, &vocab, "p", "JavaPackage");
    let class = only_instance(&store, &vocab, "A", "ClassType");
    let field = only_instance(&store, &vocab, "x", "Field");
    let method = only_instance(&store, &vocab, "get", "Method");
    let int_type = only_instance(&store, &vocab, "int", "PrimitiveType");

    assert!(edge(&store, &vocab, &package, "hasNamespaceMember", &class));
    assert!(edge(&store, &vocab, &class, "isNamespaceMemberOf", &package));
    assert!(edge(&store, &vocab, &class, "declaresField", &field));
    assert!(edge(&store, &vocab, &class, "declaresMethod", &method));
    assert!(edge(&store, &vocab, &method, "hasReturnType", &int_type));
    assert!(edge(&store, &vocab, &field, "hasDatatype", &int_type));
    assert!(edge(&store, &vocab, &method, "accessesField", &field));
    assert!(edge(&store, &vocab, &field, "isAccessedBy", &method));

    // Containment from the file node; primitives stay outside it.
    let file = file_node(&store, &vocab, "/repo/A.java");
    for entity in [&class, &field, &method] {
        assert!(edge(&store, &vocab, &file, "containsCodeEntity", entity));
    }
    assert!(!edge(&store, &vocab, &file, "containsCodeEntity", &int_type));

    // Access modifiers.
    let private = only_instance(&store, &vocab, "private", "AccessModifier");
    let public = only_instance(&store, &vocab, "public", "AccessModifier");
    assert!(edge(&store, &vocab, &field, "hasAccessModifier", &private));
    assert!(edge(&store, &vocab, &method, "hasAccessModifier", &public));

    assert_eq!(literal_attr(&store, &vocab, &class, "isExternalImport").as_deref(), Some("false"));
    assert_inverse_closure(&store, &vocab);
    assert_single_type(&store, &vocab);
}

#[test]
fn java_identity_is_position_derived_and_stable() {
    let store = run_java(&[("/repo/A.java", JAVA_A)], java_a_resolver());
    let vocab = test_vocab();

    // `A` sits on line 3 at column 13 of A.java; the instance URI embeds
    // exactly that identity in both phases.
    let class = only_instance(&store, &vocab, "A", "ClassType");
    assert_eq!(class, vocab.instance_iri("A", &node_id("/repo/A.java", 3, 13)));

    let second = run_java(&[("/repo/A.java", JAVA_A)], java_a_resolver());
    let class_again = only_instance(&second, &test_vocab(), "A", "ClassType");
    assert_eq!(class, class_again);
}

#[test]
fn java_inheritance_and_exception_classification() {
    let resolver = StaticResolver::new().define(
        "B.java",
        0,
        23,
        vec![RawLocation {
            uri: "file:///repo/A.java".to_string(),
            line: 0,
            character: 13,
        }],
    );
    let store = run_java(
        &[
            ("/repo/A.java", "public class A {}\n"),
            ("/repo/B.java", "public class B extends A {}\n"),
            ("/repo/MyErr.java", "public class MyErr extends Exception {}\n"),
        ],
        resolver,
    );
    let vocab = test_vocab();

    let a = only_instance(&store, &vocab, "A", "ClassType");
    let b = only_instance(&store, &vocab, "B", "ClassType");
    assert!(edge(&store, &vocab, &b, "hasSuperClass", &a));
    assert!(edge(&store, &vocab, &a, "hasSubClass", &b));

    // `extends Exception` classifies the declaration itself.
    only_instance(&store, &vocab, "MyErr", "ExceptionType");
    assert_inverse_closure(&store, &vocab);
}

#[test]
fn java_nested_packages_are_reconciled() {
    let store = run_java(
        &[
            ("/repo/c/C.java", "package a.b.c;\n"),
            ("/repo/a/A.java", "package a;\n"),
            ("/repo/d/D.java", "package a.b.d;\n"),
        ],
        StaticResolver::new(),
    );
    let vocab = test_vocab();

    let a = only_instance(&store, &vocab, "a", "JavaPackage");
    let ab = only_instance(&store, &vocab, "a.b", "JavaPackage");
    let abc = only_instance(&store, &vocab, "a.b.c", "JavaPackage");
    let abd = only_instance(&store, &vocab, "a.b.d", "JavaPackage");

    assert!(edge(&store, &vocab, &a, "hasNestedNamespaceMember", &ab));
    assert!(edge(&store, &vocab, &ab, "hasNestedNamespaceMember", &abc));
    assert!(edge(&store, &vocab, &ab, "hasNestedNamespaceMember", &abd));
    assert!(edge(&store, &vocab, &ab, "isNestedNamespaceIn", &a));
    assert!(edge(&store, &vocab, &abc, "isNestedNamespaceIn", &ab));
    assert!(edge(&store, &vocab, &abd, "isNestedNamespaceIn", &ab));

    // Siblings are not linked to each other.
    assert!(!edge(&store, &vocab, &abc, "hasNestedNamespaceMember", &abd));
    assert!(!edge(&store, &vocab, &abd, "hasNestedNamespaceMember", &abc));
    assert_inverse_closure(&store, &vocab);
}

const JAVA_MAKER: &str = "\
public class Maker {
    public Maker() {
    }

    public Maker build() {
        return new Maker();
    }
}
";

#[test]
fn java_constructor_invocation_and_instantiation() {
    let class_location = RawLocation {
        uri: "file:///repo/Maker.java".to_string(),
        line: 0,
        character: 13,
    };
    let resolver = StaticResolver::new()
        // References of the constructor resolve to the creation site.
        .refer(
            "Maker.java",
            1,
            11,
            vec![RawLocation {
                uri: "file:///repo/Maker.java".to_string(),
                line: 5,
                character: 15,
            }],
        )
        // `new Maker()` and the return type both resolve to the class.
        .define("Maker.java", 5, 19, vec![class_location.clone()])
        .define("Maker.java", 4, 11, vec![class_location]);

    let store = run_java(&[("/repo/Maker.java", JAVA_MAKER)], resolver);
    let vocab = test_vocab();

    let class = only_instance(&store, &vocab, "Maker", "ClassType");
    let constructor = only_instance(&store, &vocab, "Maker", "Constructor");
    let build = only_instance(&store, &vocab, "build", "Method");

    assert!(edge(&store, &vocab, &class, "declaresConstructor", &constructor));
    assert!(edge(&store, &vocab, &build, "instantiatesClass", &class));
    assert!(edge(&store, &vocab, &class, "isInstantiatedBy", &build));
    assert!(edge(&store, &vocab, &build, "invokesConstructor", &constructor));
    assert!(edge(&store, &vocab, &constructor, "constructorIsInvokedBy", &build));
    assert!(edge(&store, &vocab, &build, "hasReturnType", &class));
    assert_inverse_closure(&store, &vocab);
}

const JAVA_CALC: &str = "\
public class Calc {
    int counter;

    public int add(int left, int right) {
        return left + right;
    }
}
";

#[test]
fn java_parameter_positions_and_default_modifier() {
    let store = run_java(&[("/repo/Calc.java", JAVA_CALC)], StaticResolver::new());
    let vocab = test_vocab();

    let add = only_instance(&store, &vocab, "add", "Method");
    let left = only_instance(&store, &vocab, "left", "Parameter");
    let right = only_instance(&store, &vocab, "right", "Parameter");
    let int_type = only_instance(&store, &vocab, "int", "PrimitiveType");

    assert_eq!(literal_attr(&store, &vocab, &left, "hasPosition").as_deref(), Some("0"));
    assert_eq!(literal_attr(&store, &vocab, &right, "hasPosition").as_deref(), Some("1"));
    assert!(edge(&store, &vocab, &add, "hasParameter", &left));
    assert!(edge(&store, &vocab, &add, "hasParameter", &right));
    assert!(edge(&store, &vocab, &left, "isParameterOf", &add));
    assert!(edge(&store, &vocab, &add, "expectsDatatype", &int_type));
    assert!(edge(&store, &vocab, &left, "hasDatatype", &int_type));

    // No access keyword on the field: the `default` modifier stands in.
    let counter = only_instance(&store, &vocab, "counter", "Field");
    let default = only_instance(&store, &vocab, "default", "AccessModifier");
    assert!(edge(&store, &vocab, &counter, "hasAccessModifier", &default));
    assert_inverse_closure(&store, &vocab);
}

const JAVA_SERVICE: &str = "\
public class Service {
    public void fail() throws AppError {
        try {
            run();
        } catch (AppError e) {
        }
    }

    public void run() {
    }
}
";

#[test]
fn java_throws_catches_and_invocations() {
    let app_error_location = RawLocation {
        uri: "file:///repo/AppError.java".to_string(),
        line: 0,
        character: 13,
    };
    let resolver = StaticResolver::new()
        .define("Service.java", 1, 30, vec![app_error_location.clone()])
        .define("Service.java", 4, 17, vec![app_error_location])
        .define(
            "Service.java",
            3,
            12,
            vec![RawLocation {
                uri: "file:///repo/Service.java".to_string(),
                line: 8,
                character: 16,
            }],
        );

    let store = run_java(
        &[
            ("/repo/AppError.java", "public class AppError extends Exception {}\n"),
            ("/repo/Service.java", JAVA_SERVICE),
        ],
        resolver,
    );
    let vocab = test_vocab();

    let app_error = only_instance(&store, &vocab, "AppError", "ExceptionType");
    let fail = only_instance(&store, &vocab, "fail", "Method");
    let run = only_instance(&store, &vocab, "run", "Method");

    assert!(edge(&store, &vocab, &fail, "throwsException", &app_error));
    assert!(edge(&store, &vocab, &app_error, "isThrownBy", &fail));
    assert!(edge(&store, &vocab, &fail, "catchesException", &app_error));
    assert!(edge(&store, &vocab, &app_error, "isCaughtBy", &fail));
    assert!(edge(&store, &vocab, &fail, "invokesMethod", &run));
    assert!(edge(&store, &vocab, &run, "methodIsInvokedBy", &fail));
    assert_inverse_closure(&store, &vocab);
}

const JAVA_EXT: &str = "\
package q;

public class Ext {
    public void run() {
        List<String> items = new ArrayList<>();
    }
}
";

#[test]
fn java_external_imports_are_synthesized() {
    let foreign = |line: u32| RawLocation {
        uri: "jdt://contents/java.util/List.class".to_string(),
        line,
        character: 4,
    };
    let resolver = StaticResolver::new()
        .define("Ext.java", 4, 8, vec![foreign(120)])
        .define("Ext.java", 4, 33, vec![foreign(240)])
        .define("Sub.java", 0, 25, vec![foreign(120)]);

    let store = run_java(
        &[
            ("/repo/Ext.java", JAVA_EXT),
            ("/repo/Sub.java", "public class Sub extends List {}\n"),
        ],
        resolver,
    );
    let vocab = test_vocab();

    // The generic local variable type: an external Datatype with the encoded
    // name.
    let list_of_string = only_instance(&store, &vocab, "List%3CString%3E", "Datatype");
    assert_eq!(
        literal_attr(&store, &vocab, &list_of_string, "isExternalImport").as_deref(),
        Some("true")
    );
    let items = only_instance(&store, &vocab, "items", "Variable");
    assert!(edge(&store, &vocab, &items, "hasDatatype", &list_of_string));

    // The instantiated type and the foreign superclass.
    let array_list = only_instance(&store, &vocab, "ArrayList%3C%3E", "ClassType");
    assert_eq!(
        literal_attr(&store, &vocab, &array_list, "isExternalImport").as_deref(),
        Some("true")
    );
    let list = only_instance(&store, &vocab, "List", "ClassType");
    let sub = only_instance(&store, &vocab, "Sub", "ClassType");
    assert!(edge(&store, &vocab, &sub, "hasSuperClass", &list));

    // External nodes are contained by no file.
    let contains = vocab.object_property("containsCodeEntity").unwrap().0.clone();
    for external in [&list_of_string, &array_list, &list] {
        assert!(
            store.subjects(&contains, &Term::Iri((*external).clone())).is_empty(),
            "external node {external} must have no containsCodeEntity predecessor"
        );
    }
    assert_inverse_closure(&store, &vocab);
    assert_single_type(&store, &vocab);
}

#[test]
fn comment_only_file_has_file_node_and_nothing_else() {
    let store = run_java(
        &[("/repo/Empty.java", "// nothing declared here\n")],
        StaticResolver::new(),
    );
    let vocab = test_vocab();

    let file = file_node(&store, &vocab, "/repo/Empty.java");
    let contains = vocab.object_property("containsCodeEntity").unwrap().0.clone();
    assert!(store.objects(&file, &contains).is_empty());
}

// ── Phase discipline ────────────────────────────────────

#[test]
fn phase_firewall_gates_edges_and_properties() {
    let bridge = LspBridge::new(Box::new(StaticResolver::new()), "/repo");
    let mut engine = OntologyEngine::new(bridge);
    engine.begin_file(Phase::Initialization, Path::new("/repo/X.java"));

    let a = engine.create_class_instance(None, "ClassType", "A").unwrap();
    let b = engine.create_class_instance(None, "ClassType", "B").unwrap();

    // Complex edge during initialization: dropped.
    engine.create_object_property(&a, &b, "hasSuperClass");
    // Simple edge during initialization: kept.
    engine.create_object_property(&a, &b, "declaresMethod");

    let super_class = engine.vocab().object_property("hasSuperClass").unwrap().0.clone();
    let declares = engine.vocab().object_property("declaresMethod").unwrap().0.clone();
    assert!(!engine.store().contains(&a, &super_class, &Term::Iri(b.clone())));
    assert!(engine.store().contains(&a, &declares, &Term::Iri(b.clone())));

    // Attribute reads are unavailable during initialization.
    assert_eq!(engine.attribute(&a, "hasCodeIdentifier"), None);

    engine.begin_file(Phase::Regular, Path::new("/repo/X.java"));

    // Complex edge now passes, simple edge and data properties are dropped.
    engine.create_object_property(&a, &b, "hasSuperClass");
    assert!(engine.store().contains(&a, &super_class, &Term::Iri(b.clone())));

    let before = engine.store().len();
    engine.create_object_property(&b, &a, "declaresField");
    engine.create_data_property(&a, "hasLength", 12);
    assert_eq!(engine.store().len(), before);
}

#[test]
fn initialization_walk_emits_no_complex_edges() {
    let resolver = StaticResolver::new().define(
        "B.java",
        0,
        23,
        vec![RawLocation {
            uri: "file:///repo/A.java".to_string(),
            line: 0,
            character: 13,
        }],
    );
    let bridge = LspBridge::new(Box::new(resolver), "/repo");
    let mut listener = JavaListener::new(bridge);
    let asts = [
        source_tree("/repo/A.java", "public class A {}\n", Language::Java),
        source_tree("/repo/B.java", "public class B extends A {}\n", Language::Java),
    ];

    for ast in &asts {
        TwoPhaseWalker::initialization_walk(&mut listener, ast);
    }
    let vocab = test_vocab();
    let super_class = vocab.object_property("hasSuperClass").unwrap().0.clone();
    assert!(
        !listener
            .engine_mut()
            .store()
            .triples()
            .any(|triple| triple.predicate == super_class),
        "no complex edge may exist before the regular walk"
    );

    for ast in &asts {
        TwoPhaseWalker::regular_walk(&mut listener, ast);
    }
    assert!(listener
        .engine_mut()
        .store()
        .triples()
        .any(|triple| triple.predicate == super_class));
}

// ── C++ ─────────────────────────────────────────────────

const CPP_COLORS: &str = "\
namespace n {

enum class Color { R, G, B };

}
";

#[test]
fn cpp_enum_class_in_namespace() {
    let store = run_cpp(&[("/repo/colors.hpp", CPP_COLORS)], StaticResolver::new());
    let vocab = test_vocab();

    let namespace = only_instance(&store, &vocab, "n", "Namespace");
    let color = only_instance(&store, &vocab, "Color", "EnumerationType");
    let public = only_instance(&store, &vocab, "public", "AccessModifier");

    assert!(edge(&store, &vocab, &color, "isNamespaceMemberOf", &namespace));
    assert!(edge(&store, &vocab, &namespace, "hasNamespaceMember", &color));
    assert!(edge(&store, &vocab, &color, "hasAccessModifier", &public));
    assert_eq!(literal_attr(&store, &vocab, &color, "isAbstract").as_deref(), Some("false"));
    assert_inverse_closure(&store, &vocab);
}

const CPP_WIDGET_H: &str = "\
class W {
public:
    W();

private:
    int size;
};
";

const CPP_WIDGET_CPP: &str = "\
#include \"widget.h\"

W::W() {
}
";

#[test]
fn cpp_header_implementation_pairing() {
    // The include line of widget.cpp resolves to the header file.
    let resolver = StaticResolver::new().define(
        "widget.cpp",
        0,
        0,
        vec![RawLocation {
            uri: "file:///repo/widget.h".to_string(),
            line: 0,
            character: 0,
        }],
    );
    let store = run_cpp(
        &[("/repo/widget.h", CPP_WIDGET_H), ("/repo/widget.cpp", CPP_WIDGET_CPP)],
        resolver,
    );
    let vocab = test_vocab();

    let header = file_node(&store, &vocab, "/repo/widget.h");
    let implementation = file_node(&store, &vocab, "/repo/widget.cpp");
    assert!(edge(&store, &vocab, &implementation, "implementsInterface", &header));
    assert!(edge(&store, &vocab, &header, "isImplementedBy", &implementation));

    // The in-class declaration carries the membership edge.
    let class = only_instance(&store, &vocab, "W", "ClassType");
    let constructor = only_instance(&store, &vocab, "W", "Constructor");
    assert!(edge(&store, &vocab, &class, "declaresConstructor", &constructor));

    let field = only_instance(&store, &vocab, "size", "Field");
    let private = only_instance(&store, &vocab, "private", "AccessModifier");
    let public = only_instance(&store, &vocab, "public", "AccessModifier");
    assert!(edge(&store, &vocab, &field, "hasAccessModifier", &private));
    assert!(edge(&store, &vocab, &constructor, "hasAccessModifier", &public));

    // An empty constructor body invokes nothing.
    let invokes = vocab.object_property("invokesMethod").unwrap().0.clone();
    assert!(!store.triples().any(|triple| triple.predicate == invokes));
    assert_inverse_closure(&store, &vocab);
}

const CPP_SHAPE: &str = "\
class Shape {
public:
    virtual double area() = 0;
};
";

#[test]
fn cpp_pure_virtual_marks_abstract() {
    let store = run_cpp(&[("/repo/shape.hpp", CPP_SHAPE)], StaticResolver::new());
    let vocab = test_vocab();

    let shape = only_instance(&store, &vocab, "Shape", "ClassType");
    let area = only_instance(&store, &vocab, "area", "Method");
    assert_eq!(literal_attr(&store, &vocab, &area, "isAbstract").as_deref(), Some("true"));
    assert_eq!(literal_attr(&store, &vocab, &shape, "isAbstract").as_deref(), Some("true"));
    assert!(edge(&store, &vocab, &shape, "declaresMethod", &area));
}

const CPP_ERRORS: &str = "\
class BaseErr : std::exception {
};

class DerivedErr : BaseErr {
};
";

#[test]
fn cpp_exception_heuristics() {
    // DerivedErr's base resolves to BaseErr, which is already typed as an
    // exception when the classifier runs.
    let resolver = StaticResolver::new().define(
        "errors.hpp",
        3,
        19,
        vec![RawLocation {
            uri: "file:///repo/errors.hpp".to_string(),
            line: 0,
            character: 6,
        }],
    );
    let store = run_cpp(&[("/repo/errors.hpp", CPP_ERRORS)], resolver);
    let vocab = test_vocab();

    let base = only_instance(&store, &vocab, "BaseErr", "ExceptionType");
    let derived = only_instance(&store, &vocab, "DerivedErr", "ExceptionType");
    assert!(edge(&store, &vocab, &derived, "hasSuperClass", &base));
    assert!(edge(&store, &vocab, &base, "hasSubClass", &derived));
    assert_single_type(&store, &vocab);
}

const CPP_GREET: &str = "\
class Greeter {
public:
    void greet() {
    }
};

void run() {
    Greeter g;
    g.greet();
}
";

#[test]
fn cpp_method_invocation() {
    let resolver = StaticResolver::new().define(
        "greet.cpp",
        8,
        6,
        vec![RawLocation {
            uri: "file:///repo/greet.cpp".to_string(),
            line: 2,
            character: 9,
        }],
    );
    let store = run_cpp(&[("/repo/greet.cpp", CPP_GREET)], resolver);
    let vocab = test_vocab();

    let greet = only_instance(&store, &vocab, "greet", "Method");
    let run = only_instance(&store, &vocab, "run", "Method");
    assert!(edge(&store, &vocab, &run, "invokesMethod", &greet));
    assert!(edge(&store, &vocab, &greet, "methodIsInvokedBy", &run));
    assert_inverse_closure(&store, &vocab);
}

// ── Pipeline ────────────────────────────────────────────

#[test]
fn pipeline_empty_input_yields_minimal_rdf() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::with_resolver_factory(Box::new(|_, _| {
        Ok(Box::new(StaticResolver::new()) as Box<dyn seongraph_lsp::SymbolResolver>)
    }));

    let rdf = pipeline.analyze(dir.path()).unwrap();
    assert!(rdf.contains("<rdf:RDF"));
    assert!(rdf.contains("xmlns:SEON_code="));
    assert!(rdf.contains("xmlns:ns1=\"http://definitions.moonshot.sep/_#\""));
    assert!(!rdf.contains("rdf:Description"));
}

#[test]
fn pipeline_missing_input_is_an_error() {
    let pipeline = Pipeline::with_resolver_factory(Box::new(|_, _| {
        Ok(Box::new(StaticResolver::new()) as Box<dyn seongraph_lsp::SymbolResolver>)
    }));
    assert!(pipeline.analyze(Path::new("/no/such/path")).is_err());
}

#[test]
fn pipeline_analyzes_a_java_tree() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("A.java"), JAVA_A).unwrap();
    let root = dir.path().canonicalize().unwrap();

    let reference_uri = format!("file://{}/A.java", root.display());
    let pipeline = Pipeline::with_resolver_factory(Box::new(move |_, _| {
        Ok(Box::new(StaticResolver::new().refer(
            "A.java",
            3,
            17,
            vec![RawLocation {
                uri: reference_uri.clone(),
                line: 6,
                character: 15,
            }],
        )) as Box<dyn seongraph_lsp::SymbolResolver>)
    }));

    let rdf = pipeline.analyze(&root).unwrap();
    assert!(rdf.contains("ClassType"));
    assert!(rdf.contains(">A</SEON_code:hasCodeIdentifier>"));
    assert!(rdf.contains("SEON_code:declaresField"));
    assert!(rdf.contains("SEON_code:accessesField"));
    assert!(rdf.contains("SEON_java"));

    // Skipped: a file that is not valid UTF-8.
    std::fs::write(dir.path().join("Bad.java"), [0xFFu8, 0xFE, 0x00, 0x01]).unwrap();
    let rdf_again = pipeline.analyze(&root).unwrap();
    assert!(rdf_again.contains("ClassType"));
}
