//! Unit tests for seongraph-core

use crate::term::{Iri, Term};
use crate::vocab::{ns, Vocabulary};
use crate::{clean_name, node_id, random_node_id, xml, TripleStore};

#[test]
fn node_id_is_deterministic() {
    let a = node_id("src/A.java", 3, 14);
    let b = node_id("src/A.java", 3, 14);
    assert_eq!(a, b);

    // Different positions or files diverge.
    assert_ne!(a, node_id("src/A.java", 3, 15));
    assert_ne!(a, node_id("src/A.java", 4, 14));
    assert_ne!(a, node_id("src/B.java", 3, 14));
}

#[test]
fn node_id_embeds_position_and_decimal_hash() {
    let id = node_id("main.cpp", 12, 4);
    let mut parts = id.splitn(3, '_');
    assert_eq!(parts.next(), Some("12"));
    assert_eq!(parts.next(), Some("4"));
    let hash = parts.next().unwrap();
    assert!(!hash.is_empty());
    assert!(hash.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn random_node_id_shape() {
    let id = random_node_id();
    assert!(!id.contains('-'));
    assert_eq!(id, id.to_uppercase());
    assert_ne!(id, random_node_id());
}

#[test]
fn clean_name_rules() {
    assert_eq!(clean_name(""), None);
    assert_eq!(clean_name("ClassName[0]").as_deref(), Some("ClassName"));
    assert_eq!(clean_name("Foo[]").as_deref(), Some("Foo"));
    assert_eq!(
        clean_name("Class<Parameter>").as_deref(),
        Some("Class%3CParameter%3E")
    );
    assert_eq!(clean_name("List<String>").as_deref(), Some("List%3CString%3E"));
    assert_eq!(clean_name("plain").as_deref(), Some("plain"));
}

#[test]
fn clean_name_round_trip() {
    for raw in ["List<String>", "Map<K|V>", "Outer<Inner<T>>[]"] {
        let cleaned = clean_name(raw).unwrap();
        let decoded = urlencoding::decode(&cleaned).unwrap();
        assert_eq!(decoded, raw.split('[').next().unwrap());
    }
}

#[test]
fn vocabulary_subtype_closure() {
    let vocab = Vocabulary::new();

    let datatypes = vocab.sub_classes_of("Datatype");
    for tag in [
        "Datatype",
        "PrimitiveType",
        "ComplexType",
        "ClassType",
        "InterfaceType",
        "EnumerationType",
        "AnnotationType",
        "ExceptionType",
    ] {
        let iri = vocab.class(tag).unwrap();
        assert!(datatypes.contains(&iri), "{tag} missing from Datatype closure");
    }

    assert!(vocab.is_code_entity("Method"));
    assert!(vocab.is_code_entity("PrimitiveType"));
    assert!(vocab.is_code_entity("Namespace"));
    assert!(!vocab.is_code_entity("File"));
    assert!(!vocab.is_code_entity("AccessModifier"));
}

#[test]
fn vocabulary_edge_partitions() {
    let vocab = Vocabulary::new();
    assert!(vocab.is_simple_object_property("declaresMethod"));
    assert!(vocab.is_simple_object_property("containsCodeEntity"));
    assert!(!vocab.is_simple_object_property("hasSuperClass"));
    assert!(!vocab.is_simple_object_property("accessesField"));
    assert!(vocab.object_property("invokesMethod").is_some());
    assert!(vocab.object_property("noSuchEdge").is_none());

    // Custom nested edges live in the definitions namespace.
    let (iri, _) = vocab.object_property("isNestedNamespaceIn").unwrap();
    assert!(iri.as_str().starts_with(ns::CUSTOM_DEFINITIONS));
}

#[test]
fn register_language_extends_tables() {
    let mut vocab = Vocabulary::new();
    vocab.register_language("SEON_java", ns::SEON_JAVA, &["JavaPackage"], &[], &["hasJavaDoc"]);

    let package = vocab.class("JavaPackage").unwrap();
    assert!(package.as_str().starts_with(ns::SEON_JAVA));
    // Registered classes are roots: not code entities, closure of just themselves.
    assert!(!vocab.is_code_entity("JavaPackage"));
    assert_eq!(vocab.sub_classes_of("JavaPackage").len(), 1);
    assert!(vocab.data_property("hasJavaDoc").is_some());
}

fn sample_store(vocab: &Vocabulary) -> (TripleStore, Iri, Iri) {
    let mut store = TripleStore::new();
    let class = vocab.instance_iri("A", "1_0_7");
    let method = vocab.instance_iri("run", "2_4_7");

    store.insert(
        &class,
        &vocab.rdf_type(),
        Term::Iri(vocab.class("ClassType").unwrap().clone()),
    );
    store.insert(
        &class,
        vocab.data_property("hasCodeIdentifier").unwrap(),
        Term::literal("A"),
    );
    store.insert(
        &method,
        &vocab.rdf_type(),
        Term::Iri(vocab.class("Method").unwrap().clone()),
    );
    store.insert(
        &method,
        vocab.data_property("hasCodeIdentifier").unwrap(),
        Term::literal("run"),
    );
    store.insert(
        &class,
        &vocab.object_property("declaresMethod").unwrap().0,
        Term::Iri(method.clone()),
    );
    (store, class, method)
}

#[test]
fn store_set_semantics() {
    let vocab = Vocabulary::new();
    let (mut store, class, _) = sample_store(&vocab);
    let before = store.len();

    let inserted = store.insert(
        &class,
        vocab.data_property("hasCodeIdentifier").unwrap(),
        Term::literal("A"),
    );
    assert!(!inserted);
    assert_eq!(store.len(), before);
}

#[test]
fn store_instance_queries() {
    let vocab = Vocabulary::new();
    let (store, class, method) = sample_store(&vocab);

    // Exact type and supertype closure both find the class.
    assert_eq!(
        store.instances_by_code_identifier(&vocab, Some("A"), "ClassType"),
        vec![class.clone()]
    );
    assert_eq!(
        store.instances_by_code_identifier(&vocab, Some("A"), "Datatype"),
        vec![class.clone()]
    );
    assert!(store
        .instances_by_code_identifier(&vocab, Some("A"), "Method")
        .is_empty());

    // Name omitted: every instance of the type.
    assert_eq!(
        store.instances_by_code_identifier(&vocab, None, "Method"),
        vec![method.clone()]
    );

    assert!(store.contains_instance(&class));
    assert!(!store.contains_instance(&vocab.instance_iri("ghost", "9_9_9")));
}

#[test]
fn store_attribute_restrictions() {
    let vocab = Vocabulary::new();
    let (store, class, method) = sample_store(&vocab);

    assert_eq!(
        store.attribute(&vocab, &class, "hasCodeIdentifier"),
        Some(Term::literal("A"))
    );
    // Simple object properties are readable.
    assert_eq!(
        store.attribute(&vocab, &class, "declaresMethod"),
        Some(Term::Iri(method))
    );
    // Complex object properties are not.
    assert_eq!(store.attribute(&vocab, &class, "hasSuperClass"), None);
}

#[test]
fn store_attribute_picks_smallest() {
    let vocab = Vocabulary::new();
    let mut store = TripleStore::new();
    let subject = vocab.instance_iri("x", "1_1_1");
    let property = vocab.data_property("hasLength").unwrap().clone();
    store.insert(&subject, &property, Term::literal("9"));
    store.insert(&subject, &property, Term::literal("12"));

    // "12" < "9" lexicographically.
    assert_eq!(
        store.attribute(&vocab, &subject, "hasLength"),
        Some(Term::literal("12"))
    );
}

#[test]
fn store_merge_is_union() {
    let vocab = Vocabulary::new();
    let (mut left, class, _) = sample_store(&vocab);
    let (right, _, _) = sample_store(&vocab);
    let size = left.len();

    left.merge(&right);
    assert_eq!(left.len(), size, "merging an equal store adds nothing");

    let mut other = TripleStore::new();
    other.insert(&class, vocab.data_property("startsAt").unwrap(), Term::literal("1"));
    left.merge(&other);
    assert_eq!(left.len(), size + 1);
}

#[test]
fn rdf_xml_has_prefixes_and_content() {
    let vocab = Vocabulary::new();
    let (store, class, _) = sample_store(&vocab);
    let output = xml::to_rdf_xml(&store, &vocab).unwrap();

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(output.contains("xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\""));
    assert!(output.contains("xmlns:SEON_code="));
    assert!(output.contains("xmlns:ns1=\"http://definitions.moonshot.sep/_#\""));
    assert!(output.contains(&format!("rdf:about=\"{class}\"")));
    assert!(output.contains("<SEON_code:hasCodeIdentifier>A</SEON_code:hasCodeIdentifier>"));
    assert!(output.contains("<SEON_code:declaresMethod rdf:resource="));
}

#[test]
fn rdf_xml_empty_store_is_minimal() {
    let vocab = Vocabulary::new();
    let output = xml::to_rdf_xml(&TripleStore::new(), &vocab).unwrap();
    assert!(output.contains("<rdf:RDF"));
    assert!(output.contains("</rdf:RDF>"));
    assert!(!output.contains("rdf:Description"));
}

#[test]
fn rdf_xml_is_insertion_order_independent() {
    let vocab = Vocabulary::new();
    let (forward, _, _) = sample_store(&vocab);

    // Same triples inserted in reverse order.
    let mut reversed = TripleStore::new();
    let mut triples: Vec<_> = forward.triples().collect();
    triples.reverse();
    for triple in triples {
        reversed.insert(&triple.subject, &triple.predicate, triple.object);
    }

    assert_eq!(
        xml::to_rdf_xml(&forward, &vocab).unwrap(),
        xml::to_rdf_xml(&reversed, &vocab).unwrap()
    );
}
