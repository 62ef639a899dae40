//! RDF/XML serialization of a triple store

use std::collections::BTreeMap;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::store::TripleStore;
use crate::term::Term;
use crate::vocab::Vocabulary;

/// Serialize the store as RDF/XML with the vocabulary's prefix bindings.
///
/// Output is deterministic for equal triple sets: subjects are written in
/// sorted order and predicates sorted within each subject.
pub fn to_rdf_xml(store: &TripleStore, vocab: &Vocabulary) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("rdf:RDF");
    for (prefix, namespace) in vocab.prefixes() {
        root.push_attribute((format!("xmlns:{prefix}").as_str(), namespace.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    // Group triples by subject; BTreeMap keeps subjects sorted.
    let mut by_subject: BTreeMap<String, Vec<(String, Term)>> = BTreeMap::new();
    for triple in store.triples() {
        by_subject
            .entry(triple.subject.0)
            .or_default()
            .push((triple.predicate.0, triple.object));
    }

    for (subject, mut properties) in by_subject {
        properties.sort();

        let mut description = BytesStart::new("rdf:Description");
        description.push_attribute(("rdf:about", subject.as_str()));
        writer.write_event(Event::Start(description))?;

        for (predicate, object) in properties {
            let name = qualified_name(vocab, &predicate);
            match object {
                Term::Iri(iri) => {
                    let mut element = BytesStart::new(name.as_str());
                    element.push_attribute(("rdf:resource", iri.as_str()));
                    writer.write_event(Event::Empty(element))?;
                }
                Term::Literal(value) => {
                    writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
                    writer.write_event(Event::Text(BytesText::new(&value)))?;
                    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
                }
            }
        }

        writer.write_event(Event::End(BytesEnd::new("rdf:Description")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("rdf:RDF")))?;

    let bytes = writer.into_inner().into_inner();
    tracing::debug!("serialized {} triples", store.len());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Resolve a predicate URI to `prefix:local` using the longest matching
/// namespace binding.
fn qualified_name(vocab: &Vocabulary, predicate: &str) -> String {
    let mut best: Option<(&str, &str)> = None;
    for (prefix, namespace) in vocab.prefixes() {
        if let Some(local) = predicate.strip_prefix(namespace.as_str()) {
            let longer = best.map_or(true, |(_, other)| namespace.len() > other.len());
            if longer && !local.is_empty() {
                best = Some((prefix.as_str(), namespace.as_str()));
            }
        }
    }
    match best {
        Some((prefix, namespace)) => {
            format!("{prefix}:{}", &predicate[namespace.len()..])
        }
        None => predicate.to_string(),
    }
}
