//! Triple store over petgraph::StableDiGraph with set semantics

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;

use crate::term::{Iri, Term, Triple};
use crate::vocab::Vocabulary;

/// The accumulating triple set. Terms are graph nodes, predicates are edge
/// weights; duplicate triples are never stored, so insertion order is
/// unobservable to readers.
pub struct TripleStore {
    graph: StableDiGraph<Term, Iri>,
    terms: HashMap<Term, NodeIndex>,
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleStore")
            .field("term_count", &self.graph.node_count())
            .field("triple_count", &self.graph.edge_count())
            .finish()
    }
}

impl TripleStore {
    pub fn new() -> Self {
        TripleStore {
            graph: StableDiGraph::new(),
            terms: HashMap::new(),
        }
    }

    fn intern(&mut self, term: Term) -> NodeIndex {
        if let Some(&index) = self.terms.get(&term) {
            return index;
        }
        let index = self.graph.add_node(term.clone());
        self.terms.insert(term, index);
        index
    }

    /// Add a triple. Returns false when it was already present.
    pub fn insert(&mut self, subject: &Iri, predicate: &Iri, object: Term) -> bool {
        if self.contains(subject, predicate, &object) {
            return false;
        }
        let from = self.intern(Term::Iri(subject.clone()));
        let to = self.intern(object);
        self.graph.add_edge(from, to, predicate.clone());
        true
    }

    pub fn contains(&self, subject: &Iri, predicate: &Iri, object: &Term) -> bool {
        let (Some(&from), Some(&to)) = (
            self.terms.get(&Term::Iri(subject.clone())),
            self.terms.get(object),
        ) else {
            return false;
        };
        self.graph
            .edges_connecting(from, to)
            .any(|edge| edge.weight() == predicate)
    }

    /// Whether any triple has this subject.
    pub fn contains_instance(&self, subject: &Iri) -> bool {
        self.terms
            .get(&Term::Iri(subject.clone()))
            .map_or(false, |&index| {
                self.graph
                    .edges_directed(index, Direction::Outgoing)
                    .next()
                    .is_some()
            })
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Iterate over all triples.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        self.graph.edge_references().filter_map(|edge| {
            let subject = match self.graph.node_weight(edge.source())? {
                Term::Iri(iri) => iri.clone(),
                Term::Literal(_) => return None,
            };
            let object = self.graph.node_weight(edge.target())?.clone();
            Some(Triple {
                subject,
                predicate: edge.weight().clone(),
                object,
            })
        })
    }

    /// All objects of `(subject, predicate, _)`.
    pub fn objects(&self, subject: &Iri, predicate: &Iri) -> Vec<Term> {
        let Some(&index) = self.terms.get(&Term::Iri(subject.clone())) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .filter(|edge| edge.weight() == predicate)
            .filter_map(|edge| self.graph.node_weight(edge.target()).cloned())
            .collect()
    }

    /// All subjects of `(_, predicate, object)`.
    pub fn subjects(&self, predicate: &Iri, object: &Term) -> Vec<Iri> {
        let Some(&index) = self.terms.get(object) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(index, Direction::Incoming)
            .filter(|edge| edge.weight() == predicate)
            .filter_map(|edge| match self.graph.node_weight(edge.source()) {
                Some(Term::Iri(iri)) => Some(iri.clone()),
                _ => None,
            })
            .collect()
    }

    /// Subjects typed as `tag` or any subtype, optionally filtered on their
    /// `hasCodeIdentifier` value. Results are sorted and deduplicated.
    pub fn instances_by_code_identifier(
        &self,
        vocab: &Vocabulary,
        name: Option<&str>,
        tag: &str,
    ) -> Vec<Iri> {
        let rdf_type = vocab.rdf_type();
        let Some(identifier_property) = vocab.data_property("hasCodeIdentifier") else {
            return Vec::new();
        };
        let mut instances = Vec::new();
        for class in vocab.sub_classes_of(tag) {
            for subject in self.subjects(&rdf_type, &Term::Iri(class.clone())) {
                let matches = match name {
                    Some(name) => self.contains(
                        &subject,
                        identifier_property,
                        &Term::Literal(name.to_string()),
                    ),
                    None => true,
                };
                if matches {
                    instances.push(subject);
                }
            }
        }
        instances.sort();
        instances.dedup();
        instances
    }

    /// Value of a data property or *simple* object property of `instance`.
    /// Complex object properties are refused so that mid-walk reads never
    /// observe partially resolved state. When several values match, the
    /// lexicographically smallest is returned.
    pub fn attribute(&self, vocab: &Vocabulary, instance: &Iri, property: &str) -> Option<Term> {
        let predicate = match vocab.data_property(property) {
            Some(iri) => iri.clone(),
            None if vocab.is_simple_object_property(property) => {
                vocab.object_property(property)?.0.clone()
            }
            None => return None,
        };
        self.objects(instance, &predicate)
            .into_iter()
            .min_by(|a, b| a.lexical().cmp(b.lexical()))
    }

    /// The `rdf:type` of an instance, smallest first when several exist.
    pub fn resource_type(&self, vocab: &Vocabulary, instance: &Iri) -> Option<Iri> {
        self.objects(instance, &vocab.rdf_type())
            .into_iter()
            .filter_map(|term| match term {
                Term::Iri(iri) => Some(iri),
                Term::Literal(_) => None,
            })
            .min()
    }

    /// Union with another store.
    pub fn merge(&mut self, other: &TripleStore) {
        let mut added = 0usize;
        for triple in other.triples() {
            if self.insert(&triple.subject, &triple.predicate, triple.object) {
                added += 1;
            }
        }
        tracing::debug!("merged {added} triples ({} total)", self.len());
    }
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new()
    }
}
