//! Seongraph Core — ontology vocabulary, triple store, and node identity

pub mod identity;
pub mod store;
pub mod term;
pub mod vocab;
pub mod xml;

#[cfg(test)]
pub mod tests;

pub use identity::{clean_name, node_id, random_node_id};
pub use store::TripleStore;
pub use term::{Iri, Term, Triple};
pub use vocab::{EdgePartition, Vocabulary};
