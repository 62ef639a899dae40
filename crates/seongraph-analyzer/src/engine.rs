//! Ontology engine — phase-gated emission of nodes, edges, and properties
//!
//! The engine owns the triple store, the vocabulary, and the bridge to the
//! language server. Listeners call emission unconditionally; whether anything
//! is written follows from the static edge partition and the current phase,
//! never from conditionals at the call sites.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tree_sitter::Node;

use seongraph_core::vocab::EdgePartition;
use seongraph_core::{clean_name, random_node_id, Iri, Term, TripleStore, Vocabulary};
use seongraph_lsp::LspBridge;

use crate::ident;

/// The walker phase currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First walk: nodes, data properties, simple edges.
    Initialization,
    /// Second walk: complex edges.
    Regular,
}

pub struct OntologyEngine {
    phase: Phase,
    vocab: Vocabulary,
    store: TripleStore,
    bridge: LspBridge,
    current_file: Option<PathBuf>,
    current_file_instance: Option<Iri>,
    file_instances: Vec<Iri>,
}

impl OntologyEngine {
    pub fn new(bridge: LspBridge) -> Self {
        OntologyEngine {
            phase: Phase::Initialization,
            vocab: Vocabulary::new(),
            store: TripleStore::new(),
            bridge,
            current_file: None,
            current_file_instance: None,
            file_instances: Vec::new(),
        }
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn vocab_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocab
    }

    pub fn store(&self) -> &TripleStore {
        &self.store
    }

    /// Hand the accumulated graph to the caller, leaving the engine empty.
    pub fn take_store(&mut self) -> TripleStore {
        std::mem::take(&mut self.store)
    }

    pub fn in_initialization(&self) -> bool {
        self.phase == Phase::Initialization
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn current_file_instance(&self) -> Option<&Iri> {
        self.current_file_instance.as_ref()
    }

    /// Called by the walker at the start of each per-file pass.
    pub fn begin_file(&mut self, phase: Phase, path: &Path) {
        self.phase = phase;
        self.current_file = Some(path.to_path_buf());
    }

    /// Creates the `File` node for the file currently being walked and
    /// remembers it for containment edges and include pairing.
    pub fn create_file_node(&mut self, node: Node) -> Option<Iri> {
        let path = self.current_file.clone()?;
        let name = path.to_string_lossy().into_owned();
        let instance = self.create_class_instance(Some(node), "File", &name)?;
        if !self.file_instances.contains(&instance) {
            self.file_instances.push(instance.clone());
        }
        self.current_file_instance = Some(instance.clone());
        Some(instance)
    }

    /// Creates (during initialization) or re-addresses (during the regular
    /// phase) a class instance. Always returns the URI: callers rely on
    /// addressing parity across phases.
    pub fn create_class_instance(
        &mut self,
        node: Option<Node>,
        tag: &str,
        name: &str,
    ) -> Option<Iri> {
        let id = ident::node_identity(node, self.current_file.as_deref());
        let clean = clean_name(name)?;
        let class = self.vocab.class(tag)?.clone();
        let instance = self.vocab.instance_iri(&clean, &id);

        if self.in_initialization() {
            self.store
                .insert(&instance, &self.vocab.rdf_type(), Term::Iri(class));
            self.create_data_property(&instance, "hasIdentifier", &id);
            if tag != "PrimitiveType" && self.vocab.is_code_entity(tag) {
                if let Some(file) = self.current_file_instance.clone() {
                    self.create_object_property(&file, &instance, "containsCodeEntity");
                }
            }
        }

        Some(instance)
    }

    /// Emits an object property if its partition matches the phase; simple
    /// edges in initialization, complex edges in the regular phase. Anything
    /// else is silently dropped; the phase firewall is part of the protocol,
    /// not an error.
    pub fn create_object_property(&mut self, from: &Iri, to: &Iri, name: &str) {
        let Some((predicate, partition)) = self.vocab.object_property(name).cloned() else {
            return;
        };
        let allowed = match partition {
            EdgePartition::Simple => self.in_initialization(),
            EdgePartition::Complex => !self.in_initialization(),
        };
        if allowed {
            self.store.insert(from, &predicate, Term::Iri(to.clone()));
        }
    }

    /// Emits a data property; dropped outside the initialization phase.
    pub fn create_data_property(&mut self, instance: &Iri, name: &str, value: impl Display) {
        if !self.in_initialization() {
            return;
        }
        let Some(predicate) = self.vocab.data_property(name).cloned() else {
            return;
        };
        self.store
            .insert(instance, &predicate, Term::Literal(value.to_string()));
    }

    /// Value of a data property or simple object property; none during
    /// initialization.
    pub fn attribute(&self, instance: &Iri, property: &str) -> Option<Term> {
        if self.in_initialization() {
            return None;
        }
        self.store.attribute(&self.vocab, instance, property)
    }

    /// The `rdf:type` of an instance; none during initialization unless the
    /// caller overrides (the C++ exception classifier must look at already
    /// typed superclasses while still in phase 1).
    pub fn resource_type(&self, instance: &Iri, override_initialization: bool) -> Option<Iri> {
        if self.in_initialization() && !override_initialization {
            return None;
        }
        self.store.resource_type(&self.vocab, instance)
    }

    /// Finds the single declared instance carrying `name`, searching `tag`
    /// and its subtypes. Outside initialization a miss synthesizes an
    /// external-import node, so symbols declared outside the repository still
    /// get a target.
    pub fn instance_by_code_identifier(&mut self, name: &str, tag: &str) -> Option<Iri> {
        let clean = clean_name(name)?;
        let matches = self
            .store
            .instances_by_code_identifier(&self.vocab, Some(&clean), tag);
        match matches.len() {
            1 => matches.into_iter().next(),
            0 if !self.in_initialization() => {
                self.synthesize_external_instance(&clean, tag, &random_node_id())
            }
            _ => None,
        }
    }

    /// Resolves a use site to the instance of its declaration through the
    /// language server.
    ///
    /// Exactly one definition must come back. An in-repository (`file://`)
    /// answer is mapped through the identity formula and returned only if the
    /// graph really holds that instance. A foreign answer synthesizes an
    /// external-import node when a type tag is known.
    pub fn resolve_by_definition(
        &mut self,
        node: Node,
        name: &str,
        tag: Option<&str>,
        override_initialization: bool,
    ) -> Option<Iri> {
        if self.in_initialization() && !override_initialization {
            return None;
        }
        let clean = clean_name(name)?;
        let file = self.current_file.clone()?;
        let (line, column) = ident::start_position(node);

        let locations = self.bridge.definition(&file, line, column);
        if locations.len() != 1 {
            return None;
        }
        let location = &locations[0];

        if let Some(path) = location.uri.strip_prefix("file://") {
            let id = seongraph_core::node_id(path, location.line, location.column);
            let instance = self.vocab.instance_iri(&clean, &id);
            if self.store.contains_instance(&instance) {
                Some(instance)
            } else {
                None
            }
        } else if let Some(tag) = tag {
            if self.in_initialization() {
                return None;
            }
            let id = seongraph_core::node_id(&location.uri, location.line, location.column);
            self.synthesize_external_instance(&clean, tag, &id)
        } else {
            None
        }
    }

    /// In-repository locations referencing the symbol at `(line, column)` of
    /// the current file, as `(path, 1-based line, column)`. Available in both
    /// phases: the deferred field/constructor maps are pre-built during the
    /// initialization walk.
    pub fn reference_locations(&self, line: u32, column: u32) -> Vec<(String, u32, u32)> {
        let Some(file) = self.current_file.as_deref() else {
            return Vec::new();
        };
        self.bridge
            .references(file, line, column)
            .into_iter()
            .filter_map(|location| {
                location
                    .uri
                    .strip_prefix("file://")
                    .map(|path| (path.to_string(), location.line, location.column))
            })
            .collect()
    }

    /// File instances whose path is the definition target of `(line, column)`
    /// of the current file; used to pair `.cpp` files with the headers they
    /// implement. Empty during initialization.
    pub fn files_defined_at(&mut self, line: u32, column: u32) -> Vec<Iri> {
        if self.in_initialization() {
            return Vec::new();
        }
        let Some(file) = self.current_file.clone() else {
            return Vec::new();
        };
        let current = self.current_file_instance.clone();

        let mut found = Vec::new();
        for location in self.bridge.definition(&file, line, column) {
            let Some(path) = location.uri.strip_prefix("file://") else {
                continue;
            };
            for instance in &self.file_instances {
                if instance.as_str().contains(path)
                    && Some(instance) != current.as_ref()
                    && !found.contains(instance)
                {
                    found.push(instance.clone());
                }
            }
        }
        found
    }

    /// Writes an external-import node directly, bypassing the phase gates.
    /// Idempotent per `(name, id)` through the store's set semantics.
    fn synthesize_external_instance(&mut self, clean: &str, tag: &str, id: &str) -> Option<Iri> {
        let class = self.vocab.class(tag)?.clone();
        let instance = self.vocab.instance_iri(clean, id);
        let rdf_type = self.vocab.rdf_type();
        self.store.insert(&instance, &rdf_type, Term::Iri(class));
        self.insert_raw(&instance, "hasCodeIdentifier", clean);
        self.insert_raw(&instance, "hasIdentifier", id);
        self.insert_raw(&instance, "isExternalImport", "true");
        Some(instance)
    }

    /// Creates a node outside the walk phases (post-walk reconciliation uses
    /// this for packages that were never declared explicitly).
    pub fn synthesize_instance(&mut self, tag: &str, name: &str, id: &str) -> Option<Iri> {
        let clean = clean_name(name)?;
        let class = self.vocab.class(tag)?.clone();
        let instance = self.vocab.instance_iri(&clean, id);
        let rdf_type = self.vocab.rdf_type();
        self.store.insert(&instance, &rdf_type, Term::Iri(class));
        self.insert_raw(&instance, "hasCodeIdentifier", &clean);
        self.insert_raw(&instance, "hasIdentifier", id);
        Some(instance)
    }

    fn insert_raw(&mut self, instance: &Iri, property: &str, value: &str) {
        if let Some(predicate) = self.vocab.data_property(property).cloned() {
            self.store
                .insert(instance, &predicate, Term::Literal(value.to_string()));
        }
    }
}
