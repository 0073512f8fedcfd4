//! Field registry built from the header and frozen before the first record.

use std::collections::BTreeMap;

use crate::field::{Cardinality, FieldSpec, Namespace};

/// Outcome of adding a declaration to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// An earlier declaration with the same id already exists; it is kept.
    Duplicate,
}

#[derive(Debug, Clone, Default)]
struct NamespaceFields {
    /// Declarations in header-scan order.
    fields: Vec<FieldSpec>,
    /// Id to position in `fields`; iteration gives the canonical order.
    by_id: BTreeMap<String, usize>,
}

impl NamespaceFields {
    fn insert(&mut self, spec: FieldSpec) -> Registration {
        if self.by_id.contains_key(&spec.id) {
            return Registration::Duplicate;
        }
        self.by_id.insert(spec.id.clone(), self.fields.len());
        self.fields.push(spec);
        Registration::Added
    }

    fn get(&self, id: &str) -> Option<&FieldSpec> {
        self.by_id.get(id).map(|&idx| &self.fields[idx])
    }
}

/// Accumulates declarations while the header is scanned.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistryBuilder {
    info: NamespaceFields,
    format: NamespaceFields,
    filter: NamespaceFields,
}

impl FieldRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: FieldSpec) -> Registration {
        self.namespace_mut(spec.namespace).insert(spec)
    }

    pub fn contains(&self, namespace: Namespace, id: &str) -> bool {
        self.namespace(namespace).by_id.contains_key(id)
    }

    /// Freeze the registry; no declarations can be added afterwards.
    pub fn build(self) -> FieldRegistry {
        FieldRegistry {
            info: self.info,
            format: self.format,
            filter: self.filter,
        }
    }

    fn namespace(&self, namespace: Namespace) -> &NamespaceFields {
        match namespace {
            Namespace::Info => &self.info,
            Namespace::Format => &self.format,
            Namespace::Filter => &self.filter,
        }
    }

    fn namespace_mut(&mut self, namespace: Namespace) -> &mut NamespaceFields {
        match namespace {
            Namespace::Info => &mut self.info,
            Namespace::Format => &mut self.format,
            Namespace::Filter => &mut self.filter,
        }
    }
}

/// Immutable mapping from `(namespace, id)` to [`FieldSpec`].
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    info: NamespaceFields,
    format: NamespaceFields,
    filter: NamespaceFields,
}

impl FieldRegistry {
    pub fn builder() -> FieldRegistryBuilder {
        FieldRegistryBuilder::new()
    }

    pub fn get(&self, namespace: Namespace, id: &str) -> Option<&FieldSpec> {
        self.namespace(namespace).get(id)
    }

    pub fn contains(&self, namespace: Namespace, id: &str) -> bool {
        self.namespace(namespace).by_id.contains_key(id)
    }

    /// Cardinality of a declared field, `None` for unknown ids.
    pub fn cardinality(&self, namespace: Namespace, id: &str) -> Option<Cardinality> {
        self.get(namespace, id).map(|spec| spec.number)
    }

    /// Ids in canonical (lexicographic) order.
    pub fn ids(&self, namespace: Namespace) -> impl Iterator<Item = &str> {
        self.namespace(namespace).by_id.keys().map(String::as_str)
    }

    /// Declarations in canonical (lexicographic) order.
    pub fn fields(&self, namespace: Namespace) -> impl Iterator<Item = &FieldSpec> {
        let ns = self.namespace(namespace);
        ns.by_id.values().map(move |&idx| &ns.fields[idx])
    }

    /// Declarations in the order they appeared in the header.
    pub fn declared(&self, namespace: Namespace) -> &[FieldSpec] {
        &self.namespace(namespace).fields
    }

    pub fn len(&self, namespace: Namespace) -> usize {
        self.namespace(namespace).fields.len()
    }

    pub fn is_empty(&self) -> bool {
        Namespace::ALL.into_iter().all(|ns| self.len(ns) == 0)
    }

    fn namespace(&self, namespace: Namespace) -> &NamespaceFields {
        match namespace {
            Namespace::Info => &self.info,
            Namespace::Format => &self.format,
            Namespace::Filter => &self.filter,
        }
    }
}
