//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId};
use crate::ytype::YangType;
use crate::{FAKE_ROOT_ANNOTATION, ParsedSchema};

/// Index of an entry within the schema arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct EntryId(pub(crate) usize);

/// Statement kind of a schema entry. Containers and lists share the
/// `Directory` kind; lists are distinguished by their list attributes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum EntryKind {
    Directory,
    Leaf,
    LeafList,
    Choice,
    Case,
    AnyData,
}

/// The `config` statement value, before inheritance resolution.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum ConfigValue {
    True,
    False,
    #[default]
    Inherit,
}

/// Attributes present on lists and leaf-lists.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct ListAttr {
    pub ordered_by_user: bool,
    pub min_elements: Option<u64>,
    pub max_elements: Option<u64>,
}

/// Arena record for one schema entry.
#[derive(Debug, Default)]
pub struct EntryData {
    pub(crate) name: String,
    pub(crate) kind: EntryKind,
    pub(crate) config: ConfigValue,
    // Namespace (belonging) module.
    pub(crate) module: String,
    pub(crate) typ: Option<YangType>,
    pub(crate) key: Option<String>,
    pub(crate) list_attr: Option<ListAttr>,
    pub(crate) defaults: Vec<String>,
    pub(crate) description: Option<String>,
    pub(crate) presence: Option<String>,
    pub(crate) mandatory: bool,
    pub(crate) parent: Option<EntryId>,
    pub(crate) dir: BTreeMap<String, EntryId>,
    pub(crate) node: Option<NodeId>,
    pub(crate) annotations: BTreeMap<String, serde_json::Value>,
    pub(crate) extensions: BTreeMap<String, String>,
}

impl Default for EntryKind {
    fn default() -> Self {
        EntryKind::Directory
    }
}

/// Borrowed navigation handle over one entry of a parsed schema.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    schema: &'a ParsedSchema,
    id: EntryId,
}

// ===== impl Entry =====

impl<'a> Entry<'a> {
    pub(crate) fn new(schema: &'a ParsedSchema, id: EntryId) -> Self {
        Entry { schema, id }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn schema(&self) -> &'a ParsedSchema {
        self.schema
    }

    fn data(&self) -> &'a EntryData {
        self.schema.entry_data(self.id)
    }

    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    pub fn kind(&self) -> EntryKind {
        self.data().kind
    }

    /// Effective `config` value, resolving inheritance through ancestors.
    /// Entries above any explicit statement default to `true`.
    pub fn config(&self) -> bool {
        let mut entry = Some(*self);
        while let Some(e) = entry {
            match e.data().config {
                ConfigValue::True => return true,
                ConfigValue::False => return false,
                ConfigValue::Inherit => entry = e.parent(),
            }
        }
        true
    }

    pub fn raw_config(&self) -> ConfigValue {
        self.data().config
    }

    /// Namespace module of the entry (the augmenter, when augmented).
    pub fn belonging_module(&self) -> &'a str {
        &self.data().module
    }

    /// Module containing the textual definition of the entry, recovered
    /// from the AST back-reference. Falls back to the belonging module for
    /// entries without one.
    pub fn defining_module(&self) -> &'a str {
        match self.node() {
            Some(node) => node.module(),
            None => self.belonging_module(),
        }
    }

    /// Module in which the root of the enclosing tree was instantiated.
    pub fn root_module(&self) -> &'a str {
        let mut entry = *self;
        while let Some(parent) = entry.parent() {
            entry = parent;
        }
        entry.belonging_module()
    }

    pub fn typ(&self) -> Option<&'a YangType> {
        self.data().typ.as_ref()
    }

    /// The raw `key` statement of a list, untokenized.
    pub fn key(&self) -> Option<&'a str> {
        self.data().key.as_deref()
    }

    pub fn list_attr(&self) -> Option<&'a ListAttr> {
        self.data().list_attr.as_ref()
    }

    pub fn defaults(&self) -> &'a [String] {
        &self.data().defaults
    }

    pub fn description(&self) -> Option<&'a str> {
        self.data().description.as_deref()
    }

    pub fn presence(&self) -> Option<&'a str> {
        self.data().presence.as_deref()
    }

    pub fn mandatory(&self) -> bool {
        self.data().mandatory
    }

    pub fn parent(&self) -> Option<Entry<'a>> {
        self.data().parent.map(|id| self.schema.entry(id))
    }

    /// Iterates over direct children in lexicographic name order.
    pub fn children(&self) -> impl Iterator<Item = Entry<'a>> + 'a {
        let schema = self.schema;
        self.data().dir.values().map(move |id| schema.entry(*id))
    }

    pub fn child(&self, name: &str) -> Option<Entry<'a>> {
        self.data().dir.get(name).map(|id| self.schema.entry(*id))
    }

    /// Iterates from the direct parent up to the tree root.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            schema: self.schema,
            next: self.data().parent,
        }
    }

    pub fn node(&self) -> Option<Node<'a>> {
        self.data().node.map(|id| self.schema.node(id))
    }

    pub fn annotation(&self, name: &str) -> Option<&'a serde_json::Value> {
        self.data().annotations.get(name)
    }

    pub fn extension(&self, name: &str) -> Option<&'a str> {
        self.data().extensions.get(name).map(|s| s.as_str())
    }

    /// Absolute schema path segments, from the tree root to this entry.
    pub fn path_segments(&self) -> Vec<&'a str> {
        let mut segments = vec![self.name()];
        for ancestor in self.ancestors() {
            segments.push(ancestor.name());
        }
        segments.reverse();
        segments
    }

    /// Absolute schema path, `/<module>/<name>/...`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in self.path_segments() {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    // ===== classification predicates =====

    pub fn is_leaf(&self) -> bool {
        self.kind() == EntryKind::Leaf
    }

    pub fn is_leaf_list(&self) -> bool {
        self.kind() == EntryKind::LeafList
    }

    /// A directory entry: container, list or the (fake) root.
    pub fn is_directory(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    pub fn is_list(&self) -> bool {
        self.is_directory() && self.data().list_attr.is_some()
    }

    pub fn is_container(&self) -> bool {
        self.is_directory() && self.data().list_attr.is_none()
    }

    pub fn is_choice(&self) -> bool {
        self.kind() == EntryKind::Choice
    }

    pub fn is_case(&self) -> bool {
        self.kind() == EntryKind::Case
    }

    pub fn is_anydata(&self) -> bool {
        self.kind() == EntryKind::AnyData
    }

    pub fn is_fake_root(&self) -> bool {
        self.annotation(FAKE_ROOT_ANNOTATION)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry<'_> {}

impl std::fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("path", &self.path())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Iterator over an entry's ancestors, nearest first.
pub struct Ancestors<'a> {
    schema: &'a ParsedSchema,
    next: Option<EntryId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.schema.entry(self.next?);
        self.next = entry.data().parent;
        Some(entry)
    }
}
