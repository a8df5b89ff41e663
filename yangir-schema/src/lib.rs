//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod entry;
pub mod module;
pub mod node;
pub mod ytype;

use std::collections::BTreeMap;

pub use crate::entry::{
    ConfigValue, Entry, EntryData, EntryId, EntryKind, ListAttr,
};
pub use crate::module::{Identity, IdentityId, IdentityValue, ModuleInfo};
pub use crate::node::{AstNode, Node, NodeId};
pub use crate::ytype::{EnumValue, TypeKind, YangType};

// Annotation stamped on the synthetic root entry.
pub const FAKE_ROOT_ANNOTATION: &str = "is-fake-root";

// Extension overriding the camel-case code-name of an entry.
pub const CAMEL_CASE_EXTENSION: &str = "camel-case-name";

/// A parsed set of YANG modules, as handed over by the parser.
///
/// Entries and AST nodes live in append-only arenas and refer to their
/// parents by id. `Entry` handles borrow the schema and provide tree
/// navigation; nothing in the tree owns anything else.
#[derive(Debug, Default)]
pub struct ParsedSchema {
    entries: Vec<EntryData>,
    nodes: Vec<AstNode>,
    identities: Vec<Identity>,
    modules: Vec<ModuleInfo>,
    roots: Vec<EntryId>,
}

// ===== impl ParsedSchema =====

impl ParsedSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a navigation handle for the given entry.
    pub fn entry(&self, id: EntryId) -> Entry<'_> {
        Entry::new(self, id)
    }

    /// Iterates over the module-level root entries, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.roots.iter().map(|id| self.entry(*id))
    }

    pub fn root_ids(&self) -> &[EntryId] {
        &self.roots
    }

    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    pub fn identity(&self, id: IdentityId) -> &Identity {
        &self.identities[id.0]
    }

    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node::new(self, id)
    }

    pub(crate) fn entry_data(&self, id: EntryId) -> &EntryData {
        &self.entries[id.0]
    }

    pub(crate) fn node_data(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0]
    }

    // ===== builder methods =====
    //
    // Used by the parser frontend to materialize a schema, and by tests to
    // construct fixtures without a parser.

    /// Adds a module and its root entry. The root entry's children are the
    /// module's top-level nodes.
    pub fn add_module(&mut self, info: ModuleInfo) -> EntryId {
        let name = info.name.clone();
        let node = self.add_ast_node(&name, &name, None);
        self.modules.push(info);
        let id = self.push_entry(EntryData {
            name: name.clone(),
            kind: EntryKind::Directory,
            module: name,
            node: Some(node),
            ..Default::default()
        });
        self.roots.push(id);
        id
    }

    /// Adds a synthetic root entry aggregating the given top-level entries.
    /// The children keep their original parents so their schema paths are
    /// unaffected.
    pub fn add_fake_root(
        &mut self,
        name: &str,
        children: Vec<EntryId>,
    ) -> EntryId {
        let mut dir = BTreeMap::new();
        for child in children {
            let child_name = self.entries[child.0].name.clone();
            dir.insert(child_name, child);
        }
        let id = self.push_entry(EntryData {
            name: name.to_owned(),
            kind: EntryKind::Directory,
            dir,
            ..Default::default()
        });
        self.entries[id.0]
            .annotations
            .insert(FAKE_ROOT_ANNOTATION.to_owned(), true.into());
        id
    }

    pub fn add_container(&mut self, parent: EntryId, name: &str) -> EntryId {
        self.add_child(parent, name, EntryKind::Directory)
    }

    pub fn add_list(
        &mut self,
        parent: EntryId,
        name: &str,
        key: &str,
    ) -> EntryId {
        let id = self.add_child(parent, name, EntryKind::Directory);
        self.entries[id.0].key = Some(key.to_owned());
        self.entries[id.0].list_attr = Some(ListAttr::default());
        id
    }

    pub fn add_choice(&mut self, parent: EntryId, name: &str) -> EntryId {
        self.add_child(parent, name, EntryKind::Choice)
    }

    pub fn add_case(&mut self, parent: EntryId, name: &str) -> EntryId {
        self.add_child(parent, name, EntryKind::Case)
    }

    pub fn add_leaf(
        &mut self,
        parent: EntryId,
        name: &str,
        typ: YangType,
    ) -> EntryId {
        let id = self.add_child(parent, name, EntryKind::Leaf);
        self.entries[id.0].typ = Some(typ);
        id
    }

    pub fn add_leaf_list(
        &mut self,
        parent: EntryId,
        name: &str,
        typ: YangType,
    ) -> EntryId {
        let id = self.add_child(parent, name, EntryKind::LeafList);
        self.entries[id.0].typ = Some(typ);
        self.entries[id.0].list_attr = Some(ListAttr::default());
        id
    }

    pub fn add_anydata(&mut self, parent: EntryId, name: &str) -> EntryId {
        self.add_child(parent, name, EntryKind::AnyData)
    }

    pub fn add_identity(&mut self, identity: Identity) -> IdentityId {
        let id = IdentityId(self.identities.len());
        self.identities.push(identity);
        id
    }

    /// Adds a standalone AST node. Entries created through the builder get a
    /// node mirroring the data tree by default; grouping-defined subtrees
    /// override that with `set_node` to share a single definition chain.
    pub fn add_ast_node(
        &mut self,
        name: &str,
        module: &str,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(AstNode {
            name: name.to_owned(),
            module: module.to_owned(),
            parent,
        });
        id
    }

    pub fn set_node(&mut self, entry: EntryId, node: Option<NodeId>) {
        self.entries[entry.0].node = node;
    }

    /// Marks `target` as another instantiation of the same definition as
    /// `source`, the way two `uses` of one grouping instantiate the same
    /// statements. Both subtrees point at the source's AST nodes; children
    /// are matched by name, extra children on either side are left alone.
    pub fn share_definition(&mut self, source: EntryId, target: EntryId) {
        self.entries[target.0].node = self.entries[source.0].node;
        let pairs: Vec<(EntryId, EntryId)> = self.entries[target.0]
            .dir
            .iter()
            .filter_map(|(name, target_child)| {
                self.entries[source.0]
                    .dir
                    .get(name)
                    .map(|source_child| (*source_child, *target_child))
            })
            .collect();
        for (source_child, target_child) in pairs {
            self.share_definition(source_child, target_child);
        }
    }

    pub fn set_config(&mut self, entry: EntryId, config: ConfigValue) {
        self.entries[entry.0].config = config;
    }

    /// Overrides the belonging module, for nodes grafted in by an augment.
    pub fn set_module(&mut self, entry: EntryId, module: &str) {
        self.entries[entry.0].module = module.to_owned();
    }

    pub fn set_description(&mut self, entry: EntryId, description: &str) {
        self.entries[entry.0].description = Some(description.to_owned());
    }

    pub fn set_presence(&mut self, entry: EntryId, statement: &str) {
        self.entries[entry.0].presence = Some(statement.to_owned());
    }

    pub fn set_mandatory(&mut self, entry: EntryId, mandatory: bool) {
        self.entries[entry.0].mandatory = mandatory;
    }

    pub fn add_default(&mut self, entry: EntryId, value: &str) {
        self.entries[entry.0].defaults.push(value.to_owned());
    }

    pub fn set_extension(&mut self, entry: EntryId, name: &str, value: &str) {
        self.entries[entry.0]
            .extensions
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn set_annotation(
        &mut self,
        entry: EntryId,
        name: &str,
        value: serde_json::Value,
    ) {
        self.entries[entry.0]
            .annotations
            .insert(name.to_owned(), value);
    }

    // ===== helper methods =====

    fn add_child(
        &mut self,
        parent: EntryId,
        name: &str,
        kind: EntryKind,
    ) -> EntryId {
        let module = self.entries[parent.0].module.clone();
        let parent_node = self.entries[parent.0].node;
        let node_module = parent_node
            .map(|node| self.nodes[node.0].module.clone())
            .unwrap_or_else(|| module.clone());
        let node = self.add_ast_node(name, &node_module, parent_node);
        let id = self.push_entry(EntryData {
            name: name.to_owned(),
            kind,
            module,
            parent: Some(parent),
            node: Some(node),
            ..Default::default()
        });
        self.entries[parent.0].dir.insert(name.to_owned(), id);
        id
    }

    fn push_entry(&mut self, data: EntryData) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries.push(data);
        id
    }
}
