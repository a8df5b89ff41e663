//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::ParsedSchema;

/// Index of an AST node within the schema arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub(crate) usize);

/// Minimal AST back-reference record.
///
/// Only two uses are sanctioned: recovering the defining module of an entry
/// and walking grouping ancestry when computing enumeration identifiers.
/// Module-level statements have no parent.
#[derive(Debug)]
pub struct AstNode {
    pub(crate) name: String,
    pub(crate) module: String,
    pub(crate) parent: Option<NodeId>,
}

/// Borrowed navigation handle over one AST node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    schema: &'a ParsedSchema,
    id: NodeId,
}

// ===== impl Node =====

impl<'a> Node<'a> {
    pub(crate) fn new(schema: &'a ParsedSchema, id: NodeId) -> Self {
        Node { schema, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Statement argument name (`NName` in the original AST).
    pub fn name(&self) -> &'a str {
        &self.schema.node_data(self.id).name
    }

    /// Name of the module containing this statement.
    pub fn module(&self) -> &'a str {
        &self.schema.node_data(self.id).module
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.schema
            .node_data(self.id)
            .parent
            .map(|id| self.schema.node(id))
    }

    /// Statement names from the topmost statement still inside this node's
    /// module down to the node itself. Grouping instantiations share AST
    /// nodes, so every instantiation of the same definition yields the same
    /// segments.
    pub fn identity_path_segments(&self) -> Vec<&'a str> {
        let defining_module = self.module();
        let mut segments = Vec::new();
        let mut node = Some(*self);
        while let Some(n) = node {
            if n.parent().is_none() || n.module() != defining_module {
                break;
            }
            segments.push(n.name());
            node = n.parent();
        }
        segments.reverse();
        segments
    }

    /// The node-identity path: `identity_path_segments` joined with `/`.
    pub fn identity_path(&self) -> String {
        let mut path = String::new();
        for segment in self.identity_path_segments() {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}
