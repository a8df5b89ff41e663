//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use yangir_schema::{Entry, EntryId, ParsedSchema};
use yangir_util::path::{split_path, strip_namespace, strip_predicates};

use crate::error::Error;

/// Index of leaf entries by schema path, used to resolve leafrefs.
///
/// Keys are the path segments below the module: a top-level leaf is stored
/// under its bare name, deeper leaves under their whole after-module path.
/// Directories are traversed but never stored.
#[derive(Clone, Debug, Default)]
pub struct SchemaTree {
    root: TreeNode,
}

#[derive(Clone, Debug, Default)]
struct TreeNode {
    entry: Option<EntryId>,
    children: BTreeMap<String, TreeNode>,
}

// ===== impl SchemaTree =====

impl SchemaTree {
    /// Builds the tree from every module root of the schema.
    pub fn build(schema: &ParsedSchema) -> Result<SchemaTree, Error> {
        let mut tree = SchemaTree::default();
        for root in schema.roots() {
            if root.is_fake_root() {
                continue;
            }
            for child in root.children() {
                tree.add_entry(child, &mut Vec::new())?;
            }
        }
        Ok(tree)
    }

    fn add_entry<'a>(
        &mut self,
        entry: Entry<'a>,
        prefix: &mut Vec<&'a str>,
    ) -> Result<(), Error> {
        prefix.push(entry.name());
        if entry.is_leaf() || entry.is_leaf_list() {
            self.insert(prefix, entry)?;
        } else {
            for child in entry.children() {
                self.add_entry(child, prefix)?;
            }
        }
        prefix.pop();
        Ok(())
    }

    fn insert(
        &mut self,
        segments: &[&str],
        entry: Entry<'_>,
    ) -> Result<(), Error> {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.children.entry((*segment).to_owned()).or_default();
        }
        if node.entry.is_some() {
            return Err(Error::DuplicateSchemaPath(entry.path()));
        }
        node.entry = Some(entry.id());
        Ok(())
    }

    /// Exact-path lookup of a previously registered leaf.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<EntryId> {
        let mut node = &self.root;
        for segment in segments {
            node = node.children.get(segment.as_ref())?;
        }
        node.entry
    }

    /// Resolves a leafref path against the tree, relative to `caller`.
    pub fn resolve_leafref(
        &self,
        path: &str,
        caller: Option<Entry<'_>>,
    ) -> Result<EntryId, Error> {
        let segments = fix_path(path, caller)?;
        self.lookup(&segments).ok_or_else(|| {
            let context = caller
                .map(|entry| entry.path())
                .unwrap_or_else(|| "/".to_owned());
            Error::UnresolvedLeafref(context, path.to_owned())
        })
    }
}

// ===== global functions =====

/// Normalizes an XPATH-style reference into schema-tree lookup segments.
///
/// Key predicates are discarded, namespace prefixes stripped. Absolute
/// paths lose their leading empty segment; relative paths are resolved
/// against the caller's after-module path, one ancestor per leading `..`.
pub fn fix_path(
    path: &str,
    caller: Option<Entry<'_>>,
) -> Result<Vec<String>, Error> {
    let mut segments = Vec::new();
    for segment in split_path(path) {
        let segment = strip_predicates(&segment);
        let segment = strip_namespace(segment)?;
        segments.push(segment.to_owned());
    }

    match segments.first().map(|s| s.as_str()) {
        // Absolute reference.
        Some("") => {
            segments.remove(0);
            Ok(segments)
        }
        // Relative reference.
        Some("..") => {
            let Some(caller) = caller else {
                return Err(Error::MissingContextEntry(path.to_owned()));
            };
            let mut fixed: Vec<String> = caller
                .path_segments()
                .iter()
                .skip(1)
                .map(|s| (*s).to_owned())
                .collect();
            let mut index = 0;
            while segments.get(index).is_some_and(|s| s == "..") {
                if fixed.pop().is_none() {
                    return Err(Error::PathAboveRoot(
                        path.to_owned(),
                        caller.path(),
                    ));
                }
                index += 1;
            }
            fixed.extend(segments[index..].iter().cloned());
            Ok(fixed)
        }
        // Already rootless.
        _ => Ok(segments),
    }
}
