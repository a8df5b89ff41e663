//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde_json::{Map, Value, json};
use yangir_schema::{Entry, EntryKind};

use crate::ir::Ir;

/// Serializes the schema tree to JSON, each directory annotated with its
/// chosen code-name and absolute schema path. Emitters that bundle a
/// runtime schema embed these bytes; the format is stable but carries no
/// functional contract.
pub fn serialize_schema_tree(
    ir: &Ir,
    include_descriptions: bool,
) -> serde_json::Result<Vec<u8>> {
    let mut map = Map::new();

    let fake_root = ir
        .directories
        .values()
        .find(|directory| directory.is_fake_root)
        .map(|directory| ir.schema.entry(directory.entry));

    match fake_root {
        Some(root) => {
            map.insert(
                root.name().to_owned(),
                entry_value(ir, root, include_descriptions),
            );
        }
        None => {
            for root in ir.schema.roots() {
                map.insert(
                    root.name().to_owned(),
                    entry_value(ir, root, include_descriptions),
                );
            }
        }
    }

    serde_json::to_vec_pretty(&Value::Object(map))
}

// ===== helper functions =====

fn entry_value(
    ir: &Ir,
    entry: Entry<'_>,
    include_descriptions: bool,
) -> Value {
    let mut value = Map::new();
    value.insert("name".to_owned(), json!(entry.name()));
    value.insert("kind".to_owned(), json!(kind_keyword(entry)));

    if include_descriptions
        && let Some(description) = entry.description()
    {
        value.insert("description".to_owned(), json!(description));
    }
    if let Some(key) = entry.key() {
        value.insert("key".to_owned(), json!(key));
    }
    if let Some(typ) = entry.typ() {
        value.insert("type".to_owned(), json!(typ.name));
    }

    // Annotate generated directories with their code-name.
    let mut annotations = Map::new();
    annotations.insert("schema-path".to_owned(), json!(entry.path()));
    if let Some(directory) = ir.directories.get(&entry.path()) {
        annotations.insert("struct-name".to_owned(), json!(directory.name));
    }
    value.insert("annotations".to_owned(), Value::Object(annotations));

    let mut dir = Map::new();
    for child in entry.children() {
        dir.insert(
            child.name().to_owned(),
            entry_value(ir, child, include_descriptions),
        );
    }
    if !dir.is_empty() {
        value.insert("dir".to_owned(), Value::Object(dir));
    }

    Value::Object(value)
}

fn kind_keyword(entry: Entry<'_>) -> &'static str {
    match entry.kind() {
        EntryKind::Directory if entry.is_list() => "list",
        EntryKind::Directory => "container",
        EntryKind::Leaf => "leaf",
        EntryKind::LeafList => "leaf-list",
        EntryKind::Choice => "choice",
        EntryKind::Case => "case",
        EntryKind::AnyData => "anydata",
    }
}
