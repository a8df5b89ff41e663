//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use yangir_schema::{
    Entry, EntryId, EntryKind, ModuleInfo, ParsedSchema, YangType,
};
use yangir_util::naming::DefinedNames;

use crate::langmap::LangMapper;

/// Kind of a generated directory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum DirectoryKind {
    Container,
    List,
    FakeRoot,
}

/// Node kind of a directory field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum NodeKind {
    Container,
    List,
    Leaf,
    LeafList,
    AnyData,
}

// ===== impl NodeKind =====

impl NodeKind {
    pub fn from_entry(entry: Entry<'_>) -> NodeKind {
        match entry.kind() {
            EntryKind::Leaf => NodeKind::Leaf,
            EntryKind::LeafList => NodeKind::LeafList,
            EntryKind::AnyData => NodeKind::AnyData,
            _ if entry.is_list() => NodeKind::List,
            _ => NodeKind::Container,
        }
    }
}

/// A native type chosen by the language mapper.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct MappedType {
    pub native_type: String,
    // Member native types of a union, mapped to their insertion index.
    pub union_types: BTreeMap<String, usize>,
    pub is_enumerated_value: bool,
    pub zero_value: String,
    pub default_value: Option<String>,
}

/// YANG-level details of a field, carried for downstream emitters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct YangDetails {
    pub name: String,
    pub defaults: Vec<String>,
    pub description: Option<String>,
    pub typ: Option<YangType>,
    pub belonging_module: String,
    pub root_element_module: String,
    pub defining_module: String,
    pub path: String,
    pub leafref_target_path: Option<String>,
    pub presence_statement: Option<String>,
}

/// One field of a directory, keyed by its YANG name in `Directory`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Field {
    pub name: String,
    pub node_kind: NodeKind,
    // None for directory-kind fields.
    pub lang_type: Option<MappedType>,
    pub yang_details: YangDetails,
    pub mapped_paths: Vec<Vec<String>>,
    pub mapped_path_modules: Vec<Vec<String>>,
    pub shadowed_mapped_paths: Vec<Vec<String>>,
    pub shadowed_mapped_path_modules: Vec<Vec<String>>,
    pub entry: EntryId,
}

/// A list key descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct ListKey {
    pub name: String,
    pub lang_type: MappedType,
    // The key leaf after leafref resolution.
    pub key_leaf: EntryId,
}

/// A generated directory: one container, list or fake root.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Directory {
    pub name: String,
    pub kind: DirectoryKind,
    pub path: Vec<String>,
    pub fields: BTreeMap<String, Field>,
    // Fields elided by config/state compression, kept so emitters can
    // annotate the alternative addressing.
    pub shadowed_fields: BTreeMap<String, Field>,
    pub list_keys: BTreeMap<String, ListKey>,
    pub list_key_order: Vec<String>,
    pub is_fake_root: bool,
    pub belonging_module: String,
    pub root_element_module: String,
    pub defining_module: String,
    // Package-scoped location for message emitters.
    pub package: String,
    pub entry: EntryId,
}

// ===== impl Directory =====

impl Directory {
    /// YANG field names in lexicographic order.
    pub fn ordered_field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    /// Code-names for every field, uniquified within this directory in
    /// lexicographic YANG-name order.
    pub fn field_name_map(
        &self,
        schema: &ParsedSchema,
        mapper: &dyn LangMapper,
    ) -> Result<BTreeMap<String, String>, crate::error::Error> {
        let mut defined = DefinedNames::new();
        let mut names = BTreeMap::new();
        for (yang_name, field) in &self.fields {
            let proposed = mapper.field_name(schema.entry(field.entry))?;
            names.insert(yang_name.clone(), defined.unique(&proposed, "_"));
        }
        Ok(names)
    }
}

/// Source of a generated enumeration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum EnumeratedValueKind {
    // Inline enumeration leaf.
    Simple,
    // Typedef enumeration.
    Derived,
    // Inline enumeration within a union.
    Union,
    // Typedef union wrapping a single enumeration.
    DerivedUnion,
    Identity,
}

/// A named value of a generated enumeration. `defining_module` is set for
/// identity members only.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct EnumeratedValue {
    pub name: String,
    pub value: i64,
    pub defining_module: Option<String>,
}

/// A generated enumeration.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct EnumeratedType {
    pub name: String,
    pub kind: EnumeratedValueKind,
    // The YANG type or identity name the enumeration came from.
    pub type_name: String,
    pub value_prefix: Vec<String>,
    pub values: Vec<EnumeratedValue>,
}

/// The compiled intermediate representation.
#[derive(Debug)]
pub struct Ir {
    // Absolute schema path to directory.
    pub directories: BTreeMap<String, Directory>,
    // Final code-name to enumeration.
    pub enums: BTreeMap<String, EnumeratedType>,
    pub model_data: Vec<ModuleInfo>,
    // Handle back to the parsed source, for schema serialization.
    pub schema: ParsedSchema,
}

// ===== impl Ir =====

impl Ir {
    /// Directory paths in lexicographic order.
    pub fn ordered_directory_paths(&self) -> Vec<String> {
        self.directories.keys().cloned().collect()
    }

    /// Directory paths ordered by directory code-name, path as tiebreak.
    pub fn ordered_directory_paths_by_name(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.directories.keys().cloned().collect();
        paths.sort_by(|a, b| {
            let name_a = &self.directories[a].name;
            let name_b = &self.directories[b].name;
            name_a.cmp(name_b).then_with(|| a.cmp(b))
        });
        paths
    }
}
