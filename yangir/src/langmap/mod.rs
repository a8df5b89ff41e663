//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod defaults;
pub mod proto;
pub mod structs;

use std::collections::BTreeMap;
use std::rc::Rc;

use yangir_schema::Entry;
use yangir_util::yang::CompressBehaviour;

use crate::IrOptions;
use crate::enumset::EnumSet;
use crate::error::Error;
use crate::ir::MappedType;
use crate::schematree::SchemaTree;

pub use crate::langmap::proto::ProtoLangMapper;
pub use crate::langmap::structs::StructLangMapper;

/// The language plug-in boundary: everything the core needs from a target
/// language to name directories and type leaves.
///
/// `set_enum_set` and `set_schema_tree` are called before any naming or
/// typing method, so implementations may rely on both being populated.
pub trait LangMapper {
    /// Code-name of a field within its directory.
    fn field_name(&self, entry: Entry<'_>) -> Result<String, Error>;

    /// Code-name of a directory. Names become permanent: repeated calls on
    /// different entries never return the same name within one namespace.
    fn directory_name(
        &mut self,
        entry: Entry<'_>,
        behaviour: CompressBehaviour,
    ) -> Result<String, Error>;

    /// Native type of a non-key leaf.
    fn leaf_type(
        &mut self,
        entry: Entry<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error>;

    /// Native type of a list key leaf, after leafref resolution.
    fn key_leaf_type(
        &mut self,
        entry: Entry<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error>;

    /// Package a directory's message belongs to. Empty for languages with
    /// one flat namespace.
    fn package_name(
        &mut self,
        entry: Entry<'_>,
        behaviour: CompressBehaviour,
    ) -> Result<String, Error>;

    fn set_enum_set(&mut self, enum_set: Rc<EnumSet>);

    fn set_schema_tree(&mut self, tree: Rc<SchemaTree>);
}

// ===== helper functions =====

/// Assigns stable insertion indices to union member type names.
pub(crate) fn union_type_indices(
    types: impl IntoIterator<Item = String>,
) -> BTreeMap<String, usize> {
    let mut indices = BTreeMap::new();
    for (index, name) in types.into_iter().enumerate() {
        indices.insert(name, index);
    }
    indices
}

/// Deduplicates mapped union member types by native type, keeping the
/// first occurrence's order.
pub(crate) fn dedup_union_members(
    members: Vec<MappedType>,
) -> Vec<MappedType> {
    let mut seen = std::collections::BTreeSet::new();
    members
        .into_iter()
        .filter(|member| seen.insert(member.native_type.clone()))
        .collect()
}

/// Fills in the mapped default from the first schema default that
/// validates against the leaf's resolved type.
pub(crate) fn apply_default(
    mapped: &mut MappedType,
    entry: Entry<'_>,
    tree: &SchemaTree,
) -> Result<(), Error> {
    let Some(typ) = entry.typ() else {
        return Ok(());
    };
    let mut first_error = None;
    for default in entry.defaults() {
        match defaults::validate_default(entry, typ, default, tree) {
            Ok(value) => {
                mapped.default_value = Some(value);
                return Ok(());
            }
            Err(error) => first_error = first_error.or(Some(error)),
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
