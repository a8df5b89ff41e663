//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::rc::Rc;

use yangir_schema::{Entry, TypeKind, YangType};
use yangir_util::naming::{DefinedNames, entry_camel_case, path_camel_case_name};
use yangir_util::yang::CompressBehaviour;

use crate::IrOptions;
use crate::enumset::EnumSet;
use crate::error::Error;
use crate::ir::MappedType;
use crate::langmap::{
    LangMapper, apply_default, dedup_union_members, union_type_indices,
};
use crate::schematree::SchemaTree;

/// Mapper for struct-style output: one native scalar per YANG base type,
/// globally unique directory names built from compressed paths, union
/// marker types named after the leaf's path.
#[derive(Debug, Default)]
pub struct StructLangMapper {
    defined_globals: DefinedNames,
    enum_set: Option<Rc<EnumSet>>,
    schema_tree: Option<Rc<SchemaTree>>,
}

// ===== impl StructLangMapper =====

impl StructLangMapper {
    pub fn new() -> Self {
        Self::default()
    }

    fn enum_set(&self) -> Result<&EnumSet, Error> {
        self.enum_set
            .as_deref()
            .ok_or_else(|| Error::MissingEnumName("enum set unset".to_owned()))
    }

    fn schema_tree(&self) -> Result<&SchemaTree, Error> {
        self.schema_tree.as_deref().ok_or_else(|| {
            Error::MissingContextEntry("schema tree unset".to_owned())
        })
    }

    /// Maps a resolved type in the context of `entry`. `named_union` is the
    /// enclosing typedef union while mapping its members.
    fn map_type(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        opts: &IrOptions,
        named_union: Option<&YangType>,
    ) -> Result<MappedType, Error> {
        let scalar = |native: &str, zero: &str| MappedType {
            native_type: native.to_owned(),
            zero_value: zero.to_owned(),
            ..Default::default()
        };

        match typ.kind {
            TypeKind::Int8 => Ok(scalar("i8", "0")),
            TypeKind::Int16 => Ok(scalar("i16", "0")),
            TypeKind::Int32 => Ok(scalar("i32", "0")),
            TypeKind::Int64 => Ok(scalar("i64", "0")),
            TypeKind::Uint8 => Ok(scalar("u8", "0")),
            TypeKind::Uint16 => Ok(scalar("u16", "0")),
            TypeKind::Uint32 => Ok(scalar("u32", "0")),
            TypeKind::Uint64 => Ok(scalar("u64", "0")),
            TypeKind::Bool => Ok(scalar("bool", "false")),
            TypeKind::String => Ok(scalar("String", "String::new()")),
            TypeKind::Decimal64 => Ok(scalar("f64", "0.0")),
            TypeKind::Binary => Ok(scalar("Vec<u8>", "Vec::new()")),
            TypeKind::Empty => Ok(scalar("()", "()")),
            TypeKind::Enumeration => {
                let enum_set = self.enum_set()?;
                let name = if typ.is_typedef() {
                    enum_set.typedef_name(entry, typ, false)?
                } else if let Some(union) = named_union {
                    enum_set.typedef_name(entry, union, true)?
                } else {
                    enum_set.leaf_name(entry)?
                };
                Ok(MappedType {
                    native_type: name,
                    is_enumerated_value: true,
                    zero_value: "0".to_owned(),
                    ..Default::default()
                })
            }
            TypeKind::Identityref => {
                let identity = typ
                    .identity
                    .map(|id| entry.schema().identity(id))
                    .ok_or_else(|| {
                        Error::MissingIdentityBase(entry.path())
                    })?;
                Ok(MappedType {
                    native_type: self.enum_set()?.identity_name(identity)?,
                    is_enumerated_value: true,
                    zero_value: "0".to_owned(),
                    ..Default::default()
                })
            }
            TypeKind::Leafref => {
                let path = typ.path.as_deref().ok_or_else(|| {
                    Error::UnresolvedLeafref(entry.path(), String::new())
                })?;
                let target =
                    self.schema_tree()?.resolve_leafref(path, Some(entry))?;
                let target = entry.schema().entry(target);
                let target_type = target.typ().ok_or_else(|| {
                    Error::MissingContextEntry(target.path())
                })?;
                self.map_type(target, target_type, opts, None)
            }
            TypeKind::Union => self.map_union(entry, typ, opts),
            TypeKind::Bits => {
                Err(Error::UnsupportedType(entry.path(), typ.name.clone()))
            }
        }
    }

    fn map_union(
        &self,
        entry: Entry<'_>,
        typ: &YangType,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let flattened = typ.flattened_union_types();
        if flattened.is_empty() {
            return Err(Error::EmptyUnion(entry.path()));
        }

        let named_union = typ.is_typedef().then_some(typ);
        let mut members = Vec::new();
        for subtype in flattened {
            members.push(self.map_type(entry, subtype, opts, named_union)?);
        }
        let members = dedup_union_members(members);

        // A union with one distinct member collapses to that member.
        if members.len() == 1 {
            let mut mapped = members.into_iter().next().unwrap();
            mapped.union_types.clear();
            return Ok(mapped);
        }

        let compress = opts.compress_behaviour.compress_enabled();
        let native_type =
            format!("{}_Union", path_camel_case_name(entry, compress));
        Ok(MappedType {
            native_type,
            union_types: union_type_indices(
                members.into_iter().map(|m| m.native_type),
            ),
            zero_value: "Default::default()".to_owned(),
            ..Default::default()
        })
    }
}

impl LangMapper for StructLangMapper {
    fn field_name(&self, entry: Entry<'_>) -> Result<String, Error> {
        Ok(entry_camel_case(entry))
    }

    fn directory_name(
        &mut self,
        entry: Entry<'_>,
        behaviour: CompressBehaviour,
    ) -> Result<String, Error> {
        let proposed =
            path_camel_case_name(entry, behaviour.compress_enabled());
        Ok(self.defined_globals.unique(&proposed, "_"))
    }

    fn leaf_type(
        &mut self,
        entry: Entry<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        let typ = entry
            .typ()
            .ok_or_else(|| Error::MissingContextEntry(entry.path()))?;
        let mut mapped = self.map_type(entry, typ, opts, None)?;
        apply_default(&mut mapped, entry, self.schema_tree()?)?;
        Ok(mapped)
    }

    fn key_leaf_type(
        &mut self,
        entry: Entry<'_>,
        opts: &IrOptions,
    ) -> Result<MappedType, Error> {
        // Struct output uses the same native types in key positions.
        self.leaf_type(entry, opts)
    }

    fn package_name(
        &mut self,
        _entry: Entry<'_>,
        _behaviour: CompressBehaviour,
    ) -> Result<String, Error> {
        // One flat namespace.
        Ok(String::new())
    }

    fn set_enum_set(&mut self, enum_set: Rc<EnumSet>) {
        self.enum_set = Some(enum_set);
    }

    fn set_schema_tree(&mut self, tree: Rc<SchemaTree>) {
        self.schema_tree = Some(tree);
    }
}
